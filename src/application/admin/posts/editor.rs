//! Per-page editor state machine.

use crate::domain::{
    editor::{EditorPhase, EditorTab},
    entities::PostRecord,
    form::{FieldChange, FieldErrors, FormState, PostField, ValidatedPost},
};

use super::types::{AdminPostError, PostEditorSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEditor {
    post_id: i64,
    phase: EditorPhase,
    form: FormState,
    tab: EditorTab,
    warn_when_unsaved: bool,
}

impl PostEditor {
    /// Editor for a post whose record has not arrived yet.
    pub fn loading(post_id: i64, warn_when_unsaved: bool) -> Self {
        Self {
            post_id,
            phase: EditorPhase::Loading,
            form: FormState::default(),
            tab: EditorTab::default(),
            warn_when_unsaved,
        }
    }

    /// Seed defaults once from the fetched record.
    pub fn seed(&mut self, post: &PostRecord) -> Result<(), AdminPostError> {
        self.phase = self.phase.transition(EditorPhase::Ready)?;
        self.form = FormState::seeded(post);
        Ok(())
    }

    /// Rebuild an editor from the state a client sent back.
    pub fn restore(
        post_id: i64,
        snapshot: &PostEditorSnapshot,
        warn_when_unsaved: bool,
    ) -> Result<Self, AdminPostError> {
        let values = snapshot.fields()?;
        let dirty = warn_when_unsaved && snapshot.unsaved;
        let phase = if dirty {
            EditorPhase::Editing
        } else {
            EditorPhase::Ready
        };
        Ok(Self {
            post_id,
            phase,
            form: FormState::from_values(values, dirty),
            tab: snapshot.tab,
            warn_when_unsaved,
        })
    }

    pub fn post_id(&self) -> i64 {
        self.post_id
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn value(&self, field: PostField) -> &str {
        self.form.value(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        self.form.errors()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.form.is_dirty()
    }

    pub fn warns_when_unsaved(&self) -> bool {
        self.warn_when_unsaved
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == EditorPhase::Submitting
    }

    /// Apply observed edits. Returns whether the unsaved flag was raised.
    pub fn change(&mut self, changes: &[FieldChange]) -> Result<bool, AdminPostError> {
        if changes.iter().all(|change| change.value.is_none()) {
            return Ok(false);
        }
        self.phase = self.phase.transition(EditorPhase::Editing)?;
        Ok(self.form.apply(changes, self.warn_when_unsaved))
    }

    /// Switch between the write and preview panes. Content is left untouched.
    pub fn select_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
    }

    /// Validate every field and enter the submitting phase.
    pub fn begin_submit(&mut self) -> Result<ValidatedPost, AdminPostError> {
        if !self.phase.can_transition_to(EditorPhase::Submitting) {
            self.phase.transition(EditorPhase::Submitting)?;
        }
        let payload = self.form.validate().map_err(AdminPostError::Validation)?;
        self.phase = EditorPhase::Submitting;
        Ok(payload)
    }

    /// Reject a field after validation passed, returning to editing.
    pub fn reject(&mut self, field: PostField, message: &str) -> AdminPostError {
        self.form.reject(field, message);
        if self.phase == EditorPhase::Submitting {
            self.phase = EditorPhase::Editing;
        }
        AdminPostError::Validation(self.form.errors().clone())
    }

    /// Settle an in-flight submission. A failed dispatch keeps unsaved edits.
    pub fn finish_submit(&mut self, succeeded: bool) -> Result<(), AdminPostError> {
        if succeeded {
            self.phase = self.phase.transition(EditorPhase::Done)?;
            self.form.mark_clean();
        } else {
            self.phase = self.phase.transition(EditorPhase::Editing)?;
        }
        Ok(())
    }

    /// State a client needs to keep to continue editing.
    pub fn snapshot(&self) -> PostEditorSnapshot {
        PostEditorSnapshot {
            values: self
                .form
                .values()
                .map(|(field, value)| (field.name().to_string(), value.to_string()))
                .collect(),
            unsaved: self.has_unsaved_changes(),
            tab: self.tab,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::types::PostStatus;

    fn record() -> PostRecord {
        PostRecord {
            id: 1,
            title: "First".into(),
            content: "**bold** text".into(),
            status: PostStatus::Published,
            category_id: 2,
            created_at: datetime!(2024-03-01 09:00 UTC),
            updated_at: datetime!(2024-03-01 09:00 UTC),
        }
    }

    fn ready_editor() -> PostEditor {
        let mut editor = PostEditor::loading(1, true);
        editor.seed(&record()).expect("seed");
        editor
    }

    #[test]
    fn initial_load_leaves_unsaved_flag_clear() {
        let editor = ready_editor();
        assert_eq!(editor.phase(), EditorPhase::Ready);
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn seeding_twice_is_rejected() {
        let mut editor = ready_editor();
        assert!(matches!(
            editor.seed(&record()),
            Err(AdminPostError::Domain(_))
        ));
    }

    #[test]
    fn edit_after_load_raises_unsaved_flag() {
        let mut editor = ready_editor();
        let raised = editor
            .change(&[FieldChange::new(PostField::Title, "Second")])
            .expect("change");
        assert!(raised);
        assert!(editor.has_unsaved_changes());
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[test]
    fn reset_only_batch_is_not_an_edit() {
        let mut editor = ready_editor();
        let raised = editor
            .change(&[FieldChange::reset(PostField::Content)])
            .expect("change");
        assert!(!raised);
        assert_eq!(editor.phase(), EditorPhase::Ready);
    }

    #[test]
    fn toggling_tabs_keeps_content() {
        let mut editor = ready_editor();
        editor.select_tab(EditorTab::Preview);
        editor.select_tab(EditorTab::Write);
        editor.select_tab(EditorTab::Preview);
        assert_eq!(editor.tab(), EditorTab::Preview);
        assert_eq!(editor.value(PostField::Content), "**bold** text");
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn failed_validation_stays_editable() {
        let mut editor = ready_editor();
        editor
            .change(&[FieldChange::new(PostField::Title, "")])
            .expect("change");
        let err = editor.begin_submit().expect_err("title required");
        match err {
            AdminPostError::Validation(errors) => {
                assert_eq!(errors.get(PostField::Title), Some("Title is required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[test]
    fn failed_dispatch_keeps_unsaved_edits() {
        let mut editor = ready_editor();
        editor
            .change(&[FieldChange::new(PostField::Status, "draft")])
            .expect("change");
        editor.begin_submit().expect("valid");
        assert!(editor.is_submitting());
        editor.finish_submit(false).expect("settle");
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert!(editor.has_unsaved_changes());
    }

    #[test]
    fn successful_dispatch_clears_unsaved_flag() {
        let mut editor = ready_editor();
        editor
            .change(&[FieldChange::new(PostField::Status, "draft")])
            .expect("change");
        let payload = editor.begin_submit().expect("valid");
        assert_eq!(payload.status, PostStatus::Draft);
        editor.finish_submit(true).expect("settle");
        assert_eq!(editor.phase(), EditorPhase::Done);
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn snapshot_restores_equivalent_editor() {
        let mut editor = ready_editor();
        editor
            .change(&[FieldChange::new(PostField::Title, "Edited")])
            .expect("change");
        editor.select_tab(EditorTab::Preview);

        let restored = PostEditor::restore(1, &editor.snapshot(), true).expect("restore");
        assert_eq!(restored.value(PostField::Title), "Edited");
        assert_eq!(restored.tab(), EditorTab::Preview);
        assert!(restored.has_unsaved_changes());
        assert_eq!(restored.phase(), EditorPhase::Editing);
    }
}
