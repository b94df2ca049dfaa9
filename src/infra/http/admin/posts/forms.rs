use serde::Deserialize;

use crate::application::admin::posts::PostEditorSnapshot;
use crate::domain::form::PostField;

/// Fields the editor form posts back on every change, tab switch and save.
///
/// A field absent from the body is a reset artifact rather than an empty
/// value, so every input stays optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminPostEditorForm {
    pub(crate) title: Option<String>,
    #[serde(rename = "category.id")]
    pub(crate) category_id: Option<String>,
    pub(crate) status: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) unsaved: Option<String>,
    pub(crate) tab: Option<String>,
}

impl AdminPostEditorForm {
    pub(crate) fn value(&self, field: PostField) -> Option<&str> {
        let value = match field {
            PostField::Title => &self.title,
            PostField::Category => &self.category_id,
            PostField::Status => &self.status,
            PostField::Content => &self.content,
        };
        value.as_deref()
    }

    pub(crate) fn snapshot(&self) -> PostEditorSnapshot {
        let values = PostField::ALL
            .into_iter()
            .filter_map(|field| {
                self.value(field)
                    .map(|value| (field.name().to_string(), value.to_string()))
            })
            .collect();

        PostEditorSnapshot {
            values,
            unsaved: self.unsaved.as_deref() == Some("true"),
            tab: self
                .tab
                .as_deref()
                .and_then(|tab| tab.parse().ok())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdminPostFieldQuery {
    pub(crate) field: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdminPostTabQuery {
    pub(crate) tab: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editor::EditorTab;

    #[test]
    fn snapshot_keeps_submitted_fields_only() {
        let form = AdminPostEditorForm {
            title: Some("Hello".into()),
            category_id: Some("2".into()),
            unsaved: Some("true".into()),
            tab: Some("preview".into()),
            ..Default::default()
        };
        let snapshot = form.snapshot();

        assert_eq!(snapshot.value(PostField::Title), Some("Hello"));
        assert_eq!(snapshot.value(PostField::Category), Some("2"));
        assert_eq!(snapshot.value(PostField::Content), None);
        assert!(snapshot.unsaved);
        assert_eq!(snapshot.tab, EditorTab::Preview);
    }

    #[test]
    fn unknown_tab_falls_back_to_write() {
        let form = AdminPostEditorForm {
            tab: Some("split".into()),
            ..Default::default()
        };
        assert_eq!(form.snapshot().tab, EditorTab::Write);
    }
}
