use askama::Template;

use crate::{
    application::admin::posts::PostEditor,
    application::error::HttpError,
    domain::{
        editor::EditorTab,
        entities::CategoryRecord,
        form::PostField,
        types::PostStatus,
    },
    infra::http::admin::{AdminState, shared::template_render_http_error},
    presentation::admin::views as admin_views,
};

use super::errors::preview_error;

pub(super) struct EditorPaths {
    pub form: String,
    pub panel: String,
    pub change: String,
    pub tab: String,
}

impl EditorPaths {
    pub(super) fn for_post(id: i64) -> Self {
        let form = format!("/posts/{id}/edit");
        Self {
            panel: format!("{form}/panel"),
            change: format!("{form}/change"),
            tab: format!("{form}/tab"),
            form,
        }
    }
}

pub(super) fn category_options(
    categories: &[CategoryRecord],
    selected: &str,
) -> Vec<admin_views::AdminCategoryOption> {
    let selected = selected.trim();
    let mut options = Vec::with_capacity(categories.len() + 1);
    let matched = categories
        .iter()
        .any(|category| category.id.to_string() == selected);
    if !matched {
        options.push(admin_views::AdminCategoryOption {
            value: String::new(),
            label: "Select a category".to_string(),
            selected: true,
        });
    }
    options.extend(categories.iter().map(|category| {
        let value = category.id.to_string();
        admin_views::AdminCategoryOption {
            selected: value == selected,
            value,
            label: category.title.clone(),
        }
    }));
    options
}

pub(super) fn status_options(selected: &str) -> Vec<admin_views::AdminPostStatusOption> {
    PostStatus::ALL
        .iter()
        .map(|status| admin_views::AdminPostStatusOption {
            value: status.as_str(),
            label: status.label(),
            selected: status.as_str() == selected.trim(),
        })
        .collect()
}

pub(super) fn build_content_editor(
    state: &AdminState,
    editor: &PostEditor,
) -> Result<admin_views::AdminContentEditorView, HttpError> {
    let paths = EditorPaths::for_post(editor.post_id());
    let content = editor.value(PostField::Content).to_string();
    let is_preview = editor.tab() == EditorTab::Preview;

    let preview_html = if is_preview {
        state
            .preview
            .render_preview(&content)
            .map_err(|err| preview_error("infra::http::admin::build_content_editor", err))?
            .into_inner()
    } else {
        String::new()
    };

    Ok(admin_views::AdminContentEditorView {
        content,
        is_preview,
        preview_html,
        error: editor
            .errors()
            .get(PostField::Content)
            .map(str::to_string),
        write_action: format!("{}?tab={}", paths.tab, EditorTab::Write),
        preview_action: format!("{}?tab={}", paths.tab, EditorTab::Preview),
        change_action: paths.change,
    })
}

pub(super) fn build_unsaved_flag(editor: &PostEditor) -> admin_views::AdminUnsavedFlagView {
    admin_views::AdminUnsavedFlagView {
        unsaved: editor.has_unsaved_changes(),
        warn: editor.warns_when_unsaved(),
    }
}

pub(super) fn build_editor_panel(
    state: &AdminState,
    editor: &PostEditor,
    categories: &[CategoryRecord],
) -> Result<admin_views::AdminPostEditPanelTemplate, HttpError> {
    let paths = EditorPaths::for_post(editor.post_id());
    let errors = editor.errors();

    let content = admin_views::AdminPostEditorView {
        form_action: paths.form,
        change_action: paths.change,
        title: editor.value(PostField::Title).to_string(),
        title_error: errors.get(PostField::Title).map(str::to_string),
        category_options: category_options(categories, editor.value(PostField::Category)),
        category_error: errors.get(PostField::Category).map(str::to_string),
        status_options: status_options(editor.value(PostField::Status)),
        status_error: errors.get(PostField::Status).map(str::to_string),
        submit_label: "Save".to_string(),
    };

    Ok(admin_views::AdminPostEditPanelTemplate {
        content,
        editor: build_content_editor(state, editor)?,
        unsaved: build_unsaved_flag(editor),
    })
}

pub(super) fn render_panel_html(
    template: admin_views::AdminPostEditPanelTemplate,
) -> Result<String, HttpError> {
    template.render().map_err(|err| {
        template_render_http_error(
            "infra::http::admin::posts::render_panel_html",
            "Template rendering failed",
            err,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<CategoryRecord> {
        vec![
            CategoryRecord {
                id: 1,
                title: "Tech".into(),
            },
            CategoryRecord {
                id: 2,
                title: "Life".into(),
            },
        ]
    }

    #[test]
    fn current_category_is_preselected() {
        let options = category_options(&categories(), "2");
        assert_eq!(options.len(), 2);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "2");
        assert_eq!(selected[0].label, "Life");
    }

    #[test]
    fn unknown_category_gets_a_placeholder() {
        let options = category_options(&categories(), "");
        assert_eq!(options[0].value, "");
        assert!(options[0].selected);
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn status_options_are_fixed() {
        let options = status_options("draft");
        let values: Vec<_> = options.iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["published", "draft", "rejected"]);
        assert!(options[1].selected);
    }
}
