use askama::Template;

use super::AdminLayout;

/// Page shell rendered before the post and categories have loaded.
#[derive(Clone)]
pub struct AdminPostEditView {
    pub heading: String,
    pub panel_action: String,
}

#[derive(Clone)]
pub struct AdminPostEditorView {
    pub form_action: String,
    pub change_action: String,
    pub title: String,
    pub title_error: Option<String>,
    pub category_options: Vec<AdminCategoryOption>,
    pub category_error: Option<String>,
    pub status_options: Vec<AdminPostStatusOption>,
    pub status_error: Option<String>,
    pub submit_label: String,
}

#[derive(Clone)]
pub struct AdminCategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone)]
pub struct AdminPostStatusOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Clone)]
pub struct AdminContentEditorView {
    pub content: String,
    pub is_preview: bool,
    pub preview_html: String,
    pub error: Option<String>,
    pub change_action: String,
    pub write_action: String,
    pub preview_action: String,
}

#[derive(Clone)]
pub struct AdminUnsavedFlagView {
    pub unsaved: bool,
    pub warn: bool,
}

impl AdminUnsavedFlagView {
    pub fn value(&self) -> &'static str {
        if self.unsaved { "true" } else { "false" }
    }
}

#[derive(Template)]
#[template(path = "admin/post_edit.html")]
pub struct AdminPostEditTemplate {
    pub view: AdminLayout<AdminPostEditView>,
}

#[derive(Template)]
#[template(path = "admin/post_editor_panel.html")]
pub struct AdminPostEditPanelTemplate {
    pub content: AdminPostEditorView,
    pub editor: AdminContentEditorView,
    pub unsaved: AdminUnsavedFlagView,
}

#[derive(Template)]
#[template(path = "admin/content_editor.html")]
pub struct AdminContentEditorTemplate {
    pub editor: AdminContentEditorView,
}

#[derive(Template)]
#[template(path = "admin/unsaved_flag.html")]
pub struct AdminUnsavedFlagTemplate {
    pub unsaved: AdminUnsavedFlagView,
}
