use askama::Template;
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use datastar::prelude::ElementPatchMode;
use tracing::debug;

use crate::{
    application::{
        admin::posts::{AdminPostError, PostEditor},
        stream::StreamBuilder,
    },
    domain::{
        editor::EditorTab,
        form::{FieldChange, PostField},
    },
    infra::http::admin::{
        AdminState,
        selectors::{CONTENT_EDITOR, PANEL, UNSAVED_FLAG},
        shared::{
            Toast, datastar_replace, push_toasts, stream_error_toast, template_render_http_error,
        },
    },
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::errors::admin_post_error;
use super::forms::{AdminPostEditorForm, AdminPostFieldQuery, AdminPostTabQuery};
use super::panel::{
    EditorPaths, build_content_editor, build_editor_panel, build_unsaved_flag, render_panel_html,
};

/// Page shell. Only the loading affordance renders until the panel arrives.
pub(crate) async fn admin_post_edit(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Response {
    let chrome = state.chrome.load("Edit post");
    let content = admin_views::AdminPostEditView {
        heading: format!("Edit post #{id}"),
        panel_action: EditorPaths::for_post(id).panel,
    };

    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminPostEditTemplate { view }, StatusCode::OK)
}

/// Fetch the post and categories, then swap the loading affordance for the form.
pub(crate) async fn admin_post_edit_panel(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Response {
    let loaded = match state.posts.load_editor(id).await {
        Ok(loaded) => loaded,
        Err(err) => {
            let text = load_failure_text(&err);
            return stream_error_toast(
                admin_post_error("infra::http::admin_post_edit_panel", err),
                text,
            );
        }
    };

    let html = match build_editor_panel(&state, &loaded.editor, &loaded.categories)
        .and_then(render_panel_html)
    {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };

    datastar_replace(PANEL, html).into_response()
}

/// Track an observed field edit and raise the unsaved flag when warranted.
pub(crate) async fn admin_post_edit_change(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    Query(query): Query<AdminPostFieldQuery>,
    Form(form): Form<AdminPostEditorForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_post_edit_change";

    let field = match PostField::from_name(&query.field) {
        Ok(field) => field,
        Err(err) => return admin_post_error(SOURCE, err.into()).into_response(),
    };
    let mut editor = match restore_editor(&state, id, &form) {
        Ok(editor) => editor,
        Err(err) => return admin_post_error(SOURCE, err).into_response(),
    };

    let change = FieldChange {
        field,
        value: form.value(field).map(str::to_string),
    };
    let raised = match editor.change(&[change]) {
        Ok(raised) => raised,
        Err(err) => return admin_post_error(SOURCE, err).into_response(),
    };

    debug!(
        target = "quire::http::admin::posts",
        post_id = id,
        field = field.name(),
        raised,
        "field change observed"
    );

    if !raised {
        return StreamBuilder::new().into_response();
    }

    let template = admin_views::AdminUnsavedFlagTemplate {
        unsaved: build_unsaved_flag(&editor),
    };
    match template.render() {
        Ok(html) => datastar_replace(UNSAVED_FLAG, html).into_response(),
        Err(err) => {
            template_render_http_error(SOURCE, "Template rendering failed", err).into_response()
        }
    }
}

/// Switch the content editor between write and preview; the content is carried
/// through unchanged.
pub(crate) async fn admin_post_edit_tab(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    Query(query): Query<AdminPostTabQuery>,
    Form(form): Form<AdminPostEditorForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_post_edit_tab";

    let tab = match query.tab.parse::<EditorTab>() {
        Ok(tab) => tab,
        Err(err) => return admin_post_error(SOURCE, err.into()).into_response(),
    };
    let mut editor = match restore_editor(&state, id, &form) {
        Ok(editor) => editor,
        Err(err) => return admin_post_error(SOURCE, err).into_response(),
    };
    editor.select_tab(tab);

    let view = match build_content_editor(&state, &editor) {
        Ok(view) => view,
        Err(err) => return err.into_response(),
    };
    match (admin_views::AdminContentEditorTemplate { editor: view }).render() {
        Ok(html) => datastar_replace(CONTENT_EDITOR, html).into_response(),
        Err(err) => {
            template_render_http_error(SOURCE, "Template rendering failed", err).into_response()
        }
    }
}

/// Validate and dispatch the update.
///
/// Field errors re-render the panel inline. Store failures leave the panel
/// untouched and surface as an error toast.
pub(crate) async fn admin_post_update(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    Form(form): Form<AdminPostEditorForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_post_update";

    let mut editor = match restore_editor(&state, id, &form) {
        Ok(editor) => editor,
        Err(err) => return admin_post_error(SOURCE, err).into_response(),
    };

    let (editor, toasts) = match state.posts.submit(&mut editor).await {
        Ok(updated) => {
            let mut saved = PostEditor::loading(id, editor.warns_when_unsaved());
            if let Err(err) = saved.seed(&updated) {
                return admin_post_error(SOURCE, err).into_response();
            }
            saved.select_tab(editor.tab());
            (saved, vec![Toast::success("Post saved")])
        }
        Err(AdminPostError::Validation(_)) => (editor, Vec::new()),
        Err(err) => {
            let text = format!("Failed to save post: {err}");
            return stream_error_toast(admin_post_error(SOURCE, err), text);
        }
    };

    // The submitted form carries only the selected category id, so the option
    // list is fetched again for both the saved and the rejected panel.
    let categories = match state.posts.all_categories().await {
        Ok(categories) => categories,
        Err(err) => {
            let text = load_failure_text(&err);
            return stream_error_toast(admin_post_error(SOURCE, err), text);
        }
    };

    let html = match build_editor_panel(&state, &editor, &categories).and_then(render_panel_html)
    {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };

    let mut stream = StreamBuilder::new();
    stream.push_patch(html, PANEL, ElementPatchMode::Replace);
    if !toasts.is_empty()
        && let Err(err) = push_toasts(&mut stream, &toasts)
    {
        return err.into_response();
    }
    stream.into_response()
}

fn restore_editor(
    state: &AdminState,
    id: i64,
    form: &AdminPostEditorForm,
) -> Result<PostEditor, AdminPostError> {
    let warn = state.posts.options().warn_when_unsaved_changes;
    PostEditor::restore(id, &form.snapshot(), warn)
}

fn load_failure_text(err: &AdminPostError) -> String {
    match err {
        AdminPostError::NotFound(id) => format!("Post #{id} could not be found"),
        other => format!("Failed to load editor: {other}"),
    }
}
