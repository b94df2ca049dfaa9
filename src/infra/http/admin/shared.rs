use askama::{Error as AskamaError, Template};
use axum::response::{IntoResponse, Response};
use datastar::prelude::ElementPatchMode;
use std::time::Duration;
use uuid::Uuid;

use super::selectors::TOAST_STACK;
use crate::{
    application::{error::HttpError, stream::StreamBuilder},
    presentation::{admin::views as admin_views, views::TemplateRenderError},
};

#[derive(Clone)]
pub(super) struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
    pub ttl: Duration,
}

#[derive(Clone, Copy)]
pub(super) enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn as_variant(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(6000);
const ERROR_TOAST_TTL: Duration = Duration::from_millis(10000);

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self::with_kind(ToastKind::Success, text, DEFAULT_TOAST_TTL)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::with_kind(ToastKind::Error, text, ERROR_TOAST_TTL)
    }

    fn with_kind(kind: ToastKind, text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text: text.into(),
            ttl,
        }
    }
}

pub(super) fn push_toasts(stream: &mut StreamBuilder, toasts: &[Toast]) -> Result<(), HttpError> {
    let view_items = toasts
        .iter()
        .map(|toast| admin_views::AdminToastItem {
            id: toast.id.to_string(),
            kind: toast.kind.as_variant(),
            text: toast.text.clone(),
            ttl_ms: toast.ttl.as_millis() as u64,
        })
        .collect::<Vec<_>>();

    let template = admin_views::AdminToastStackTemplate { toasts: view_items };

    let html = template.render().map_err(|err| {
        template_render_http_error(
            "infra::http::admin::push_toasts",
            "Template rendering failed",
            err,
        )
    })?;

    stream.push_patch(html, TOAST_STACK, ElementPatchMode::Replace);
    Ok(())
}

pub(super) fn datastar_replace(selector: &str, html: String) -> StreamBuilder {
    let mut stream = StreamBuilder::new();
    stream.push_patch(html, selector, ElementPatchMode::Replace);
    stream
}

/// Surface a failure through the toast stack while keeping the page as it is.
///
/// The response stays a 200 event stream so datastar applies the patch; the
/// error report rides along for `log_responses`.
pub(super) fn stream_error_toast(err: HttpError, text: impl Into<String>) -> Response {
    let mut stream = StreamBuilder::new();
    if let Err(render_err) = push_toasts(&mut stream, &[Toast::error(text)]) {
        return render_err.into_response();
    }
    let mut response = stream.into_response();
    err.into_report().attach(&mut response);
    response
}

pub(super) fn template_render_http_error(
    source: &'static str,
    message: &'static str,
    err: AskamaError,
) -> HttpError {
    HttpError::from(TemplateRenderError::new(source, message, err))
}
