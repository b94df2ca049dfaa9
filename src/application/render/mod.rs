//! Markdown preview rendering for the content editor.

mod service;
mod types;

pub use service::{ComrakPreviewService, preview_service};
pub use types::{PreviewHtml, PreviewRenderer, RenderError};
