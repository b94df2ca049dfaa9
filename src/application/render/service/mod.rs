mod config;

use std::sync::Arc;

use comrak::{Arena, format_html, parse_document};
use once_cell::sync::Lazy;

use crate::application::render::types::{PreviewHtml, PreviewRenderer, RenderError};

use config::{build_preview_sanitizer, default_options};

/// Comrak-based markdown preview with Ammonia sanitisation.
pub struct ComrakPreviewService {
    options: comrak::Options<'static>,
    sanitizer: ammonia::Builder<'static>,
}

impl ComrakPreviewService {
    fn new() -> Self {
        Self {
            options: default_options(),
            sanitizer: build_preview_sanitizer(),
        }
    }
}

static PREVIEW_SERVICE: Lazy<Arc<ComrakPreviewService>> =
    Lazy::new(|| Arc::new(ComrakPreviewService::new()));

/// Access the shared preview renderer, initialised on first use.
pub fn preview_service() -> Arc<ComrakPreviewService> {
    Arc::clone(&PREVIEW_SERVICE)
}

impl Default for ComrakPreviewService {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewRenderer for ComrakPreviewService {
    fn render_preview(&self, markdown: &str) -> Result<PreviewHtml, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        let mut html = String::new();
        format_html(root, &self.options, &mut html).map_err(|err| RenderError::Markdown {
            message: err.to_string(),
        })?;

        Ok(PreviewHtml::new(self.sanitizer.clean(&html).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = preview_service()
            .render_preview("# Title\n\nSome **bold** text")
            .expect("render");
        assert!(html.as_str().contains("<h1>Title</h1>"));
        assert!(html.as_str().contains("<strong>bold</strong>"));
    }

    #[test]
    fn strips_scripts_from_preview() {
        let html = preview_service()
            .render_preview("hello <script>alert(1)</script>")
            .expect("render");
        assert!(!html.as_str().contains("<script"));
    }

    #[test]
    fn tables_survive_sanitisation() {
        let html = preview_service()
            .render_preview("| a | b |\n|---|---|\n| 1 | 2 |")
            .expect("render");
        assert!(html.as_str().contains("<table>"));
        assert!(html.as_str().contains("<td>1</td>"));
    }
}
