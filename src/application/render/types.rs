use thiserror::Error;

/// Structured errors surfaced while producing a markdown preview.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("markdown parsing failed: {message}")]
    Markdown { message: String },
}

/// Sanitised HTML produced from editor markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHtml(String);

impl PreviewHtml {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Implementations must be pure: the same markdown always yields the same HTML.
pub trait PreviewRenderer: Send + Sync {
    fn render_preview(&self, markdown: &str) -> Result<PreviewHtml, RenderError>;
}
