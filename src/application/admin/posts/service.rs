use std::sync::Arc;

use crate::application::repos::{CategoriesRepo, PostsRepo, PostsWriteRepo};

pub const METRIC_EDITOR_LOAD_MS: &str = "quire_post_editor_load_ms";
pub const METRIC_UPDATE_TOTAL: &str = "quire_post_update_total";
pub const METRIC_UPDATE_FAILED_TOTAL: &str = "quire_post_update_failed_total";
pub const METRIC_VALIDATION_FAILED_TOTAL: &str = "quire_post_validation_failed_total";

/// Editor settings resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PostEditOptions {
    pub warn_when_unsaved_changes: bool,
    pub category_page_size: u32,
}

impl Default for PostEditOptions {
    fn default() -> Self {
        Self {
            warn_when_unsaved_changes: true,
            category_page_size: 50,
        }
    }
}

#[derive(Clone)]
pub struct AdminPostEditService {
    pub(crate) reader: Arc<dyn PostsRepo>,
    pub(crate) writer: Arc<dyn PostsWriteRepo>,
    pub(crate) categories: Arc<dyn CategoriesRepo>,
    pub(crate) options: PostEditOptions,
}

impl AdminPostEditService {
    pub fn new(
        reader: Arc<dyn PostsRepo>,
        writer: Arc<dyn PostsWriteRepo>,
        categories: Arc<dyn CategoriesRepo>,
        options: PostEditOptions,
    ) -> Self {
        Self {
            reader,
            writer,
            categories,
            options,
        }
    }

    pub fn options(&self) -> PostEditOptions {
        self.options
    }
}
