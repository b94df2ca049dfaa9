use std::time::Instant;

use metrics::histogram;
use tokio::try_join;
use tracing::debug;

use crate::application::pagination::{ListPage, Pagination};
use crate::application::repos::{ListParams, RepoError};
use crate::domain::entities::{CategoryRecord, PostRecord};

use super::editor::PostEditor;
use super::service::{AdminPostEditService, METRIC_EDITOR_LOAD_MS};
use super::types::{AdminPostError, LoadedEditor};

impl AdminPostEditService {
    /// Fetch the post and the full category list concurrently, then seed an
    /// editor from the post.
    pub async fn load_editor(&self, id: i64) -> Result<LoadedEditor, AdminPostError> {
        let started_at = Instant::now();
        let (post, categories) = try_join!(self.load_post(id), self.all_categories())?;
        let post = post.ok_or(AdminPostError::NotFound(id))?;

        let mut editor = PostEditor::loading(id, self.options.warn_when_unsaved_changes);
        editor.seed(&post)?;

        histogram!(METRIC_EDITOR_LOAD_MS).record(started_at.elapsed().as_secs_f64() * 1000.0);
        debug!(
            target = "quire::admin::posts",
            post_id = id,
            categories = categories.len(),
            "editor loaded"
        );

        Ok(LoadedEditor {
            editor,
            post,
            categories,
        })
    }

    pub async fn load_post(&self, id: i64) -> Result<Option<PostRecord>, AdminPostError> {
        self.reader.find_post(id).await.map_err(AdminPostError::from)
    }

    pub async fn list_categories(
        &self,
        params: &ListParams,
    ) -> Result<ListPage<CategoryRecord>, AdminPostError> {
        self.categories
            .list_categories(params)
            .await
            .map_err(AdminPostError::from)
    }

    /// Walk category pages until the reported total is covered.
    pub async fn all_categories(&self) -> Result<Vec<CategoryRecord>, AdminPostError> {
        let mut pagination =
            Pagination::first(self.options.category_page_size).map_err(RepoError::from)?;
        let mut collected = Vec::new();

        loop {
            let page = self
                .categories
                .list_categories(&ListParams::page(pagination))
                .await?;
            let fetched = page.items.len();
            collected.extend(page.items);

            if fetched == 0 || collected.len() as u64 >= page.total {
                break;
            }
            pagination = pagination.next();
        }

        Ok(collected)
    }
}
