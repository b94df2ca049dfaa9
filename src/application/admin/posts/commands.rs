use metrics::counter;
use tracing::{info, warn};

use crate::application::repos::UpdatePostParams;
use crate::domain::entities::PostRecord;
use crate::domain::form::{FieldErrors, PostField, ValidatedPost};

use super::editor::PostEditor;
use super::service::{
    AdminPostEditService, METRIC_UPDATE_FAILED_TOTAL, METRIC_UPDATE_TOTAL,
    METRIC_VALIDATION_FAILED_TOTAL,
};
use super::types::AdminPostError;

const UNKNOWN_CATEGORY_MESSAGE: &str = "Category does not exist";

impl AdminPostEditService {
    /// Validate the editor and dispatch the update.
    ///
    /// Field errors are stored on the editor and nothing is dispatched. Store
    /// failures leave the editor in its unsaved state.
    pub async fn submit(&self, editor: &mut PostEditor) -> Result<PostRecord, AdminPostError> {
        let payload = match editor.begin_submit() {
            Ok(payload) => payload,
            Err(err) => {
                if matches!(err, AdminPostError::Validation(_)) {
                    counter!(METRIC_VALIDATION_FAILED_TOTAL).increment(1);
                }
                return Err(err);
            }
        };

        match self.category_exists(payload.category_id).await {
            Ok(true) => {}
            Ok(false) => {
                counter!(METRIC_VALIDATION_FAILED_TOTAL).increment(1);
                return Err(editor.reject(PostField::Category, UNKNOWN_CATEGORY_MESSAGE));
            }
            Err(err) => {
                editor.finish_submit(false)?;
                return Err(err);
            }
        }

        match self.dispatch(editor.post_id(), payload).await {
            Ok(post) => {
                editor.finish_submit(true)?;
                Ok(post)
            }
            Err(err) => {
                editor.finish_submit(false)?;
                Err(err)
            }
        }
    }

    /// Update a post from an already validated payload (JSON API path).
    pub async fn update_post(
        &self,
        id: i64,
        payload: ValidatedPost,
    ) -> Result<PostRecord, AdminPostError> {
        if self.reader.find_post(id).await?.is_none() {
            return Err(AdminPostError::NotFound(id));
        }
        if !self.category_exists(payload.category_id).await? {
            counter!(METRIC_VALIDATION_FAILED_TOTAL).increment(1);
            let mut errors = FieldErrors::new();
            errors.insert(PostField::Category, UNKNOWN_CATEGORY_MESSAGE);
            return Err(AdminPostError::Validation(errors));
        }
        self.dispatch(id, payload).await
    }

    async fn category_exists(&self, id: i64) -> Result<bool, AdminPostError> {
        let found = self.categories.find_categories(&[id]).await?;
        Ok(found.iter().any(|category| category.id == id))
    }

    async fn dispatch(&self, id: i64, payload: ValidatedPost) -> Result<PostRecord, AdminPostError> {
        let status = payload.status;
        let params = UpdatePostParams {
            id,
            title: payload.title,
            content: payload.content,
            status: payload.status,
            category_id: payload.category_id,
        };

        match self.writer.update_post(params).await {
            Ok(post) => {
                counter!(METRIC_UPDATE_TOTAL, "status" => status.as_str()).increment(1);
                info!(
                    target = "quire::admin::posts",
                    post_id = id,
                    status = status.as_str(),
                    "post updated"
                );
                Ok(post)
            }
            Err(err) => {
                counter!(METRIC_UPDATE_FAILED_TOTAL).increment(1);
                warn!(
                    target = "quire::admin::posts",
                    post_id = id,
                    error = %err,
                    "post update failed"
                );
                Err(AdminPostError::from(err))
            }
        }
    }
}
