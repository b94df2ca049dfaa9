//! Posts handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::*;
use crate::infra::http::api::state::ApiState;

use super::post_to_api;

/// `fetchOne("posts", id)`
pub async fn get_post(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.load_post(id).await.map_err(post_to_api)?;

    match post {
        Some(post) => Ok(Json(DataResponse {
            data: Post::from(post),
        })),
        None => Err(ApiError::not_found("post not found")),
    }
}

/// `update("posts", id, payload)`
pub async fn update_post(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<PostUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let validated = update_request_form(&payload)
        .validate()
        .map_err(|errors| ApiError::validation(&errors))?;

    let post = state
        .posts
        .update_post(id, validated)
        .await
        .map_err(post_to_api)?;

    Ok(Json(DataResponse {
        data: Post::from(post),
    }))
}
