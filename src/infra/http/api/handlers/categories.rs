use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;

use crate::application::pagination::Pagination;
use crate::application::repos::ListParams;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::*;
use crate::infra::http::api::state::ApiState;

use super::{pagination_to_api, post_to_api};

/// `fetchList("categories", { pagination })`
pub async fn list_categories(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let defaults = Pagination::default();
    let pagination = Pagination::new(
        query.current.unwrap_or(defaults.current),
        query.page_size.unwrap_or(defaults.page_size),
    )
    .map_err(pagination_to_api)?;

    let page = state
        .posts
        .list_categories(&ListParams::page(pagination))
        .await
        .map_err(post_to_api)?;

    Ok(Json(ListResponse {
        data: page.items.into_iter().map(Category::from).collect(),
        total: page.total,
    }))
}
