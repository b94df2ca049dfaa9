mod categories;
mod posts;

pub use categories::list_categories;
pub use posts::{get_post, update_post};

use axum::http::StatusCode;

use crate::application::admin::posts::AdminPostError;
use crate::application::pagination::PaginationError;
use crate::application::repos::RepoError;

use super::error::{ApiError, codes};

pub(crate) fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::Pagination(p) => pagination_to_api(p),
        RepoError::NotFound => ApiError::not_found("resource not found"),
        RepoError::InvalidInput { message } => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid input",
            Some(message),
        ),
        RepoError::Integrity { message } => ApiError::new(
            StatusCode::CONFLICT,
            codes::INTEGRITY,
            "Integrity constraint violated",
            Some(message),
        ),
        RepoError::Timeout => ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            codes::DB_TIMEOUT,
            "Database timeout",
            None,
        ),
        RepoError::Persistence(msg) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "Persistence error",
            Some(msg),
        ),
    }
}

pub(crate) fn pagination_to_api(err: PaginationError) -> ApiError {
    ApiError::new(
        StatusCode::BAD_REQUEST,
        codes::INVALID_PAGE,
        "Invalid page",
        Some(err.to_string()),
    )
}

pub(crate) fn post_to_api(err: AdminPostError) -> ApiError {
    match err {
        AdminPostError::NotFound(_) => ApiError::not_found("post not found"),
        AdminPostError::Validation(errors) => ApiError::validation(&errors),
        AdminPostError::Domain(domain) => {
            ApiError::bad_request("Invalid post", Some(domain.to_string()))
        }
        AdminPostError::Repo(repo) => repo_to_api(repo),
    }
}
