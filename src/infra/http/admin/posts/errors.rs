use axum::http::StatusCode;

use crate::application::{
    admin::posts::AdminPostError, error::HttpError, render::RenderError, repos::RepoError,
};

pub(super) fn admin_post_error(source: &'static str, err: AdminPostError) -> HttpError {
    match err {
        AdminPostError::NotFound(id) => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Post not found",
            format!("Post `{id}` could not be found"),
        ),
        AdminPostError::Validation(errors) => HttpError::new(
            source,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Post could not be validated",
            errors.to_string(),
        ),
        AdminPostError::Domain(domain) => HttpError::from_error(
            source,
            StatusCode::BAD_REQUEST,
            "Post request could not be processed",
            &domain,
        ),
        AdminPostError::Repo(RepoError::NotFound) => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Post not found",
            "record disappeared before the update was applied",
        ),
        AdminPostError::Repo(repo @ RepoError::Timeout) => HttpError::from_error(
            source,
            StatusCode::SERVICE_UNAVAILABLE,
            "Database timeout",
            &repo,
        ),
        AdminPostError::Repo(repo) => HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &repo,
        ),
    }
}

pub(super) fn preview_error(source: &'static str, err: RenderError) -> HttpError {
    HttpError::from_error(
        source,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Preview could not be rendered",
        &err,
    )
}
