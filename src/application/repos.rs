//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::pagination::{ListPage, Pagination, PaginationError};
use crate::domain::entities::{CategoryRecord, PostRecord};
use crate::domain::types::PostStatus;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Options accepted by list fetches (`fetchList(resource, options)`).
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub pagination: Pagination,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page(pagination: Pagination) -> Self {
        Self {
            pagination,
            search: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePostParams {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub category_id: i64,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    async fn find_post(&self, id: i64) -> Result<Option<PostRecord>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError>;
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    async fn list_categories(
        &self,
        params: &ListParams,
    ) -> Result<ListPage<CategoryRecord>, RepoError>;

    async fn find_categories(&self, ids: &[i64]) -> Result<Vec<CategoryRecord>, RepoError>;
}
