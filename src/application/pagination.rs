//! Offset pagination shared by list endpoints and repository adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_PAGE_SIZE: u32 = 200;

/// One-based page selection, mirroring `?current=&page_size=` query params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current: u32,
    pub page_size: u32,
}

impl Pagination {
    pub fn new(current: u32, page_size: u32) -> Result<Self, PaginationError> {
        if current == 0 {
            return Err(PaginationError::InvalidPage(current));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(PaginationError::InvalidPageSize(page_size));
        }
        Ok(Self { current, page_size })
    }

    pub fn first(page_size: u32) -> Result<Self, PaginationError> {
        Self::new(1, page_size)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.current - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    pub fn next(&self) -> Self {
        Self {
            current: self.current.saturating_add(1),
            page_size: self.page_size,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: 10,
        }
    }
}

/// A page of results plus the total number of matching records.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be at least 1, got {0}")]
    InvalidPage(u32),
    #[error("page size must be between 1 and {MAX_PAGE_SIZE}, got {0}")]
    InvalidPageSize(u32),
}
