//! Wire types exchanged by the Quire resource API.
//!
//! The admin editor and the JSON endpoints both speak in these shapes, so the
//! field names here are the ones clients see (`category.id`, lowercase status
//! values, `{ data, total }` list envelopes).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "post_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
    Rejected,
}

impl PostStatus {
    /// Every selectable status, in the order editors present them.
    pub const ALL: [PostStatus; 3] = [
        PostStatus::Published,
        PostStatus::Draft,
        PostStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Draft => "draft",
            PostStatus::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PostStatus::Published => "Published",
            PostStatus::Draft => "Draft",
            PostStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`PostStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPostStatus(pub String);

impl fmt::Display for UnknownPostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown post status `{}`", self.0)
    }
}

impl std::error::Error for UnknownPostStatus {}

impl FromStr for PostStatus {
    type Err = UnknownPostStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "published" => Ok(PostStatus::Published),
            "draft" => Ok(PostStatus::Draft),
            "rejected" => Ok(PostStatus::Rejected),
            other => Err(UnknownPostStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub category: CategoryRef,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Body of `PATCH /api/posts/{id}`.
///
/// Every field may be absent and `status` is kept as the raw string, so the
/// server reports missing or unknown values through its field rules instead
/// of rejecting the body outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdateRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub status: Option<String>,
    pub category: Option<CategoryRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}
