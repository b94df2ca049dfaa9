//! Conversions between stored records and the wire types clients see.

pub use quire_api_types::{
    Category, CategoryRef, DataResponse, ListResponse, Post, PostUpdateRequest,
};
use serde::Deserialize;

use crate::domain::entities::{CategoryRecord, PostRecord};
use crate::domain::form::{FormState, PostField};

/// `fetchList` options accepted by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub current: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        Post {
            id: record.id,
            title: record.title,
            content: record.content,
            status: record.status,
            category: CategoryRef {
                id: record.category_id,
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Category {
            id: record.id,
            title: record.title,
        }
    }
}

/// Run an update request through the same field rules the editor form uses.
pub fn update_request_form(request: &PostUpdateRequest) -> FormState {
    FormState::from_values(
        [
            (PostField::Title, request.title.clone()),
            (
                PostField::Category,
                request
                    .category
                    .map(|category| category.id.to_string())
                    .unwrap_or_default(),
            ),
            (
                PostField::Status,
                request.status.clone().unwrap_or_default(),
            ),
            (PostField::Content, request.content.clone()),
        ],
        true,
    )
}
