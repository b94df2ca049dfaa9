//! In-process repositories used when no database is configured and as a test
//! double for the HTTP surface.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::warn;

use crate::application::pagination::ListPage;
use crate::application::repos::{
    CategoriesRepo, ListParams, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::{CategoryRecord, PostRecord};
use crate::domain::types::PostStatus;

const SOURCE: &str = "infra::memory";

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, PostRecord>,
    categories: BTreeMap<i64, CategoryRecord>,
}

#[derive(Default)]
pub struct InMemoryRepositories {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
}

impl InMemoryRepositories {
    pub fn with_records(posts: Vec<PostRecord>, categories: Vec<CategoryRecord>) -> Self {
        let tables = Tables {
            posts: posts.into_iter().map(|post| (post.id, post)).collect(),
            categories: categories
                .into_iter()
                .map(|category| (category.id, category))
                .collect(),
        };
        Self {
            tables: RwLock::new(tables),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Demo content served when the binary runs without a database.
    pub fn seeded() -> Self {
        let now = OffsetDateTime::now_utc();
        let categories = vec![
            CategoryRecord {
                id: 1,
                title: "Tech".to_string(),
            },
            CategoryRecord {
                id: 2,
                title: "Life".to_string(),
            },
            CategoryRecord {
                id: 3,
                title: "Travel".to_string(),
            },
        ];
        let posts = vec![
            PostRecord {
                id: 1,
                title: "Hello, Quire".to_string(),
                content: "# Hello\n\nThis post is served from the in-memory store.".to_string(),
                status: PostStatus::Published,
                category_id: 1,
                created_at: now,
                updated_at: now,
            },
            PostRecord {
                id: 2,
                title: "Weekend notes".to_string(),
                content: "Some *draft* thoughts.\n\n- coffee\n- books".to_string(),
                status: PostStatus::Draft,
                category_id: 2,
                created_at: now,
                updated_at: now,
            },
        ];
        Self::with_records(posts, categories)
    }

    /// Make every subsequent update fail with a persistence error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn post(&self, id: i64) -> Option<PostRecord> {
        self.read("post").posts.get(&id).cloned()
    }

    fn read(&self, op: &'static str) -> RwLockReadGuard<'_, Tables> {
        match self.tables.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    target = "quire::infra::memory",
                    op,
                    source = SOURCE,
                    lock_kind = "rwlock.read",
                    "recovered from poisoned store lock"
                );
                poisoned.into_inner()
            }
        }
    }

    fn write(&self, op: &'static str) -> RwLockWriteGuard<'_, Tables> {
        match self.tables.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    target = "quire::infra::memory",
                    op,
                    source = SOURCE,
                    lock_kind = "rwlock.write",
                    "recovered from poisoned store lock"
                );
                poisoned.into_inner()
            }
        }
    }
}

#[async_trait]
impl PostsRepo for InMemoryRepositories {
    async fn find_post(&self, id: i64) -> Result<Option<PostRecord>, RepoError> {
        Ok(self.read("find_post").posts.get(&id).cloned())
    }
}

#[async_trait]
impl PostsWriteRepo for InMemoryRepositories {
    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("store unavailable"));
        }

        let mut tables = self.write("update_post");
        if !tables.categories.contains_key(&params.category_id) {
            return Err(RepoError::InvalidInput {
                message: format!("category `{}` does not exist", params.category_id),
            });
        }
        let post = tables.posts.get_mut(&params.id).ok_or(RepoError::NotFound)?;
        post.title = params.title;
        post.content = params.content;
        post.status = params.status;
        post.category_id = params.category_id;
        post.updated_at = OffsetDateTime::now_utc();
        Ok(post.clone())
    }
}

#[async_trait]
impl CategoriesRepo for InMemoryRepositories {
    async fn list_categories(
        &self,
        params: &ListParams,
    ) -> Result<ListPage<CategoryRecord>, RepoError> {
        let tables = self.read("list_categories");
        let needle = params
            .search
            .as_deref()
            .map(|term| term.trim().to_lowercase());
        let matching: Vec<&CategoryRecord> = tables
            .categories
            .values()
            .filter(|category| match needle.as_deref() {
                Some(needle) => category.title.to_lowercase().contains(needle),
                None => true,
            })
            .collect();

        let total = matching.len() as u64;
        let offset = usize::try_from(params.pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(params.pagination.limit()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(ListPage::new(items, total))
    }

    async fn find_categories(&self, ids: &[i64]) -> Result<Vec<CategoryRecord>, RepoError> {
        let tables = self.read("find_categories");
        Ok(ids
            .iter()
            .filter_map(|id| tables.categories.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pagination::Pagination;

    #[tokio::test]
    async fn categories_page_by_offset() {
        let repos = InMemoryRepositories::seeded();
        let params = ListParams::page(Pagination::new(2, 2).expect("pagination"));
        let page = repos.list_categories(&params).await.expect("list");
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Travel");
    }

    #[tokio::test]
    async fn failing_writes_leave_records_untouched() {
        let repos = InMemoryRepositories::seeded();
        repos.set_fail_writes(true);
        let result = repos
            .update_post(UpdatePostParams {
                id: 1,
                title: "Changed".into(),
                content: "body".into(),
                status: PostStatus::Draft,
                category_id: 1,
            })
            .await;
        assert!(matches!(result, Err(RepoError::Persistence(_))));
        assert_eq!(repos.post(1).map(|post| post.title).as_deref(), Some("Hello, Quire"));
    }
}
