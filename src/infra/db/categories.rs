use async_trait::async_trait;

use crate::{
    application::{
        pagination::ListPage,
        repos::{CategoriesRepo, ListParams, RepoError},
    },
    domain::entities::CategoryRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    title: String,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
        }
    }
}

#[async_trait]
impl CategoriesRepo for PostgresRepositories {
    async fn list_categories(
        &self,
        params: &ListParams,
    ) -> Result<ListPage<CategoryRecord>, RepoError> {
        let search = params
            .search
            .as_deref()
            .map(|term| format!("%{}%", term.trim()));
        let limit = i64::try_from(params.pagination.limit())
            .map_err(|_| RepoError::from_persistence("page size exceeds supported range"))?;
        let offset = i64::try_from(params.pagination.offset())
            .map_err(|_| RepoError::from_persistence("page offset exceeds supported range"))?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM categories
            WHERE ($1::text IS NULL OR title ILIKE $1)
            "#,
        )
        .bind(search.as_deref())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, title
            FROM categories
            WHERE ($1::text IS NULL OR title ILIKE $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(ListPage::new(
            rows.into_iter().map(CategoryRecord::from).collect(),
            Self::convert_count(total)?,
        ))
    }

    async fn find_categories(&self, ids: &[i64]) -> Result<Vec<CategoryRecord>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, title
            FROM categories
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }
}
