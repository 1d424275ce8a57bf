//! PostgreSQL category repository implementation.

use crate::{traits::CategoryRepository, DatabasePool};
use async_trait::async_trait;
use fintrack_core::{
    CategoryId, CategoryInput, CategoryOutput, RepositoryError, RepositoryResult, RequestContext,
    UserId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL category repository implementation.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: Arc<DatabasePool>,
}

impl PgCategoryRepository {
    /// Creates a new PostgreSQL category repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a category.
#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    user_id: i64,
    name: String,
    spending_limit: i64,
    category_type: String,
    description: String,
}

impl From<CategoryRow> for CategoryOutput {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            user_id: UserId::new(row.user_id),
            name: row.name,
            limit: row.spending_limit,
            kind: row.category_type,
            description: row.description,
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        input: &CategoryInput,
    ) -> RepositoryResult<CategoryId> {
        debug!("Inserting category '{}' for user {}", input.name, owner);

        let id = ctx
            .run(
                sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO categories (user_id, name, spending_limit, category_type, description)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    "#,
                )
                .bind(owner.into_inner())
                .bind(&input.name)
                .bind(input.limit)
                .bind(&input.kind)
                .bind(&input.description)
                .fetch_one(self.pool.inner()),
            )
            .await??;

        Ok(CategoryId::new(id))
    }

    async fn get(&self, ctx: &RequestContext, id: CategoryId) -> RepositoryResult<CategoryOutput> {
        debug!("Finding category by id: {}", id);

        let row = ctx
            .run(
                sqlx::query_as::<_, CategoryRow>(
                    r#"
                    SELECT id, user_id, name, spending_limit, category_type, description
                    FROM categories
                    WHERE id = $1
                    "#,
                )
                .bind(id.into_inner())
                .fetch_optional(self.pool.inner()),
            )
            .await??;

        row.map(CategoryOutput::from).ok_or(RepositoryError::NotFound)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        input: &CategoryInput,
    ) -> RepositoryResult<CategoryOutput> {
        debug!("Updating category: {}", id);

        let row = ctx
            .run(
                sqlx::query_as::<_, CategoryRow>(
                    r#"
                    UPDATE categories
                    SET name = $2, spending_limit = $3, category_type = $4,
                        description = $5, updated_at = NOW()
                    WHERE id = $1
                    RETURNING id, user_id, name, spending_limit, category_type, description
                    "#,
                )
                .bind(id.into_inner())
                .bind(&input.name)
                .bind(input.limit)
                .bind(&input.kind)
                .bind(&input.description)
                .fetch_optional(self.pool.inner()),
            )
            .await??;

        row.map(CategoryOutput::from).ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, ctx: &RequestContext, id: CategoryId) -> RepositoryResult<()> {
        debug!("Deleting category: {}", id);

        let result = ctx
            .run(
                sqlx::query("DELETE FROM categories WHERE id = $1")
                    .bind(id.into_inner())
                    .execute(self.pool.inner()),
            )
            .await??;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_by_type(
        &self,
        ctx: &RequestContext,
        kind: &str,
    ) -> RepositoryResult<Vec<CategoryOutput>> {
        debug!("Finding categories by type: {}", kind);

        let rows = ctx
            .run(
                sqlx::query_as::<_, CategoryRow>(
                    r#"
                    SELECT id, user_id, name, spending_limit, category_type, description
                    FROM categories
                    WHERE category_type = $1
                    ORDER BY id
                    "#,
                )
                .bind(kind)
                .fetch_all(self.pool.inner()),
            )
            .await??;

        Ok(rows.into_iter().map(CategoryOutput::from).collect())
    }
}

impl std::fmt::Debug for PgCategoryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCategoryRepository").finish_non_exhaustive()
    }
}
