//! PostgreSQL transaction repository implementation.
//!
//! Creating or re-pricing a transaction reads the category limit with
//! `FOR SHARE` inside the same database transaction as the write. A
//! concurrent change to the category's limit waits for the lock, so the
//! comparison always runs against the limit that is in force at commit.

use crate::{traits::TransactionRepository, DatabasePool};
use async_trait::async_trait;
use fintrack_core::{
    CategoryId, RepositoryError, RepositoryResult, RequestContext, TransactionId,
    TransactionInput, TransactionOutput, UserId,
};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL transaction repository implementation.
#[derive(Clone)]
pub struct PgTransactionRepository {
    pool: Arc<DatabasePool>,
}

impl PgTransactionRepository {
    /// Creates a new PostgreSQL transaction repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a transaction.
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: i64,
    user_id: i64,
    category_id: i64,
    name: String,
    count: i64,
    description: String,
}

impl From<TransactionRow> for TransactionOutput {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: TransactionId::new(row.id),
            user_id: UserId::new(row.user_id),
            category_id: CategoryId::new(row.category_id),
            name: row.name,
            count: row.count,
            description: row.description,
        }
    }
}

fn check_limit(count: i64, limit: i64) -> RepositoryResult<()> {
    if count > limit {
        debug!("Transaction count {} exceeds category limit {}", count, limit);
        return Err(RepositoryError::LimitExceeded);
    }
    Ok(())
}

async fn insert_within_limit(
    pool: &PgPool,
    owner: UserId,
    category: CategoryId,
    input: &TransactionInput,
) -> RepositoryResult<i64> {
    let mut tx = pool.begin().await?;

    let limit = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT spending_limit
        FROM categories
        WHERE id = $1 AND user_id = $2
        FOR SHARE
        "#,
    )
    .bind(category.into_inner())
    .bind(owner.into_inner())
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(RepositoryError::NotFound)?;

    // Returning early drops `tx`, which rolls it back.
    check_limit(input.count, limit)?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO transactions (user_id, category_id, name, count, description)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(owner.into_inner())
    .bind(category.into_inner())
    .bind(&input.name)
    .bind(input.count)
    .bind(&input.description)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(id)
}

async fn update_within_limit(
    pool: &PgPool,
    id: TransactionId,
    input: &TransactionInput,
) -> RepositoryResult<TransactionRow> {
    let mut tx = pool.begin().await?;

    let limit = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT c.spending_limit
        FROM transactions t
        JOIN categories c ON c.id = t.category_id
        WHERE t.id = $1
        FOR SHARE OF c
        "#,
    )
    .bind(id.into_inner())
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(RepositoryError::NotFound)?;

    check_limit(input.count, limit)?;

    let row = sqlx::query_as::<_, TransactionRow>(
        r#"
        UPDATE transactions
        SET name = $2, count = $3, description = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING id, user_id, category_id, name, count, description
        "#,
    )
    .bind(id.into_inner())
    .bind(&input.name)
    .bind(input.count)
    .bind(&input.description)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        category: CategoryId,
        input: &TransactionInput,
    ) -> RepositoryResult<TransactionId> {
        debug!(
            "Inserting transaction '{}' into category {} for user {}",
            input.name, category, owner
        );

        let id = ctx
            .run(insert_within_limit(self.pool.inner(), owner, category, input))
            .await??;

        Ok(TransactionId::new(id))
    }

    async fn get(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
    ) -> RepositoryResult<TransactionOutput> {
        debug!("Finding transaction by id: {}", id);

        let row = ctx
            .run(
                sqlx::query_as::<_, TransactionRow>(
                    r#"
                    SELECT id, user_id, category_id, name, count, description
                    FROM transactions
                    WHERE id = $1
                    "#,
                )
                .bind(id.into_inner())
                .fetch_optional(self.pool.inner()),
            )
            .await??;

        row.map(TransactionOutput::from)
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
        input: &TransactionInput,
    ) -> RepositoryResult<TransactionOutput> {
        debug!("Updating transaction: {}", id);

        let row = ctx
            .run(update_within_limit(self.pool.inner(), id, input))
            .await??;

        Ok(row.into())
    }

    async fn delete(&self, ctx: &RequestContext, id: TransactionId) -> RepositoryResult<()> {
        debug!("Deleting transaction: {}", id);

        let result = ctx
            .run(
                sqlx::query("DELETE FROM transactions WHERE id = $1")
                    .bind(id.into_inner())
                    .execute(self.pool.inner()),
            )
            .await??;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_by_category(
        &self,
        ctx: &RequestContext,
        category: CategoryId,
    ) -> RepositoryResult<Vec<TransactionOutput>> {
        debug!("Finding transactions by category: {}", category);

        let rows = ctx
            .run(
                sqlx::query_as::<_, TransactionRow>(
                    r#"
                    SELECT id, user_id, category_id, name, count, description
                    FROM transactions
                    WHERE category_id = $1
                    ORDER BY id
                    "#,
                )
                .bind(category.into_inner())
                .fetch_all(self.pool.inner()),
            )
            .await??;

        Ok(rows.into_iter().map(TransactionOutput::from).collect())
    }
}

impl std::fmt::Debug for PgTransactionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTransactionRepository").finish_non_exhaustive()
    }
}
