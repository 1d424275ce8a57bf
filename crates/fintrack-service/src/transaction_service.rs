//! Transaction service trait definition.

use async_trait::async_trait;
use fintrack_core::{
    CategoryId, FintrackResult, RequestContext, TransactionId, TransactionInput,
    TransactionOutput, UserId,
};

/// Transaction service trait.
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Books a transaction in `category` for `owner` and returns its id.
    ///
    /// Fails with `Limit` when `count` exceeds the category limit.
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        category: CategoryId,
        input: TransactionInput,
    ) -> FintrackResult<TransactionId>;

    /// Gets a transaction, from the cache when possible.
    async fn get(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
    ) -> FintrackResult<TransactionOutput>;

    /// Replaces a transaction's fields, re-checking the category limit.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
        input: TransactionInput,
    ) -> FintrackResult<TransactionOutput>;

    /// Deletes a transaction.
    async fn delete(&self, ctx: &RequestContext, id: TransactionId) -> FintrackResult<()>;

    /// Lists the transactions of a category. A non-positive id is `ValidateType`.
    async fn list_by_category(
        &self,
        ctx: &RequestContext,
        category: CategoryId,
    ) -> FintrackResult<Vec<TransactionOutput>>;
}
