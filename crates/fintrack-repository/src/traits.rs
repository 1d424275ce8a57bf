//! Repository trait definitions.
//!
//! Every method takes the caller's [`RequestContext`] so implementations can
//! bound their work by the request deadline.

use async_trait::async_trait;
use fintrack_core::{
    CategoryId, CategoryInput, CategoryOutput, RepositoryResult, RequestContext, TransactionId,
    TransactionInput, TransactionOutput, UserId,
};

/// Category repository trait.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Creates a category owned by `owner`.
    ///
    /// Fails with `NotFound` if the owner does not exist and `Duplicated` if
    /// the owner already has a category with this name.
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        input: &CategoryInput,
    ) -> RepositoryResult<CategoryId>;

    /// Finds a category by ID.
    async fn get(&self, ctx: &RequestContext, id: CategoryId) -> RepositoryResult<CategoryOutput>;

    /// Replaces the mutable fields of a category.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        input: &CategoryInput,
    ) -> RepositoryResult<CategoryOutput>;

    /// Deletes a category and, by cascade, its transactions.
    async fn delete(&self, ctx: &RequestContext, id: CategoryId) -> RepositoryResult<()>;

    /// Lists categories whose type equals `kind`. No match is an empty list.
    async fn find_by_type(
        &self,
        ctx: &RequestContext,
        kind: &str,
    ) -> RepositoryResult<Vec<CategoryOutput>>;
}

/// Transaction repository trait.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Creates a transaction in `category` owned by `owner`.
    ///
    /// The limit check and the insert are one atomic unit: on
    /// `LimitExceeded` no row is written.
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        category: CategoryId,
        input: &TransactionInput,
    ) -> RepositoryResult<TransactionId>;

    /// Finds a transaction by ID.
    async fn get(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
    ) -> RepositoryResult<TransactionOutput>;

    /// Replaces the mutable fields of a transaction, re-checking the limit.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
        input: &TransactionInput,
    ) -> RepositoryResult<TransactionOutput>;

    /// Deletes a transaction.
    async fn delete(&self, ctx: &RequestContext, id: TransactionId) -> RepositoryResult<()>;

    /// Lists the transactions of a category, oldest first.
    async fn find_by_category(
        &self,
        ctx: &RequestContext,
        category: CategoryId,
    ) -> RepositoryResult<Vec<TransactionOutput>>;
}
