//! Category service trait definition.

use async_trait::async_trait;
use fintrack_core::{
    CategoryId, CategoryInput, CategoryOutput, FintrackResult, RequestContext, UserId,
};

/// Category service trait.
///
/// Errors are either `FintrackError::Validation` (raised before any I/O) or
/// `FintrackError::Service` carrying one of the five service error kinds.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Creates a category for `owner` and returns its id.
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        input: CategoryInput,
    ) -> FintrackResult<CategoryId>;

    /// Gets a category, from the cache when possible.
    async fn get(&self, ctx: &RequestContext, id: CategoryId) -> FintrackResult<CategoryOutput>;

    /// Replaces a category's fields.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        input: CategoryInput,
    ) -> FintrackResult<CategoryOutput>;

    /// Deletes a category together with its transactions.
    async fn delete(&self, ctx: &RequestContext, id: CategoryId) -> FintrackResult<()>;

    /// Lists categories of the given type. A blank type is `ValidateType`.
    async fn find_by_type(
        &self,
        ctx: &RequestContext,
        kind: &str,
    ) -> FintrackResult<Vec<CategoryOutput>>;
}
