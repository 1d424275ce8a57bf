//! Transaction service implementation.

use super::translate;
use crate::cache::{CacheSettings, HashCache, ObservedCache};
use crate::transaction_service::TransactionService;
use async_trait::async_trait;
use fintrack_core::{
    CategoryId, FintrackResult, RequestContext, ServiceError, TransactionId, TransactionInput,
    TransactionOutput, UserId, ValidateExt,
};
use fintrack_repository::TransactionRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Transaction service backed by a repository and a best-effort cache.
///
/// The category limit is enforced by the repository inside the same storage
/// transaction as the write.
pub struct TransactionServiceImpl {
    repository: Arc<dyn TransactionRepository>,
    cache: ObservedCache,
}

impl TransactionServiceImpl {
    /// Creates a new transaction service.
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        cache: Arc<dyn HashCache>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            repository,
            cache: ObservedCache::new(cache, settings),
        }
    }
}

#[async_trait]
impl TransactionService for TransactionServiceImpl {
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        category: CategoryId,
        input: TransactionInput,
    ) -> FintrackResult<TransactionId> {
        debug!(
            request_id = ctx.request_id(),
            user_id = %owner,
            category_id = %category,
            count = input.count,
            "Creating transaction"
        );

        input.validate_request()?;

        let id = self
            .repository
            .create(ctx, owner, category, &input)
            .await
            .map_err(|e| translate("transaction.create", ctx.request_id(), e))?;

        let output = TransactionOutput::from_input(id, owner, category, input);
        self.cache.store(ctx, id, &output).await;

        info!(request_id = ctx.request_id(), transaction_id = %id, category_id = %category, "Transaction created");
        Ok(id)
    }

    async fn get(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
    ) -> FintrackResult<TransactionOutput> {
        debug!(request_id = ctx.request_id(), transaction_id = %id, "Getting transaction");

        if let Some(cached) = self.cache.load::<TransactionOutput>(ctx, id).await {
            return Ok(cached);
        }

        let ticket = self.cache.begin_read();
        let output = self
            .repository
            .get(ctx, id)
            .await
            .map_err(|e| translate("transaction.get", ctx.request_id(), e))?;

        self.cache.fill(ctx, id, &output, ticket).await;

        Ok(output)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
        input: TransactionInput,
    ) -> FintrackResult<TransactionOutput> {
        debug!(request_id = ctx.request_id(), transaction_id = %id, "Updating transaction");

        input.validate_request()?;

        let output = self
            .repository
            .update(ctx, id, &input)
            .await
            .map_err(|e| translate("transaction.update", ctx.request_id(), e))?;

        self.cache.store(ctx, id, &output).await;

        info!(request_id = ctx.request_id(), transaction_id = %id, "Transaction updated");
        Ok(output)
    }

    async fn delete(&self, ctx: &RequestContext, id: TransactionId) -> FintrackResult<()> {
        debug!(request_id = ctx.request_id(), transaction_id = %id, "Deleting transaction");

        self.repository
            .delete(ctx, id)
            .await
            .map_err(|e| translate("transaction.delete", ctx.request_id(), e))?;

        self.cache.evict::<TransactionOutput>(ctx, id).await;

        info!(request_id = ctx.request_id(), transaction_id = %id, "Transaction deleted");
        Ok(())
    }

    async fn list_by_category(
        &self,
        ctx: &RequestContext,
        category: CategoryId,
    ) -> FintrackResult<Vec<TransactionOutput>> {
        debug!(request_id = ctx.request_id(), category_id = %category, "Listing transactions");

        if !category.is_valid() {
            return Err(ServiceError::ValidateType.into());
        }

        self.repository
            .find_by_category(ctx, category)
            .await
            .map_err(|e| translate("transaction.list_by_category", ctx.request_id(), e))
    }
}
