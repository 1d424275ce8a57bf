//! Category service implementation.

use super::translate;
use crate::cache::{CacheSettings, HashCache, ObservedCache};
use crate::category_service::CategoryService;
use async_trait::async_trait;
use fintrack_core::{
    CategoryId, CategoryInput, CategoryOutput, FintrackResult, RequestContext, ServiceError,
    rules, UserId, ValidateExt,
};
use fintrack_repository::CategoryRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Category service backed by a repository and a best-effort cache.
pub struct CategoryServiceImpl {
    repository: Arc<dyn CategoryRepository>,
    cache: ObservedCache,
}

impl CategoryServiceImpl {
    /// Creates a new category service.
    pub fn new(
        repository: Arc<dyn CategoryRepository>,
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
impl CategoryService for CategoryServiceImpl {
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        input: CategoryInput,
    ) -> FintrackResult<CategoryId> {
        debug!(request_id = ctx.request_id(), user_id = %owner, name = %input.name, "Creating category");

        input.validate_request()?;

        let id = self
            .repository
            .create(ctx, owner, &input)
            .await
            .map_err(|e| translate("category.create", ctx.request_id(), e))?;

        let output = CategoryOutput::from_input(id, owner, input);
        self.cache.store(ctx, id, &output).await;

        info!(request_id = ctx.request_id(), category_id = %id, user_id = %owner, "Category created");
        Ok(id)
    }

    async fn get(&self, ctx: &RequestContext, id: CategoryId) -> FintrackResult<CategoryOutput> {
        debug!(request_id = ctx.request_id(), category_id = %id, "Getting category");

        if let Some(cached) = self.cache.load::<CategoryOutput>(ctx, id).await {
            return Ok(cached);
        }

        let ticket = self.cache.begin_read();
        let output = self
            .repository
            .get(ctx, id)
            .await
            .map_err(|e| translate("category.get", ctx.request_id(), e))?;

        self.cache.fill(ctx, id, &output, ticket).await;

        Ok(output)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        input: CategoryInput,
    ) -> FintrackResult<CategoryOutput> {
        debug!(request_id = ctx.request_id(), category_id = %id, "Updating category");

        input.validate_request()?;

        let output = self
            .repository
            .update(ctx, id, &input)
            .await
            .map_err(|e| translate("category.update", ctx.request_id(), e))?;

        self.cache.store(ctx, id, &output).await;

        info!(request_id = ctx.request_id(), category_id = %id, "Category updated");
        Ok(output)
    }

    async fn delete(&self, ctx: &RequestContext, id: CategoryId) -> FintrackResult<()> {
        debug!(request_id = ctx.request_id(), category_id = %id, "Deleting category");

        self.repository
            .delete(ctx, id)
            .await
            .map_err(|e| translate("category.delete", ctx.request_id(), e))?;

        self.cache.evict::<CategoryOutput>(ctx, id).await;

        info!(request_id = ctx.request_id(), category_id = %id, "Category deleted");
        Ok(())
    }

    async fn find_by_type(
        &self,
        ctx: &RequestContext,
        kind: &str,
    ) -> FintrackResult<Vec<CategoryOutput>> {
        debug!(request_id = ctx.request_id(), kind, "Finding categories by type");

        rules::not_blank(kind).map_err(|_| ServiceError::ValidateType)?;

        self.repository
            .find_by_type(ctx, kind)
            .await
            .map_err(|e| translate("category.find_by_type", ctx.request_id(), e))
    }
}
