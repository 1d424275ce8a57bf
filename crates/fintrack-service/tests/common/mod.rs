//! Shared fakes for service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use fintrack_core::{
    CategoryId, CategoryInput, CategoryOutput, RepositoryError, RepositoryResult,
    RequestContext, TransactionId, TransactionInput, TransactionOutput, UserId,
};
use fintrack_repository::{CategoryRepository, TransactionRepository};
use fintrack_service::{CacheError, CacheFields, CacheResult, HashCache};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// In-memory storage shared by both fake repositories.
#[derive(Default)]
pub struct Store {
    next_id: i64,
    categories: BTreeMap<CategoryId, CategoryOutput>,
    transactions: BTreeMap<TransactionId, TransactionOutput>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Calls observed by the fake repositories.
#[derive(Default)]
pub struct Calls {
    pub category_get: AtomicUsize,
    pub transaction_get: AtomicUsize,
    pub transaction_create: AtomicUsize,
}

impl Calls {
    pub fn category_gets(&self) -> usize {
        self.category_get.load(Ordering::SeqCst)
    }

    pub fn transaction_gets(&self) -> usize {
        self.transaction_get.load(Ordering::SeqCst)
    }
}

/// Fake repositories over one shared store, enforcing the same rules as
/// the PostgreSQL implementation.
///
/// Every call first waits `latency` under the request deadline, the way a
/// database round trip would.
#[derive(Clone, Default)]
pub struct FakeRepository {
    store: Arc<Mutex<Store>>,
    latency: Duration,
    pub calls: Arc<Calls>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn round_trip(&self, ctx: &RequestContext) -> RepositoryResult<()> {
        ctx.run(tokio::time::sleep(self.latency)).await?;
        Ok(())
    }

    pub fn transaction_rows(&self) -> usize {
        self.store.lock().unwrap().transactions.len()
    }
}

#[async_trait]
impl CategoryRepository for FakeRepository {
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        input: &CategoryInput,
    ) -> RepositoryResult<CategoryId> {
        self.round_trip(ctx).await?;
        let mut store = self.store.lock().unwrap();
        if store
            .categories
            .values()
            .any(|c| c.user_id == owner && c.name == input.name)
        {
            return Err(RepositoryError::Duplicated);
        }
        let id = CategoryId::new(store.next_id());
        store
            .categories
            .insert(id, CategoryOutput::from_input(id, owner, input.clone()));
        Ok(id)
    }

    async fn get(&self, ctx: &RequestContext, id: CategoryId) -> RepositoryResult<CategoryOutput> {
        self.round_trip(ctx).await?;
        self.calls.category_get.fetch_add(1, Ordering::SeqCst);
        self.store
            .lock()
            .unwrap()
            .categories
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        input: &CategoryInput,
    ) -> RepositoryResult<CategoryOutput> {
        self.round_trip(ctx).await?;
        let mut store = self.store.lock().unwrap();
        let existing = store.categories.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        *existing = CategoryOutput::from_input(id, existing.user_id, input.clone());
        Ok(existing.clone())
    }

    async fn delete(&self, ctx: &RequestContext, id: CategoryId) -> RepositoryResult<()> {
        self.round_trip(ctx).await?;
        let mut store = self.store.lock().unwrap();
        store.categories.remove(&id).ok_or(RepositoryError::NotFound)?;
        store.transactions.retain(|_, t| t.category_id != id);
        Ok(())
    }

    async fn find_by_type(
        &self,
        ctx: &RequestContext,
        kind: &str,
    ) -> RepositoryResult<Vec<CategoryOutput>> {
        self.round_trip(ctx).await?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .categories
            .values()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransactionRepository for FakeRepository {
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        category: CategoryId,
        input: &TransactionInput,
    ) -> RepositoryResult<TransactionId> {
        self.round_trip(ctx).await?;
        self.calls.transaction_create.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().unwrap();
        let limit = store
            .categories
            .get(&category)
            .filter(|c| c.user_id == owner)
            .map(|c| c.limit)
            .ok_or(RepositoryError::NotFound)?;
        if input.count > limit {
            return Err(RepositoryError::LimitExceeded);
        }
        let id = TransactionId::new(store.next_id());
        store.transactions.insert(
            id,
            TransactionOutput::from_input(id, owner, category, input.clone()),
        );
        Ok(id)
    }

    async fn get(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
    ) -> RepositoryResult<TransactionOutput> {
        self.round_trip(ctx).await?;
        self.calls.transaction_get.fetch_add(1, Ordering::SeqCst);
        self.store
            .lock()
            .unwrap()
            .transactions
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
        input: &TransactionInput,
    ) -> RepositoryResult<TransactionOutput> {
        self.round_trip(ctx).await?;
        let mut store = self.store.lock().unwrap();
        let existing = store
            .transactions
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;
        let limit = store
            .categories
            .get(&existing.category_id)
            .map(|c| c.limit)
            .ok_or(RepositoryError::NotFound)?;
        if input.count > limit {
            return Err(RepositoryError::LimitExceeded);
        }
        let updated = TransactionOutput::from_input(
            id,
            existing.user_id,
            existing.category_id,
            input.clone(),
        );
        store.transactions.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, ctx: &RequestContext, id: TransactionId) -> RepositoryResult<()> {
        self.round_trip(ctx).await?;
        self.store
            .lock()
            .unwrap()
            .transactions
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_category(
        &self,
        ctx: &RequestContext,
        category: CategoryId,
    ) -> RepositoryResult<Vec<TransactionOutput>> {
        self.round_trip(ctx).await?;
        Ok(self
            .store
            .lock()
            .unwrap()
            .transactions
            .values()
            .filter(|t| t.category_id == category)
            .cloned()
            .collect())
    }
}

/// Cache whose every operation fails, counting attempts.
#[derive(Default)]
pub struct FailingCache {
    pub attempts: AtomicUsize,
}

impl FailingCache {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> CacheResult<T> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Connection("connection refused".to_string()))
    }
}

#[async_trait]
impl HashCache for FailingCache {
    async fn set(
        &self,
        _ctx: &RequestContext,
        _key: &str,
        _fields: CacheFields,
        _ttl: Option<Duration>,
    ) -> CacheResult<()> {
        self.fail()
    }

    async fn get(&self, _ctx: &RequestContext, _key: &str) -> CacheResult<CacheFields> {
        self.fail()
    }

    async fn delete(&self, _ctx: &RequestContext, _key: &str) -> CacheResult<()> {
        self.fail()
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

/// Cache that never answers before the deadline.
pub struct StalledCache;

#[async_trait]
impl HashCache for StalledCache {
    async fn set(
        &self,
        ctx: &RequestContext,
        _key: &str,
        _fields: CacheFields,
        _ttl: Option<Duration>,
    ) -> CacheResult<()> {
        ctx.run(std::future::pending::<()>()).await?;
        Ok(())
    }

    async fn get(&self, ctx: &RequestContext, _key: &str) -> CacheResult<CacheFields> {
        ctx.run(std::future::pending::<()>()).await?;
        Err(CacheError::Miss)
    }

    async fn delete(&self, ctx: &RequestContext, _key: &str) -> CacheResult<()> {
        ctx.run(std::future::pending::<()>()).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "stalled"
    }
}

/// Category repository whose next `get` stops after reading the row until
/// released.
#[derive(Clone)]
pub struct PausedReads {
    inner: FakeRepository,
    armed: Arc<AtomicBool>,
    reached: Arc<Notify>,
    release: Arc<Notify>,
}

impl PausedReads {
    pub fn new(inner: FakeRepository) -> Self {
        Self {
            inner,
            armed: Arc::new(AtomicBool::new(false)),
            reached: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    /// Pauses the next `get`.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Resolves once the paused `get` has read its row.
    pub async fn reached(&self) {
        self.reached.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl CategoryRepository for PausedReads {
    async fn create(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        input: &CategoryInput,
    ) -> RepositoryResult<CategoryId> {
        CategoryRepository::create(&self.inner, ctx, owner, input).await
    }

    async fn get(&self, ctx: &RequestContext, id: CategoryId) -> RepositoryResult<CategoryOutput> {
        let row = CategoryRepository::get(&self.inner, ctx, id).await;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.reached.notify_one();
            self.release.notified().await;
        }
        row
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        input: &CategoryInput,
    ) -> RepositoryResult<CategoryOutput> {
        CategoryRepository::update(&self.inner, ctx, id, input).await
    }

    async fn delete(&self, ctx: &RequestContext, id: CategoryId) -> RepositoryResult<()> {
        CategoryRepository::delete(&self.inner, ctx, id).await
    }

    async fn find_by_type(
        &self,
        ctx: &RequestContext,
        kind: &str,
    ) -> RepositoryResult<Vec<CategoryOutput>> {
        self.inner.find_by_type(ctx, kind).await
    }
}

pub fn category_input(name: &str, kind: &str, limit: i64) -> CategoryInput {
    CategoryInput {
        name: name.to_string(),
        limit,
        kind: kind.to_string(),
        description: format!("{name} budget"),
    }
}

pub fn transaction_input(name: &str, count: i64) -> TransactionInput {
    TransactionInput {
        name: name.to_string(),
        count,
        description: String::new(),
    }
}
