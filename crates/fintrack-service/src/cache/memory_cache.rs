//! In-process hash cache with LRU eviction.
//!
//! Used when Redis is disabled and by tests. Expiry is lazy: an expired entry
//! is dropped when it is next read.

use super::{CacheError, CacheFields, CacheResult, HashCache};
use async_trait::async_trait;
use fintrack_core::RequestContext;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    fields: CacheFields,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(fields: CacheFields, ttl: Option<Duration>) -> Self {
        Self {
            fields,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-memory hash cache bounded by entry count.
#[derive(Debug, Clone)]
pub struct MemoryHashCache {
    store: Arc<Mutex<LruCache<String, CacheEntry>>>,
}

impl MemoryHashCache {
    /// Creates a cache holding at most `max_entries` entries.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Number of stored entries, including expired ones not yet dropped.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

#[async_trait]
impl HashCache for MemoryHashCache {
    async fn set(
        &self,
        _ctx: &RequestContext,
        key: &str,
        fields: CacheFields,
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        self.store
            .lock()
            .await
            .put(key.to_string(), CacheEntry::new(fields, ttl));
        Ok(())
    }

    async fn get(&self, _ctx: &RequestContext, key: &str) -> CacheResult<CacheFields> {
        let mut store = self.store.lock().await;

        match store.get(key) {
            Some(entry) if !entry.is_expired() && !entry.fields.is_empty() => {
                return Ok(entry.fields.clone());
            }
            Some(_) => {}
            None => return Err(CacheError::Miss),
        }

        store.pop(key);
        Err(CacheError::Miss)
    }

    async fn delete(&self, _ctx: &RequestContext, key: &str) -> CacheResult<()> {
        self.store.lock().await.pop(key);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
