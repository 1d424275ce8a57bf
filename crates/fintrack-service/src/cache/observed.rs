//! Best-effort cache access used by the entity services.
//!
//! Writes run on a detached task. The caller awaits the task's outcome only
//! to log it; a failed write never changes the caller's result. The task is
//! not cancelled when the caller's future is dropped.
//!
//! Every cache call gets its own budget (`op_timeout`), capped by the request
//! deadline, so a hung cache cannot consume the time left for the repository.

use super::write_log::{ReadTicket, WriteLog};
use super::{CacheError, CacheRecord, CacheResult, HashCache};
use fintrack_config::CacheConfig;
use fintrack_core::RequestContext;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Cache behaviour applied by the entity services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Entry lifetime. `None` keeps entries until deleted.
    pub ttl: Option<Duration>,
    /// Write repository results back after a read miss.
    pub populate_on_read: bool,
    /// Budget for one cache call.
    pub op_timeout: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for CacheSettings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            populate_on_read: config.populate_on_read,
            op_timeout: config.op_timeout(),
        }
    }
}

/// A [`HashCache`] whose failures are logged and swallowed.
#[derive(Clone)]
pub struct ObservedCache {
    cache: Arc<dyn HashCache>,
    settings: CacheSettings,
    writes: Arc<WriteLog>,
}

impl ObservedCache {
    /// Wraps `cache` with the given settings.
    #[must_use]
    pub fn new(cache: Arc<dyn HashCache>, settings: CacheSettings) -> Self {
        Self {
            cache,
            settings,
            writes: Arc::new(WriteLog::default()),
        }
    }

    fn op_context(&self, ctx: &RequestContext) -> RequestContext {
        ctx.clone().with_timeout(self.settings.op_timeout)
    }

    /// Reads and decodes the entry for `id`.
    ///
    /// Misses, transport failures, timeouts and undecodable entries all
    /// yield `None`.
    pub async fn load<R: CacheRecord>(&self, ctx: &RequestContext, id: R::Id) -> Option<R> {
        let key = R::cache_key(id);
        let op_ctx = self.op_context(ctx);

        let result = op_ctx
            .run(self.cache.get(&op_ctx, &key))
            .await
            .map_err(CacheError::from)
            .and_then(|fetched| fetched)
            .and_then(|fields| R::from_fields(id, &fields));

        match result {
            Ok(record) => {
                debug!(request_id = ctx.request_id(), %key, "Served from cache");
                Some(record)
            }
            Err(CacheError::Miss) => {
                debug!(request_id = ctx.request_id(), %key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(
                    request_id = ctx.request_id(),
                    %key,
                    backend = self.cache.backend(),
                    error = %e,
                    "Cache read failed, falling back to repository"
                );
                None
            }
        }
    }

    /// Captures the write clock ahead of a repository read that may be
    /// passed to [`fill`](Self::fill).
    #[must_use]
    pub fn begin_read(&self) -> ReadTicket {
        self.writes.ticket()
    }

    /// Writes `record` under `id`, observed.
    pub async fn store<R: CacheRecord>(&self, ctx: &RequestContext, id: R::Id, record: &R) {
        let key = R::cache_key(id);
        let fields = record.to_fields();
        let cache = Arc::clone(&self.cache);
        let writes = Arc::clone(&self.writes);
        let task_key = key.clone();
        let ttl = self.settings.ttl;
        let op_ctx = self.op_context(ctx);

        self.observe(ctx, "set", key, op_ctx.clone(), async move {
            writes.record(&task_key).await;
            cache.set(&op_ctx, &task_key, fields, ttl).await.map(|()| true)
        })
        .await;
    }

    /// Writes a repository read back after a miss, observed.
    ///
    /// Skipped when read-path population is off, or when a store or evict
    /// for `id` was recorded after `ticket` was taken.
    pub async fn fill<R: CacheRecord>(
        &self,
        ctx: &RequestContext,
        id: R::Id,
        record: &R,
        ticket: ReadTicket,
    ) {
        if !self.settings.populate_on_read {
            return;
        }

        let key = R::cache_key(id);
        let fields = record.to_fields();
        let cache = Arc::clone(&self.cache);
        let writes = Arc::clone(&self.writes);
        let task_key = key.clone();
        let ttl = self.settings.ttl;
        let op_ctx = self.op_context(ctx);

        self.observe(ctx, "fill", key, op_ctx.clone(), async move {
            writes
                .fill_if_current(&task_key, ticket, cache.set(&op_ctx, &task_key, fields, ttl))
                .await
        })
        .await;
    }

    /// Removes the entry for `id`, observed.
    pub async fn evict<R: CacheRecord>(&self, ctx: &RequestContext, id: R::Id) {
        let key = R::cache_key(id);
        let cache = Arc::clone(&self.cache);
        let writes = Arc::clone(&self.writes);
        let task_key = key.clone();
        let op_ctx = self.op_context(ctx);

        self.observe(ctx, "delete", key, op_ctx.clone(), async move {
            writes.record(&task_key).await;
            cache.delete(&op_ctx, &task_key).await.map(|()| true)
        })
        .await;
    }

    async fn observe<F>(
        &self,
        ctx: &RequestContext,
        op: &'static str,
        key: String,
        op_ctx: RequestContext,
        task: F,
    ) where
        F: Future<Output = CacheResult<bool>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let outcome = op_ctx
                .run(task)
                .await
                .map_err(CacheError::from)
                .and_then(|written| written);
            let _ = tx.send(outcome);
        });

        match rx.await {
            Ok(Ok(true)) => {
                debug!(request_id = ctx.request_id(), op, %key, "Cache updated");
            }
            Ok(Ok(false)) => {
                debug!(
                    request_id = ctx.request_id(),
                    op,
                    %key,
                    "Cache fill dropped, entry changed during read"
                );
            }
            Ok(Err(e)) => {
                warn!(
                    request_id = ctx.request_id(),
                    op,
                    %key,
                    backend = self.cache.backend(),
                    error = %e,
                    "Cache update failed"
                );
            }
            Err(_) => {
                warn!(request_id = ctx.request_id(), op, %key, "Cache task ended without a result");
            }
        }
    }
}
