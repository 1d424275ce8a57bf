//! Redis-based hash cache implementation.

use super::{CacheError, CacheFields, CacheResult, HashCache};
use async_trait::async_trait;
use deadpool_redis::{Pool, PoolConfig, Runtime};
use fintrack_config::RedisConfig;
use fintrack_core::RequestContext;
use redis::AsyncCommands;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Redis-based hash cache.
///
/// Each entity is one Redis hash. Writes replace the whole hash and set its
/// expiry in a single `MULTI`/`EXEC` block.
#[derive(Clone)]
pub struct RedisHashCache {
    pool: Arc<Pool>,
}

impl RedisHashCache {
    /// Creates a cache over an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Creates the connection pool described by `config`.
    ///
    /// No connection is opened until the first command.
    pub fn connect(config: &RedisConfig) -> CacheResult<Self> {
        let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
        redis_cfg.pool = Some(PoolConfig::new(config.pool_size as usize));

        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis pool: {e}")))?;

        Ok(Self::new(Arc::new(pool)))
    }

    async fn get_conn(&self) -> CacheResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to get Redis connection: {e}")))
    }
}

fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        CacheError::Connection(err.to_string())
    } else {
        CacheError::Command(err.to_string())
    }
}

#[async_trait]
impl HashCache for RedisHashCache {
    async fn set(
        &self,
        ctx: &RequestContext,
        key: &str,
        fields: CacheFields,
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        let items: Vec<(String, String)> = fields.into_iter().collect();

        ctx.run(async {
            let mut conn = self.get_conn().await?;

            let mut pipe = redis::pipe();
            pipe.atomic().del(key).ignore();
            pipe.hset_multiple(key, &items).ignore();
            if let Some(ttl) = ttl {
                let secs = i64::try_from(ttl.as_secs().max(1)).unwrap_or(i64::MAX);
                pipe.expire(key, secs).ignore();
            }

            let _: () = pipe.query_async(&mut conn).await.map_err(map_redis_error)?;
            debug!(key, ttl_secs = ttl.map(|t| t.as_secs()), "Cached hash");
            Ok::<(), CacheError>(())
        })
        .await?
    }

    async fn get(&self, ctx: &RequestContext, key: &str) -> CacheResult<CacheFields> {
        ctx.run(async {
            let mut conn = self.get_conn().await?;
            let fields: CacheFields = conn.hgetall(key).await.map_err(map_redis_error)?;

            if fields.is_empty() {
                debug!(key, "Cache miss");
                return Err(CacheError::Miss);
            }

            debug!(key, "Cache hit");
            Ok(fields)
        })
        .await?
    }

    async fn delete(&self, ctx: &RequestContext, key: &str) -> CacheResult<()> {
        ctx.run(async {
            let mut conn = self.get_conn().await?;
            let deleted: i64 = conn.del(key).await.map_err(map_redis_error)?;
            debug!(key, deleted = deleted > 0, "Deleted hash");
            Ok::<(), CacheError>(())
        })
        .await?
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
