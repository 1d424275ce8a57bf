//! Hash cache interface.

use async_trait::async_trait;
use fintrack_core::{DeadlineExceeded, RequestContext};
use std::collections::HashMap;
use std::time::Duration;

/// Flat field map stored per entity.
pub type CacheFields = HashMap<String, String>;

/// Result alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache failures. These never leave the service layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// No entry under the key, or the entry is empty or expired.
    #[error("cache miss")]
    Miss,

    /// Could not reach the cache backend.
    #[error("cache connection failed: {0}")]
    Connection(String),

    /// The backend rejected a command.
    #[error("cache command failed: {0}")]
    Command(String),

    /// A stored field could not be decoded.
    #[error("cache entry could not be decoded: {0}")]
    Decode(String),

    /// The request deadline elapsed.
    #[error("cache operation timed out")]
    Timeout,
}

impl From<DeadlineExceeded> for CacheError {
    fn from(_: DeadlineExceeded) -> Self {
        Self::Timeout
    }
}

/// Key/value hash store keyed by entity.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait HashCache: Send + Sync {
    /// Replaces the entry under `key`. `ttl` of `None` keeps it until deleted.
    async fn set(
        &self,
        ctx: &RequestContext,
        key: &str,
        fields: CacheFields,
        ttl: Option<Duration>,
    ) -> CacheResult<()>;

    /// Returns the entry under `key`, or `CacheError::Miss`.
    async fn get(&self, ctx: &RequestContext, key: &str) -> CacheResult<CacheFields>;

    /// Removes the entry under `key`. Removing an absent key succeeds.
    async fn delete(&self, ctx: &RequestContext, key: &str) -> CacheResult<()>;

    /// Backend name used in logs.
    fn backend(&self) -> &'static str;
}
