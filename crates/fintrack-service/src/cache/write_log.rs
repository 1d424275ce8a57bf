//! Ordering between cache writes and read-path fills.
//!
//! A fill carries data read from the repository. When a store or evict for
//! the same key is recorded after that read began, the fill is dropped so a
//! deleted or replaced entity is not written back.

use super::CacheResult;
use lru::LruCache;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Keys whose last write tick is remembered individually.
pub const TRACKED_KEYS: usize = 4096;

/// Write clock captured before a repository read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadTicket(u64);

struct RecentWrites {
    ticks: LruCache<String, u64>,
    /// Highest tick among keys pushed out of `ticks`.
    floor: u64,
}

impl RecentWrites {
    fn last_write(&self, key: &str) -> u64 {
        self.ticks.peek(key).copied().unwrap_or(self.floor)
    }
}

/// Monotonic log of cache writes per key.
pub struct WriteLog {
    clock: AtomicU64,
    recent: Mutex<RecentWrites>,
}

impl WriteLog {
    /// Creates a log remembering up to `capacity` keys.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            clock: AtomicU64::new(0),
            recent: Mutex::new(RecentWrites {
                ticks: LruCache::new(capacity),
                floor: 0,
            }),
        }
    }

    /// Captures the clock. Take it before reading the repository.
    pub fn ticket(&self) -> ReadTicket {
        ReadTicket(self.clock.load(Ordering::SeqCst))
    }

    /// Records a store or evict of `key`.
    pub async fn record(&self, key: &str) {
        let mut recent = self.recent.lock().await;
        let tick = self.clock.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((evicted, evicted_tick)) = recent.ticks.push(key.to_string(), tick) {
            if evicted != key {
                recent.floor = recent.floor.max(evicted_tick);
            }
        }
    }

    /// Runs `write` unless `key` was written after `ticket` was taken.
    ///
    /// The log stays locked until `write` finishes, so a concurrent
    /// [`record`](Self::record) is ordered either before the check or after
    /// the write. Returns `Ok(false)` when the fill was dropped.
    pub async fn fill_if_current<F>(
        &self,
        key: &str,
        ticket: ReadTicket,
        write: F,
    ) -> CacheResult<bool>
    where
        F: Future<Output = CacheResult<()>>,
    {
        let recent = self.recent.lock().await;
        if recent.last_write(key) > ticket.0 {
            return Ok(false);
        }
        write.await?;
        drop(recent);
        Ok(true)
    }
}

impl Default for WriteLog {
    fn default() -> Self {
        Self::new(TRACKED_KEYS)
    }
}
