//! Caching infrastructure for the service layer.
//!
//! Entities are cached as flat string hashes, one per id. Redis backs the
//! cache in production; the in-process implementation stands in when Redis
//! is disabled.

mod cache_interface;
pub mod cache_keys;
mod codec;
mod memory_cache;
mod observed;
mod redis_cache;
mod write_log;

pub use cache_interface::{CacheError, CacheFields, CacheResult, HashCache};
pub use codec::CacheRecord;
pub use memory_cache::MemoryHashCache;
pub use observed::{CacheSettings, ObservedCache};
pub use redis_cache::RedisHashCache;
pub use write_log::ReadTicket;
