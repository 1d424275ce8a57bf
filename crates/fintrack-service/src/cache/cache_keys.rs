//! Cache key generators for consistent key naming.

use fintrack_core::{CategoryId, TransactionId};

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "fintrack:cache";

/// Generate a cache key for a category by ID.
#[must_use]
pub fn category(id: CategoryId) -> String {
    format!("{CACHE_PREFIX}:category:{id}")
}

/// Generate a cache key for a transaction by ID.
#[must_use]
pub fn transaction(id: TransactionId) -> String {
    format!("{CACHE_PREFIX}:transaction:{id}")
}
