use std::time::Duration;

use async_trait::async_trait;

use crate::errors::TriageResult;
use crate::models::CacheEntry;

/// Network key/value store boundary (GET/SETEX/DEL semantics).
///
/// Every operation is idempotent and safe to retry or skip. Callers treat
/// any error identically to a miss.
#[async_trait]
pub trait ISharedCache: Send + Sync {
    async fn get(&self, key: &str) -> TriageResult<Option<CacheEntry>>;

    /// Store an entry with an explicit TTL.
    async fn setex(&self, key: &str, entry: CacheEntry, ttl: Duration) -> TriageResult<()>;

    async fn del(&self, key: &str) -> TriageResult<()>;

    /// Delete every key under a prefix; returns the number removed.
    /// Best-effort; used for version-tag invalidation sweeps.
    async fn del_prefix(&self, prefix: &str) -> TriageResult<u64>;
}
