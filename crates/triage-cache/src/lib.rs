//! # triage-cache
//!
//! Three-tier caching in front of ranking: a bounded process-local moka
//! tier, a best-effort shared key/value tier, and on-demand compute (owned
//! by the orchestrator). Keys are derived from incident type, coarse
//! feature bucket, and a hashed actor id (never from description text or
//! raw actor identity) and are namespaced by the rule/table version tag.

pub mod key;
pub mod local;
pub mod manager;
pub mod shared;

pub use local::LocalCache;
pub use manager::{CacheManager, CacheStats, CacheTier};
pub use shared::InMemorySharedCache;
