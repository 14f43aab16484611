use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Cache tier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL for the process-local tier, in seconds.
    pub cache_ttl_local_s: u64,
    /// TTL for the shared (personalized) tier, in seconds.
    pub cache_ttl_shared_s: u64,
    /// Bounded entry count of the local tier.
    pub local_capacity: u64,
    /// Hard timeout on shared-cache reads, in milliseconds.
    pub shared_timeout_ms: u64,
}

impl CacheConfig {
    pub fn local_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_local_s)
    }

    pub fn shared_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_shared_s)
    }

    pub fn shared_timeout(&self) -> Duration {
        Duration::from_millis(self.shared_timeout_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_ttl_local_s: defaults::DEFAULT_CACHE_TTL_LOCAL_S,
            cache_ttl_shared_s: defaults::DEFAULT_CACHE_TTL_SHARED_S,
            local_capacity: defaults::DEFAULT_LOCAL_CACHE_CAPACITY,
            shared_timeout_ms: defaults::DEFAULT_SHARED_CACHE_TIMEOUT_MS,
        }
    }
}
