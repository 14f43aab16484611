//! Cache entry shared between the local and shared tiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::proposition::Proposition;

/// An ordered proposition list stored under a derived cache key.
///
/// Keys never contain free-text incident descriptions or un-hashed actor
/// identifiers; `version_tag` ties the entry to the rule/model snapshot
/// that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: Vec<Proposition>,
    pub created_at: DateTime<Utc>,
    pub ttl_s: u64,
    pub version_tag: String,
}

impl CacheEntry {
    pub fn new(key: String, value: Vec<Proposition>, ttl_s: u64, version_tag: String) -> Self {
        Self {
            key,
            value,
            created_at: Utc::now(),
            ttl_s,
            version_tag,
        }
    }

    /// True once the entry has outlived its TTL.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.created_at);
        age.num_seconds() >= self.ttl_s as i64
    }
}
