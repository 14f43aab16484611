//! Reference implementation of the shared-cache boundary.
//!
//! Stores JSON-serialized entries in a `DashMap` with per-entry expiry,
//! mirroring the GET/SETEX/DEL(+prefix-scan) surface of the production
//! key/value store. Used by tests and as the offline fallback; the real
//! store is a collaborator behind the same trait.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use triage_core::errors::{CacheError, TriageResult};
use triage_core::models::CacheEntry;
use triage_core::traits::ISharedCache;

#[derive(Default)]
pub struct InMemorySharedCache {
    entries: DashMap<String, (String, Instant)>,
}

impl InMemorySharedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently stored, unexpired keys. Test hook for key inspection.
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|e| e.value().1 > now)
            .map(|e| e.key().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ISharedCache for InMemorySharedCache {
    async fn get(&self, key: &str) -> TriageResult<Option<CacheEntry>> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };
        let (raw, expires_at) = entry.value();
        if *expires_at <= Instant::now() {
            drop(entry);
            self.entries.remove(key);
            return Ok(None);
        }
        let parsed =
            serde_json::from_str::<CacheEntry>(raw).map_err(|e| CacheError::Serialization {
                reason: e.to_string(),
            })?;
        Ok(Some(parsed))
    }

    async fn setex(&self, key: &str, entry: CacheEntry, ttl: Duration) -> TriageResult<()> {
        let raw = serde_json::to_string(&entry).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        self.entries
            .insert(key.to_string(), (raw, Instant::now() + ttl));
        Ok(())
    }

    async fn del(&self, key: &str) -> TriageResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn del_prefix(&self, prefix: &str) -> TriageResult<u64> {
        let victims: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect();
        let count = victims.len() as u64;
        for key in victims {
            self.entries.remove(&key);
        }
        Ok(count)
    }
}
