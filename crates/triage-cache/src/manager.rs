//! Tier orchestration: local → shared → (caller computes), write-back,
//! and the invalidation policy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;

use triage_core::config::CacheConfig;
use triage_core::models::{CacheEntry, CoarseBucket, Incident, IncidentType, Proposition};
use triage_core::traits::ISharedCache;

use crate::key::{local_key, shared_key, version_prefix};
use crate::local::LocalCache;

/// Which tier satisfied a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTier {
    Local,
    Shared,
}

/// Counter snapshot for the cache subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub local_hits: u64,
    pub local_misses: u64,
    pub shared_errors: u64,
}

/// The cache manager in front of ranking.
///
/// Reads walk the tiers in strict order and treat every shared-tier
/// failure as a miss. Writes happen after the response is prepared and
/// never block it: the local insert is an in-memory put, the shared write
/// is a detached task.
pub struct CacheManager {
    local: LocalCache,
    shared: Option<Arc<dyn ISharedCache>>,
    config: CacheConfig,
    /// Active rule/table version tag; swapped whole on redeploy.
    version: RwLock<String>,
    shared_errors: AtomicU64,
}

impl CacheManager {
    pub fn new(
        config: CacheConfig,
        shared: Option<Arc<dyn ISharedCache>>,
        version: String,
    ) -> Self {
        let local = LocalCache::new(config.local_capacity, config.local_ttl());
        Self {
            local,
            shared,
            config,
            version: RwLock::new(version),
            shared_errors: AtomicU64::new(0),
        }
    }

    /// The version tag new entries are written under.
    pub fn version(&self) -> String {
        self.version
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Walk the tiers for this incident. `None` means the caller computes.
    pub async fn lookup(
        &self,
        incident: &Incident,
        bucket: CoarseBucket,
    ) -> Option<(Vec<Proposition>, CacheTier)> {
        let version = self.version();

        let lkey = local_key(&version, incident.incident_type, bucket);
        if let Some(propositions) = self.local.get(&lkey) {
            return Some((propositions.as_ref().clone(), CacheTier::Local));
        }

        let shared = self.shared.as_ref()?;
        let skey = shared_key(&version, incident.incident_type, &incident.actor_id);
        let read = tokio::time::timeout(self.config.shared_timeout(), shared.get(&skey)).await;
        match read {
            // Version and expiry are re-checked here; the store's own TTL
            // may be coarser than ours.
            Ok(Ok(Some(entry)))
                if entry.version_tag == version && !entry.is_expired(Utc::now()) =>
            {
                Some((entry.value, CacheTier::Shared))
            }
            Ok(Ok(_)) => None,
            Ok(Err(e)) => {
                self.shared_errors.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(error = %e, "shared cache read failed, treating as miss");
                None
            }
            Err(_) => {
                self.shared_errors.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("shared cache read timed out, treating as miss");
                None
            }
        }
    }

    /// Populate both tiers with a freshly computed ranking. The shared
    /// write is detached; its failure is invisible to the response path.
    pub fn write_back(
        &self,
        incident: &Incident,
        bucket: CoarseBucket,
        propositions: &[Proposition],
    ) {
        let version = self.version();

        let lkey = local_key(&version, incident.incident_type, bucket);
        self.local.insert(lkey, propositions.to_vec());

        if let Some(shared) = self.shared.clone() {
            let skey = shared_key(&version, incident.incident_type, &incident.actor_id);
            let entry = CacheEntry::new(
                skey.clone(),
                propositions.to_vec(),
                self.config.cache_ttl_shared_s,
                version,
            );
            let ttl = self.config.shared_ttl();
            tokio::spawn(async move {
                if let Err(e) = shared.setex(&skey, entry, ttl).await {
                    tracing::debug!(error = %e, "shared cache write failed");
                }
            });
        }
    }

    /// Drop the personalized entry for an actor/type pair. Fired when the
    /// actor accepts a proposition; their context has changed.
    pub async fn invalidate_actor(&self, incident_type: IncidentType, actor_id: &str) {
        let Some(shared) = self.shared.as_ref() else {
            return;
        };
        let skey = shared_key(&self.version(), incident_type, actor_id);
        if let Err(e) = shared.del(&skey).await {
            self.shared_errors.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(error = %e, "personalized invalidation failed");
        }
    }

    /// Swap to a new version tag on rule-table or model redeploy. Old keys
    /// become unreachable immediately; the shared-tier sweep is
    /// best-effort.
    pub async fn invalidate_version(&self, new_version: &str) {
        let old = {
            let mut guard = self
                .version
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, new_version.to_string())
        };
        self.local.invalidate_all();

        if let Some(shared) = self.shared.as_ref() {
            match shared.del_prefix(&version_prefix(&old)).await {
                Ok(count) => {
                    tracing::debug!(count, old_version = %old, "swept shared entries")
                }
                Err(e) => {
                    self.shared_errors.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(error = %e, "shared version sweep failed");
                }
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            local_hits: self.local.hits(),
            local_misses: self.local.misses(),
            shared_errors: self.shared_errors.load(Ordering::Relaxed),
        }
    }
}
