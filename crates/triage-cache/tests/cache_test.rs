//! Cache manager integration tests: tier order, degradation-to-miss, and
//! the invalidation policy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use triage_cache::{CacheManager, CacheTier, InMemorySharedCache};
use triage_core::config::CacheConfig;
use triage_core::errors::{CacheError, TriageResult};
use triage_core::models::{
    ActionKind, CacheEntry, CoarseBucket, Incident, IncidentType, ProposedAction, Proposition,
    PropositionSource, Severity,
};
use triage_core::traits::ISharedCache;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn incident(actor_id: &str) -> Incident {
    Incident {
        id: "inc-1".into(),
        incident_type: IncidentType::CiFailure,
        severity: Severity::High,
        description: "Error: timeout waiting for deadline".into(),
        occurred_at: Utc::now(),
        actor_id: actor_id.into(),
    }
}

fn propositions(id: &str) -> Vec<Proposition> {
    vec![Proposition {
        id: id.into(),
        title: "Resolve Timeout".into(),
        action: ProposedAction {
            kind: ActionKind::IncreaseTimeout,
            steps: vec!["Increase the timeout".into()],
        },
        confidence: 0.92,
        source: PropositionSource::Rule,
        rank: 1,
    }]
}

fn manager() -> CacheManager {
    CacheManager::new(CacheConfig::default(), None, "v1".into())
}

fn manager_with(shared: Arc<dyn ISharedCache>) -> CacheManager {
    CacheManager::new(CacheConfig::default(), Some(shared), "v1".into())
}

/// Shared cache that fails every operation.
struct FailingSharedCache;

#[async_trait]
impl ISharedCache for FailingSharedCache {
    async fn get(&self, _key: &str) -> TriageResult<Option<CacheEntry>> {
        Err(CacheError::Unavailable {
            reason: "connection refused".into(),
        }
        .into())
    }
    async fn setex(&self, _key: &str, _entry: CacheEntry, _ttl: Duration) -> TriageResult<()> {
        Err(CacheError::Unavailable {
            reason: "connection refused".into(),
        }
        .into())
    }
    async fn del(&self, _key: &str) -> TriageResult<()> {
        Err(CacheError::Unavailable {
            reason: "connection refused".into(),
        }
        .into())
    }
    async fn del_prefix(&self, _prefix: &str) -> TriageResult<u64> {
        Err(CacheError::Unavailable {
            reason: "connection refused".into(),
        }
        .into())
    }
}

/// Shared cache that hangs long past the read timeout.
struct SlowSharedCache;

#[async_trait]
impl ISharedCache for SlowSharedCache {
    async fn get(&self, _key: &str) -> TriageResult<Option<CacheEntry>> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(None)
    }
    async fn setex(&self, _key: &str, _entry: CacheEntry, _ttl: Duration) -> TriageResult<()> {
        Ok(())
    }
    async fn del(&self, _key: &str) -> TriageResult<()> {
        Ok(())
    }
    async fn del_prefix(&self, _prefix: &str) -> TriageResult<u64> {
        Ok(0)
    }
}

// ---------------------------------------------------------------------------
// Tier walk
// ---------------------------------------------------------------------------

#[tokio::test]
async fn write_back_populates_the_local_tier() {
    let mgr = manager();
    let inc = incident("actor-1");
    let bucket = CoarseBucket::from_incident(&inc);

    assert!(mgr.lookup(&inc, bucket).await.is_none());
    mgr.write_back(&inc, bucket, &propositions("timeout_001"));

    let (props, tier) = mgr.lookup(&inc, bucket).await.unwrap();
    assert_eq!(tier, CacheTier::Local);
    assert_eq!(props, propositions("timeout_001"));
}

#[tokio::test]
async fn shared_tier_serves_when_local_is_cold() {
    let shared = Arc::new(InMemorySharedCache::new());
    let writer = manager_with(shared.clone());
    let inc = incident("actor-1");
    let bucket = CoarseBucket::from_incident(&inc);

    writer.write_back(&inc, bucket, &propositions("timeout_001"));
    tokio::time::sleep(Duration::from_millis(20)).await; // detached write lands

    // A fresh process (new manager, same shared store) has a cold local
    // tier but hits the personalized shared entry.
    let reader = manager_with(shared);
    let (props, tier) = reader.lookup(&inc, bucket).await.unwrap();
    assert_eq!(tier, CacheTier::Shared);
    assert_eq!(props, propositions("timeout_001"));
}

#[tokio::test]
async fn local_tier_wins_over_shared() {
    let shared = Arc::new(InMemorySharedCache::new());
    let mgr = manager_with(shared);
    let inc = incident("actor-1");
    let bucket = CoarseBucket::from_incident(&inc);

    mgr.write_back(&inc, bucket, &propositions("timeout_001"));
    tokio::time::sleep(Duration::from_millis(20)).await;

    let (_, tier) = mgr.lookup(&inc, bucket).await.unwrap();
    assert_eq!(tier, CacheTier::Local);
}

// ---------------------------------------------------------------------------
// Degradation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shared_failure_reads_as_miss() {
    let mgr = manager_with(Arc::new(FailingSharedCache));
    let inc = incident("actor-1");
    let bucket = CoarseBucket::from_incident(&inc);

    assert!(mgr.lookup(&inc, bucket).await.is_none());
    assert_eq!(mgr.stats().shared_errors, 1);
}

#[tokio::test]
async fn slow_shared_read_is_cut_off_by_timeout() {
    let mgr = manager_with(Arc::new(SlowSharedCache));
    let inc = incident("actor-1");
    let bucket = CoarseBucket::from_incident(&inc);

    let start = std::time::Instant::now();
    assert!(mgr.lookup(&inc, bucket).await.is_none());
    assert!(start.elapsed() < Duration::from_millis(200));
    assert_eq!(mgr.stats().shared_errors, 1);
}

// ---------------------------------------------------------------------------
// Invalidation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn accepted_feedback_drops_only_that_actors_entry() {
    let shared = Arc::new(InMemorySharedCache::new());
    let mgr = manager_with(shared.clone());
    let inc_a = incident("actor-a");
    let inc_b = incident("actor-b");
    let bucket = CoarseBucket::from_incident(&inc_a);

    mgr.write_back(&inc_a, bucket, &propositions("p1"));
    mgr.write_back(&inc_b, bucket, &propositions("p2"));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(shared.len(), 2);

    mgr.invalidate_actor(IncidentType::CiFailure, "actor-a").await;
    assert_eq!(shared.len(), 1);
}

#[tokio::test]
async fn version_bump_makes_old_entries_unreachable() {
    let shared = Arc::new(InMemorySharedCache::new());
    let mgr = manager_with(shared.clone());
    let inc = incident("actor-1");
    let bucket = CoarseBucket::from_incident(&inc);

    mgr.write_back(&inc, bucket, &propositions("old"));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(mgr.lookup(&inc, bucket).await.is_some());

    mgr.invalidate_version("v2").await;
    assert!(mgr.lookup(&inc, bucket).await.is_none());
    assert!(shared.is_empty(), "old-version entries should be swept");
    assert_eq!(mgr.version(), "v2");
}

#[tokio::test]
async fn stale_version_entries_are_ignored_even_if_present() {
    let shared = Arc::new(InMemorySharedCache::new());
    let inc = incident("actor-1");
    let bucket = CoarseBucket::from_incident(&inc);

    // Entry written under v1 survives in the store…
    let v1 = manager_with(shared.clone());
    v1.write_back(&inc, bucket, &propositions("old"));
    tokio::time::sleep(Duration::from_millis(20)).await;

    // …but a manager running v2 never serves it.
    let v2 = CacheManager::new(
        CacheConfig::default(),
        Some(shared as Arc<dyn ISharedCache>),
        "v2".into(),
    );
    assert!(v2.lookup(&inc, bucket).await.is_none());
}
