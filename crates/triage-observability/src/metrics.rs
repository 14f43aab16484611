//! Request-path counters. Cheap to bump from the hot path, exported as a
//! serializable snapshot for dashboards.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for the suggestion engine.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    requests_total: AtomicU64,
    invalid_requests: AtomicU64,
    cache_hits_local: AtomicU64,
    cache_hits_shared: AtomicU64,
    computed: AtomicU64,
    degraded_responses: AtomicU64,
    model_failures: AtomicU64,
    budget_exceeded: AtomicU64,
    feedback_log_failures: AtomicU64,
    actor_invalidations: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid_request(&self) {
        self.invalid_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_local_hit(&self) {
        self.cache_hits_local.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_shared_hit(&self) {
        self.cache_hits_shared.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_computed(&self) {
        self.computed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_degraded(&self) {
        self.degraded_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_model_failure(&self) {
        self.model_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_budget_exceeded(&self) {
        self.budget_exceeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feedback_log_failure(&self) {
        self.feedback_log_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_actor_invalidation(&self) {
        self.actor_invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time snapshot of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            invalid_requests: self.invalid_requests.load(Ordering::Relaxed),
            cache_hits_local: self.cache_hits_local.load(Ordering::Relaxed),
            cache_hits_shared: self.cache_hits_shared.load(Ordering::Relaxed),
            computed: self.computed.load(Ordering::Relaxed),
            degraded_responses: self.degraded_responses.load(Ordering::Relaxed),
            model_failures: self.model_failures.load(Ordering::Relaxed),
            budget_exceeded: self.budget_exceeded.load(Ordering::Relaxed),
            feedback_log_failures: self.feedback_log_failures.load(Ordering::Relaxed),
            actor_invalidations: self.actor_invalidations.load(Ordering::Relaxed),
        }
    }
}

/// Serializable view of `EngineMetrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub invalid_requests: u64,
    pub cache_hits_local: u64,
    pub cache_hits_shared: u64,
    pub computed: u64,
    pub degraded_responses: u64,
    pub model_failures: u64,
    pub budget_exceeded: u64,
    pub feedback_log_failures: u64,
    pub actor_invalidations: u64,
}

impl MetricsSnapshot {
    /// Fraction of requests served from either cache tier.
    pub fn cache_hit_rate(&self) -> f64 {
        if self.requests_total == 0 {
            return 0.0;
        }
        (self.cache_hits_local + self.cache_hits_shared) as f64 / self.requests_total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_land_in_the_snapshot() {
        let metrics = EngineMetrics::new();
        metrics.record_request();
        metrics.record_request();
        metrics.record_local_hit();
        metrics.record_degraded();

        let snap = metrics.snapshot();
        assert_eq!(snap.requests_total, 2);
        assert_eq!(snap.cache_hits_local, 1);
        assert_eq!(snap.degraded_responses, 1);
        assert!((snap.cache_hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn hit_rate_is_zero_without_traffic() {
        assert_eq!(MetricsSnapshot::default().cache_hit_rate(), 0.0);
    }
}
