//! # triage-observability
//!
//! Engine metrics (atomic counters with a serializable snapshot) and
//! structured tracing setup. Dependency and budget failures inside the
//! engine are observable only here; they never surface to callers.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{EngineMetrics, MetricsSnapshot};
