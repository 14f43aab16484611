use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum propositions per response.
    pub top_k: usize,
    /// Wall-clock budget for cache + compute, in milliseconds.
    pub latency_budget_ms: u64,
    /// Retry budget against the remote ranking endpoint.
    pub retry_attempts: u32,
    /// Backoff delay before each retry attempt; attempts beyond the list
    /// reuse the last delay.
    pub retry_backoff_ms: Vec<u64>,
    /// Whether to assign experiment variants.
    pub experiment_enabled: bool,
    /// Salt naming the active experiment window.
    pub experiment_salt: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            latency_budget_ms: defaults::DEFAULT_LATENCY_BUDGET_MS,
            retry_attempts: defaults::DEFAULT_RETRY_ATTEMPTS,
            retry_backoff_ms: defaults::DEFAULT_RETRY_BACKOFF_MS.to_vec(),
            experiment_enabled: defaults::DEFAULT_EXPERIMENT_ENABLED,
            experiment_salt: defaults::DEFAULT_EXPERIMENT_SALT.to_string(),
        }
    }
}
