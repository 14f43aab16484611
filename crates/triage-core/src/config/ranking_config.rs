use serde::{Deserialize, Serialize};

use super::defaults;

/// Which ranking variant the orchestrator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingBackend {
    /// Deterministic scoring from the rule snapshot. The configured default.
    RuleHeuristic,
    /// Remote model-serving boundary with rule fallback.
    LearnedModel,
}

/// Ranking strategy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub backend: RankingBackend,
    /// Base URL of the model-serving boundary. Required for the
    /// `learned_model` backend.
    pub model_endpoint: Option<String>,
    /// Per-attempt timeout for the model call, in milliseconds.
    pub model_timeout_ms: u64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            backend: RankingBackend::RuleHeuristic,
            model_endpoint: None,
            model_timeout_ms: defaults::DEFAULT_MODEL_TIMEOUT_MS,
        }
    }
}
