//! Configuration surface, loadable from TOML.

pub mod cache_config;
pub mod defaults;
pub mod engine_config;
pub mod ranking_config;

pub use cache_config::CacheConfig;
pub use engine_config::EngineConfig;
pub use ranking_config::{RankingBackend, RankingConfig};

use serde::{Deserialize, Serialize};

use crate::errors::{TriageError, TriageResult};

/// Aggregate configuration for the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub engine: EngineConfig,
    pub cache: CacheConfig,
    pub ranking: RankingConfig,
}

impl TriageConfig {
    /// Parse a TOML document. Unknown fields are ignored; missing fields
    /// take defaults.
    pub fn from_toml_str(raw: &str) -> TriageResult<Self> {
        toml::from_str(raw).map_err(|e| TriageError::InvalidConfig {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = TriageConfig::default();
        assert_eq!(cfg.engine.top_k, 3);
        assert_eq!(cfg.engine.latency_budget_ms, 100);
        assert_eq!(cfg.engine.retry_backoff_ms, vec![20, 50]);
        assert_eq!(cfg.cache.cache_ttl_local_s, 300);
        assert_eq!(cfg.cache.cache_ttl_shared_s, 1800);
        assert_eq!(cfg.ranking.backend, RankingBackend::RuleHeuristic);
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let cfg = TriageConfig::from_toml_str(
            r#"
            [engine]
            top_k = 5
            retry_backoff_ms = [10, 30, 90]

            [ranking]
            backend = "learned_model"
            model_endpoint = "http://ranker.internal:9000"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.engine.top_k, 5);
        assert_eq!(cfg.engine.retry_backoff_ms, vec![10, 30, 90]);
        assert_eq!(cfg.ranking.backend, RankingBackend::LearnedModel);
        assert_eq!(cfg.cache.cache_ttl_local_s, 300);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(TriageConfig::from_toml_str("engine = 3").is_err());
    }
}
