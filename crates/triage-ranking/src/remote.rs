//! HTTP client for the model-serving boundary.
//!
//! One bounded-latency attempt per call; the orchestrator owns the retry
//! schedule so backoff stays inside the request's overall budget. Anything
//! other than a well-formed 2xx reply maps to an explicit `RankingError`;
//! the caller decides what degradation looks like.

use std::time::Duration;

use async_trait::async_trait;

use triage_core::errors::RankingError;
use triage_core::traits::{IModelClient, RankRequest, RankResponse};

/// Configuration for the model-serving transport.
#[derive(Debug, Clone)]
pub struct ModelClientConfig {
    /// Base URL of the serving endpoint.
    pub base_url: String,
    /// Hard per-attempt timeout.
    pub timeout: Duration,
}

impl ModelClientConfig {
    pub fn new(base_url: &str, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

fn unavailable(reason: String) -> RankingError {
    RankingError::Unavailable { reason }
}

/// reqwest-backed `IModelClient`.
#[derive(Debug, Clone)]
pub struct ModelClient {
    config: ModelClientConfig,
    client: reqwest::Client,
}

impl ModelClient {
    pub fn new(config: ModelClientConfig) -> Result<Self, RankingError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| unavailable(e.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl IModelClient for ModelClient {
    async fn rank(&self, request: &RankRequest) -> Result<RankResponse, RankingError> {
        let url = format!("{}/v1/rank", self.config.base_url);

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RankingError::Timeout {
                        elapsed_ms: self.config.timeout.as_millis() as u64,
                    }
                } else {
                    unavailable(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%status, "model endpoint returned non-success");
            return Err(unavailable(format!("HTTP {status}")));
        }

        resp.json::<RankResponse>()
            .await
            .map_err(|e| RankingError::MalformedResponse {
                reason: e.to_string(),
            })
    }
}
