use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::RankingError;
use crate::models::{FeatureVector, ProposedAction, Proposition};

/// Payload sent to the model-serving boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub features: FeatureVector,
    pub candidates: Vec<Proposition>,
}

/// One scored item in the model's reply. Items echoing a candidate id carry
/// only a score; model-originated items must also carry `title` and
/// `action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredItem {
    pub proposition_id: String,
    pub score: f64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub action: Option<ProposedAction>,
}

/// Ranked candidate list returned by the model-serving boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub items: Vec<ScoredItem>,
}

/// Model-serving boundary. Any failure mode (timeout, transport error,
/// schema mismatch) comes back as a `RankingError`, never a panic, so the
/// orchestrator can fall back to the rule heuristic.
#[async_trait]
pub trait IModelClient: Send + Sync {
    async fn rank(&self, request: &RankRequest) -> Result<RankResponse, RankingError>;
}
