//! Append-only feedback records. Written asynchronously, never read back by
//! the engine itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::proposition::PropositionSource;

/// What the actor did with a shown proposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Accepted,
    Ignored,
    Reported,
}

/// One outcome observation for a shown proposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub incident_id: String,
    pub proposition_id: String,
    pub rank_position: u32,
    pub action_taken: FeedbackAction,
    pub resolution_latency_ms: Option<u64>,
    pub source: PropositionSource,
    pub created_at: DateTime<Utc>,
}
