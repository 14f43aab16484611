//! Experiment bucketing types.

use serde::{Deserialize, Serialize};

/// Experiment bucket an actor is deterministically assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Variant {
    Control,
    Treatment,
}

/// A recorded assignment of an incident to a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentAssignment {
    pub incident_id: String,
    pub variant: Variant,
}
