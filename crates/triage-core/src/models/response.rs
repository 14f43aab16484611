//! The engine's response shape.

use serde::{Deserialize, Serialize};

use super::experiment::Variant;
use super::proposition::{Proposition, PropositionSource};

/// Result of one `suggest()` call. Callers always receive a response;
/// `degraded` signals that learned ranking was bypassed, `invalid_input`
/// that the incident failed validation (empty-but-valid list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub propositions: Vec<Proposition>,
    pub variant: Option<Variant>,
    pub source: PropositionSource,
    pub degraded: bool,
    pub invalid_input: bool,
}

impl SuggestResponse {
    /// Structured "invalid request" result for malformed incidents.
    pub fn invalid_input(variant: Option<Variant>) -> Self {
        Self {
            propositions: Vec::new(),
            variant,
            source: PropositionSource::Rule,
            degraded: false,
            invalid_input: true,
        }
    }
}
