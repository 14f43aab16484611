//! The incident being triaged, plus the caller-supplied actor history summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::defaults::MAX_DESCRIPTION_BYTES;
use crate::errors::{TriageError, TriageResult};

/// Category of the incoming incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentType {
    CiFailure,
    Spam,
    Scam,
    Other,
}

impl IncidentType {
    /// Stable embedding id used as a categorical feature.
    pub fn embedding_id(&self) -> u8 {
        match self {
            IncidentType::CiFailure => 0,
            IncidentType::Spam => 1,
            IncidentType::Scam => 2,
            IncidentType::Other => 3,
        }
    }

    /// Short tag used in cache keys. Never contains user content.
    pub fn key_tag(&self) -> &'static str {
        match self {
            IncidentType::CiFailure => "ci",
            IncidentType::Spam => "spam",
            IncidentType::Scam => "scam",
            IncidentType::Other => "other",
        }
    }
}

/// Ordinal severity of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn ordinal(&self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
            Severity::Critical => 3,
        }
    }

    /// Ranking weight per severity tier.
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Low => 0.4,
            Severity::Medium => 0.6,
            Severity::High => 0.8,
            Severity::Critical => 1.0,
        }
    }
}

/// An incoming incident. Immutable input; the engine never mutates it.
///
/// `actor_id` is an opaque identifier; it is hashed before it reaches any
/// cache key or log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub incident_type: IncidentType,
    pub severity: Severity,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
    pub actor_id: String,
}

impl Incident {
    /// Validate the incident. Malformed incidents are reported back to the
    /// caller as a structured result, never as a panic.
    pub fn validate(&self) -> TriageResult<()> {
        if self.id.trim().is_empty() {
            return Err(TriageError::InvalidIncident {
                reason: "incident id is empty".into(),
            });
        }
        if self.actor_id.trim().is_empty() {
            return Err(TriageError::InvalidIncident {
                reason: "actor id is empty".into(),
            });
        }
        if self.description.len() > MAX_DESCRIPTION_BYTES {
            return Err(TriageError::InvalidIncident {
                reason: format!(
                    "description exceeds {} bytes ({})",
                    MAX_DESCRIPTION_BYTES,
                    self.description.len()
                ),
            });
        }
        Ok(())
    }

    /// Description with control characters stripped and runs of whitespace
    /// collapsed. Rule patterns match against this form.
    pub fn sanitized_description(&self) -> String {
        let mut out = String::with_capacity(self.description.len());
        let mut last_was_space = false;
        for ch in self.description.chars() {
            if ch.is_control() && ch != '\n' {
                continue;
            }
            if ch.is_whitespace() {
                if !last_was_space {
                    out.push(' ');
                }
                last_was_space = true;
            } else {
                out.push(ch);
                last_was_space = false;
            }
        }
        out.trim().to_string()
    }
}

/// Caller-supplied summary of an actor's past interactions with
/// propositions. The engine never fetches this itself.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActorHistory {
    pub propositions_shown: u64,
    pub propositions_accepted: u64,
}

impl ActorHistory {
    /// Fraction of shown propositions this actor accepted, 0.0 when nothing
    /// has been shown yet.
    pub fn acceptance_rate(&self) -> f64 {
        if self.propositions_shown == 0 {
            return 0.0;
        }
        (self.propositions_accepted as f64 / self.propositions_shown as f64).min(1.0)
    }
}
