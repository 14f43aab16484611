//! Feature vectors derived from an incident, and the coarse bucket used for
//! cache keying.
//!
//! A `FeatureVector` lives for one request only and is never persisted as-is.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::incident::Incident;

/// Named numeric features extracted from an incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Categorical embedding id of the incident type.
    pub type_id: u8,
    /// Severity ordinal scaled to [0.0, 1.0].
    pub severity: f64,
    /// Exponential-decay recency score in (0.0, 1.0]; 1.0 = just occurred.
    pub recency: f64,
    /// Actor's historical acceptance rate, 0.0 without history.
    pub acceptance_rate: f64,
    /// Global frequency percentile of this incident type, from the scoring
    /// tables snapshot.
    pub frequency_percentile: f64,
    /// Cyclical hour-of-day encoding.
    pub hour_sin: f64,
    pub hour_cos: f64,
}

/// Coarse feature bucket derived from the incident alone (severity band ×
/// time-of-day quadrant). Computable before full feature extraction, so the
/// local cache can be consulted first. Carries no description text and no
/// actor identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoarseBucket(u8);

impl CoarseBucket {
    pub fn from_incident(incident: &Incident) -> Self {
        let quadrant = (incident.occurred_at.hour() / 6) as u8; // 0..=3
        CoarseBucket(incident.severity.ordinal() * 4 + quadrant)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CoarseBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b{:02}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::incident::{IncidentType, Severity};
    use chrono::{TimeZone, Utc};

    #[test]
    fn bucket_combines_severity_and_hour_quadrant() {
        let incident = Incident {
            id: "i".into(),
            incident_type: IncidentType::CiFailure,
            severity: Severity::Critical,
            description: String::new(),
            occurred_at: Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).unwrap(),
            actor_id: "a".into(),
        };
        // severity 3, hour 13 → quadrant 2 → 3*4+2.
        assert_eq!(CoarseBucket::from_incident(&incident).as_u8(), 14);
    }
}
