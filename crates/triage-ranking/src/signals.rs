//! Feature extraction. Pure, no I/O, and incapable of failing a request:
//! degenerate input produces zeroed/default fields instead of an error.

use chrono::{DateTime, Timelike, Utc};

use triage_core::models::{ActorHistory, FeatureVector, Incident};

use crate::tables::ScoringTables;

/// Half-life of the recency signal.
const RECENCY_HALF_LIFE_SECS: f64 = 3_600.0;

/// Derives a per-request feature vector from an incident and the caller's
/// actor-history summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalExtractor;

impl SignalExtractor {
    /// Extract features. `now` is passed in so extraction stays a pure
    /// function of its inputs.
    pub fn extract(
        &self,
        incident: &Incident,
        history: Option<&ActorHistory>,
        tables: &ScoringTables,
        now: DateTime<Utc>,
    ) -> FeatureVector {
        let age_secs = now
            .signed_duration_since(incident.occurred_at)
            .num_seconds()
            .max(0) as f64;
        let recency = (-age_secs * std::f64::consts::LN_2 / RECENCY_HALF_LIFE_SECS).exp();

        let hour = incident.occurred_at.hour() as f64;
        let angle = hour / 24.0 * std::f64::consts::TAU;

        FeatureVector {
            type_id: incident.incident_type.embedding_id(),
            severity: incident.severity.ordinal() as f64 / 3.0,
            recency,
            acceptance_rate: history.map(|h| h.acceptance_rate()).unwrap_or(0.0),
            frequency_percentile: tables.frequency_percentile(incident.incident_type),
            hour_sin: angle.sin(),
            hour_cos: angle.cos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use triage_core::models::{IncidentType, Severity};

    fn incident(occurred_at: DateTime<Utc>) -> Incident {
        Incident {
            id: "i".into(),
            incident_type: IncidentType::CiFailure,
            severity: Severity::Critical,
            description: "x".into(),
            occurred_at,
            actor_id: "a".into(),
        }
    }

    #[test]
    fn fresh_incident_has_full_recency() {
        let now = Utc::now();
        let fv = SignalExtractor.extract(&incident(now), None, &ScoringTables::builtin(), now);
        assert!((fv.recency - 1.0).abs() < 1e-9);
        assert_eq!(fv.severity, 1.0);
        assert_eq!(fv.acceptance_rate, 0.0);
    }

    #[test]
    fn recency_halves_each_half_life() {
        let now = Utc::now();
        let old = now - Duration::seconds(RECENCY_HALF_LIFE_SECS as i64);
        let fv = SignalExtractor.extract(&incident(old), None, &ScoringTables::builtin(), now);
        assert!((fv.recency - 0.5).abs() < 1e-6);
    }

    #[test]
    fn future_timestamps_clamp_to_full_recency() {
        let now = Utc::now();
        let future = now + Duration::seconds(600);
        let fv = SignalExtractor.extract(&incident(future), None, &ScoringTables::builtin(), now);
        assert!((fv.recency - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hour_encoding_is_cyclical() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let fv = SignalExtractor.extract(&incident(at), None, &ScoringTables::builtin(), at);
        assert!((fv.hour_sin - 0.0).abs() < 1e-9);
        assert!((fv.hour_cos - 1.0).abs() < 1e-9);
    }

    #[test]
    fn history_feeds_acceptance_rate() {
        let now = Utc::now();
        let history = ActorHistory {
            propositions_shown: 10,
            propositions_accepted: 7,
        };
        let fv = SignalExtractor.extract(
            &incident(now),
            Some(&history),
            &ScoringTables::builtin(),
            now,
        );
        assert!((fv.acceptance_rate - 0.7).abs() < 1e-9);
    }
}
