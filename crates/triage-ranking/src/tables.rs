//! Precomputed scoring lookup tables.
//!
//! Refreshed out-of-band by swapping the whole snapshot; never mutated in
//! place. The version tag participates in cache-key namespacing together
//! with the rule snapshot version.

use std::collections::HashMap;

use triage_core::models::{ActionKind, IncidentType};

/// Immutable lookup snapshot: per-action frequency weights, per-type
/// frequency percentiles, and banded recency boosts.
#[derive(Debug, Clone)]
pub struct ScoringTables {
    version: String,
    frequency_weight: HashMap<ActionKind, f64>,
    frequency_percentile: HashMap<IncidentType, f64>,
    /// (minimum recency, boost) bands, highest minimum first.
    recency_bands: Vec<(f64, f64)>,
}

impl ScoringTables {
    pub fn new(
        version: &str,
        frequency_weight: HashMap<ActionKind, f64>,
        frequency_percentile: HashMap<IncidentType, f64>,
        recency_bands: Vec<(f64, f64)>,
    ) -> Self {
        let mut recency_bands = recency_bands;
        recency_bands.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Self {
            version: version.to_string(),
            frequency_weight,
            frequency_percentile,
            recency_bands,
        }
    }

    /// The shipped table. Weights hover around 1.0 so base confidences
    /// keep their meaning; acceptance data moves them out-of-band.
    pub fn builtin() -> Self {
        let frequency_weight = HashMap::from([
            (ActionKind::IncreaseTimeout, 1.05),
            (ActionKind::FixAssertion, 1.0),
            (ActionKind::FixBuild, 1.0),
            (ActionKind::PinDependencyVersions, 0.95),
            (ActionKind::RerunFlakyTests, 1.1),
            (ActionKind::FreeRunnerMemory, 0.95),
            (ActionKind::BlockSender, 1.05),
            (ActionKind::QuarantineFile, 1.0),
            (ActionKind::ReportPhishing, 1.05),
            (ActionKind::ForceCredentialReset, 0.95),
            (ActionKind::RateLimitSource, 0.95),
            (ActionKind::EscalateToSecurity, 0.9),
            (ActionKind::ManualReview, 0.9),
        ]);
        let frequency_percentile = HashMap::from([
            (IncidentType::CiFailure, 0.9),
            (IncidentType::Spam, 0.7),
            (IncidentType::Scam, 0.5),
            (IncidentType::Other, 0.2),
        ]);
        let recency_bands = vec![(0.8, 1.1), (0.5, 1.05), (0.2, 1.0), (0.0, 0.95)];
        Self::new("tables-builtin-1", frequency_weight, frequency_percentile, recency_bands)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Weight for an action kind; unknown kinds are neutral.
    pub fn frequency_weight(&self, kind: ActionKind) -> f64 {
        self.frequency_weight.get(&kind).copied().unwrap_or(1.0)
    }

    /// Global frequency percentile for an incident type.
    pub fn frequency_percentile(&self, incident_type: IncidentType) -> f64 {
        self.frequency_percentile
            .get(&incident_type)
            .copied()
            .unwrap_or(0.0)
    }

    /// Boost for a recency score, from the first band whose minimum the
    /// score reaches.
    pub fn recency_boost(&self, recency: f64) -> f64 {
        self.recency_bands
            .iter()
            .find(|(min, _)| recency >= *min)
            .map(|(_, boost)| *boost)
            .unwrap_or(1.0)
    }
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_bands_pick_highest_matching_minimum() {
        let tables = ScoringTables::builtin();
        assert_eq!(tables.recency_boost(0.95), 1.1);
        assert_eq!(tables.recency_boost(0.6), 1.05);
        assert_eq!(tables.recency_boost(0.01), 0.95);
    }

    #[test]
    fn unknown_kind_is_neutral() {
        let tables = ScoringTables::new("t", HashMap::new(), HashMap::new(), vec![]);
        assert_eq!(tables.frequency_weight(ActionKind::FixBuild), 1.0);
        assert_eq!(tables.recency_boost(0.5), 1.0);
    }
}
