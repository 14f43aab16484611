//! Deterministic rule-heuristic ranking.

use std::sync::Arc;

use triage_core::models::proposition::assign_ranks;
use triage_core::models::{FeatureVector, Proposition};

use crate::tables::ScoringTables;

/// Scores candidates as `base_confidence * frequency_weight *
/// recency_boost` against an injected table snapshot. No I/O, no failure
/// modes; ties keep candidate (rule-definition) order.
#[derive(Debug, Clone)]
pub struct HeuristicRanker {
    tables: Arc<ScoringTables>,
}

impl HeuristicRanker {
    pub fn new(tables: Arc<ScoringTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &Arc<ScoringTables> {
        &self.tables
    }

    /// Rank candidates and cap to `top_k`. Ranks come out 1-based and
    /// strictly increasing.
    pub fn rank(
        &self,
        candidates: &[Proposition],
        features: &FeatureVector,
        top_k: usize,
    ) -> Vec<Proposition> {
        let boost = self.tables.recency_boost(features.recency);

        let mut ranked: Vec<Proposition> = candidates
            .iter()
            .map(|c| {
                let score =
                    c.confidence * self.tables.frequency_weight(c.action.kind) * boost;
                let mut p = c.clone();
                p.confidence = score.clamp(0.0, 1.0);
                p
            })
            .collect();

        // Stable sort: equal scores preserve rule-definition order.
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(top_k);
        assign_ranks(&mut ranked);
        ranked
    }
}
