//! Deterministic rule matching against sanitized incident text.

use std::sync::Arc;

use triage_core::models::{
    ActionKind, Incident, ProposedAction, Proposition, PropositionSource,
};

use crate::snapshot::RuleSnapshot;

/// Matching mode for the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Stop at the first matching rule.
    First,
    /// Union every matching rule's template, each keeping its own base
    /// confidence.
    #[default]
    Multi,
}

/// Matches incidents against a rule snapshot. Side-effect free and
/// deterministic: identical input against an identical snapshot always
/// yields the identical candidate list, in definition order.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    snapshot: Arc<RuleSnapshot>,
    mode: MatchMode,
}

impl RuleMatcher {
    pub fn new(snapshot: Arc<RuleSnapshot>, mode: MatchMode) -> Self {
        Self { snapshot, mode }
    }

    pub fn snapshot(&self) -> &Arc<RuleSnapshot> {
        &self.snapshot
    }

    /// Generate unranked candidates for an incident. Never empty: when no
    /// rule matches, a single low-confidence manual-review candidate is
    /// produced as the final fallback layer.
    pub fn match_incident(&self, incident: &Incident) -> Vec<Proposition> {
        let text = incident.sanitized_description();
        let mut candidates = Vec::new();

        for rule in self.snapshot.rules() {
            if !rule.enabled || !rule.applies_to_type(incident.incident_type) {
                continue;
            }
            if rule.pattern.is_match(&text) {
                candidates.push(Proposition {
                    id: rule.id.clone(),
                    title: rule.title.clone(),
                    action: ProposedAction {
                        kind: rule.kind,
                        steps: rule.steps.clone(),
                    },
                    confidence: rule.base_confidence,
                    source: PropositionSource::Rule,
                    rank: 0,
                });
                if self.mode == MatchMode::First {
                    break;
                }
            }
        }

        if candidates.is_empty() {
            candidates.push(fallback_candidate());
        }
        candidates
    }
}

/// Catch-all candidate when nothing in the table matched.
fn fallback_candidate() -> Proposition {
    Proposition {
        id: "fallback_review".into(),
        title: "Route for Manual Review".into(),
        action: ProposedAction {
            kind: ActionKind::ManualReview,
            steps: vec![
                "Inspect the incident".into(),
                "Attach context".into(),
                "Assign an owner".into(),
            ],
        },
        confidence: 0.3,
        source: PropositionSource::Rule,
        rank: 0,
    }
}
