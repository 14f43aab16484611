//! Propositions: ranked, actionable suggestions emitted by the engine.

use serde::{Deserialize, Serialize};

/// Structured action category a proposition recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    IncreaseTimeout,
    FixAssertion,
    FixBuild,
    PinDependencyVersions,
    RerunFlakyTests,
    FreeRunnerMemory,
    BlockSender,
    QuarantineFile,
    ReportPhishing,
    ForceCredentialReset,
    RateLimitSource,
    EscalateToSecurity,
    ManualReview,
}

/// A recommended action plus its concrete remediation steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedAction {
    pub kind: ActionKind,
    pub steps: Vec<String>,
}

/// Which path produced a proposition.
///
/// `Hybrid` marks rule-generated candidates re-scored by the learned model;
/// `Ml` marks candidates the model itself originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropositionSource {
    Rule,
    Ml,
    Hybrid,
}

/// A single ranked suggestion. Immutable once emitted; safe to cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposition {
    pub id: String,
    pub title: String,
    pub action: ProposedAction,
    /// Score in [0.0, 1.0].
    pub confidence: f64,
    pub source: PropositionSource,
    /// 1-based position after sorting; 0 until ranking assigns it.
    pub rank: u32,
}

/// Re-number `rank` fields 1..=n in the list's current order.
pub fn assign_ranks(propositions: &mut [Proposition]) {
    for (i, p) in propositions.iter_mut().enumerate() {
        p.rank = (i + 1) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposition(confidence: f64) -> Proposition {
        Proposition {
            id: "p".into(),
            title: "t".into(),
            action: ProposedAction {
                kind: ActionKind::ManualReview,
                steps: vec![],
            },
            confidence,
            source: PropositionSource::Rule,
            rank: 0,
        }
    }

    #[test]
    fn ranks_are_one_based_and_increasing() {
        let mut list = vec![proposition(0.9), proposition(0.5), proposition(0.1)];
        assign_ranks(&mut list);
        assert_eq!(
            list.iter().map(|p| p.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
