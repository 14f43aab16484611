//! Versioned, immutable rule snapshots.
//!
//! Refresh is a whole-snapshot swap, never in-place mutation, so concurrent
//! readers always see a consistent table. The version tag also namespaces
//! cache keys: bumping it makes every cached ranking unreachable.

use crate::rule::Rule;

/// An immutable rule table plus its content-derived version tag.
#[derive(Debug)]
pub struct RuleSnapshot {
    rules: Vec<Rule>,
    version: String,
}

impl RuleSnapshot {
    /// Freeze a rule list into a snapshot. The version tag is a blake3
    /// digest over rule ids, pattern sources, and confidences, so any
    /// table edit produces a new tag.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        let mut hasher = blake3::Hasher::new();
        for rule in &rules {
            hasher.update(rule.id.as_bytes());
            hasher.update(b"\x00");
            hasher.update(rule.pattern.as_str().as_bytes());
            hasher.update(b"\x00");
            hasher.update(&rule.base_confidence.to_le_bytes());
            hasher.update(&[rule.enabled as u8]);
        }
        let version = hasher.finalize().to_hex()[..12].to_string();
        Self { rules, version }
    }

    /// Rules in definition order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::models::ActionKind;

    fn rule(id: &str, confidence: f64) -> Rule {
        Rule::new(
            id,
            "r",
            &[],
            "x",
            "t",
            ActionKind::ManualReview,
            &[],
            confidence,
        )
        .unwrap()
    }

    #[test]
    fn version_changes_with_table_content() {
        let a = RuleSnapshot::from_rules(vec![rule("r1", 0.5)]);
        let b = RuleSnapshot::from_rules(vec![rule("r1", 0.6)]);
        let c = RuleSnapshot::from_rules(vec![rule("r1", 0.5)]);
        assert_ne!(a.version(), b.version());
        assert_eq!(a.version(), c.version());
    }
}
