//! A single candidate-generation rule.

use regex::Regex;

use triage_core::errors::{TriageError, TriageResult};
use triage_core::models::{ActionKind, IncidentType};

/// One (pattern, candidate template, base confidence) entry.
///
/// Rules are matched in definition order; that order is the tie-break for
/// equal confidences downstream, so it is part of the rule table's contract.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub name: String,
    /// Incident types this rule applies to. Empty means all types.
    pub applies_to: Vec<IncidentType>,
    pub pattern: Regex,
    pub title: String,
    pub kind: ActionKind,
    pub steps: Vec<String>,
    /// Confidence assigned to the candidate when the pattern matches.
    pub base_confidence: f64,
    /// Disabled rules stay in the table (ordering is stable) but never match.
    pub enabled: bool,
}

impl Rule {
    /// Build a rule from a pattern source. Patterns are compiled
    /// case-insensitively; incident text casing is not meaningful.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        name: &str,
        applies_to: &[IncidentType],
        pattern: &str,
        title: &str,
        kind: ActionKind,
        steps: &[&str],
        base_confidence: f64,
    ) -> TriageResult<Self> {
        let pattern =
            Regex::new(&format!("(?i){pattern}")).map_err(|e| TriageError::InvalidConfig {
                reason: format!("rule {id}: bad pattern: {e}"),
            })?;
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            applies_to: applies_to.to_vec(),
            pattern,
            title: title.to_string(),
            kind,
            steps: steps.iter().map(|s| s.to_string()).collect(),
            base_confidence: base_confidence.clamp(0.0, 1.0),
            enabled: true,
        })
    }

    /// Whether this rule is eligible for the given incident type.
    pub fn applies_to_type(&self, incident_type: IncidentType) -> bool {
        self.applies_to.is_empty() || self.applies_to.contains(&incident_type)
    }
}
