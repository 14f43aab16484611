//! # triage-rules
//!
//! Deterministic candidate generation: an ordered, versioned rule table
//! matched against sanitized incident descriptions. Always available, zero
//! external dependencies, and the final fallback layer when everything else
//! is degraded.

pub mod builtin;
pub mod matcher;
pub mod rule;
pub mod snapshot;

pub use matcher::{MatchMode, RuleMatcher};
pub use rule::Rule;
pub use snapshot::RuleSnapshot;
