//! Deterministic experiment bucketing.
//!
//! The same actor always lands in the same variant within a window: the
//! bucket is a stable hash of (window salt, actor id), never a per-request
//! random draw. Rotating the window means constructing an assigner with a
//! new salt.

use triage_core::hashing::stable_bucket;
use triage_core::models::{ExperimentAssignment, Incident, Variant};

#[derive(Debug, Clone)]
pub struct ExperimentAssigner {
    enabled: bool,
    salt: String,
}

impl ExperimentAssigner {
    pub fn new(enabled: bool, salt: &str) -> Self {
        Self {
            enabled,
            salt: salt.to_string(),
        }
    }

    /// Variant for an actor, or `None` when experiments are disabled.
    pub fn assign(&self, actor_id: &str) -> Option<Variant> {
        if !self.enabled {
            return None;
        }
        let variant = if stable_bucket(&self.salt, actor_id) % 2 == 0 {
            Variant::Control
        } else {
            Variant::Treatment
        };
        Some(variant)
    }

    /// Full assignment record for an incident.
    pub fn assignment(&self, incident: &Incident) -> Option<ExperimentAssignment> {
        self.assign(&incident.actor_id)
            .map(|variant| ExperimentAssignment {
                incident_id: incident.id.clone(),
                variant,
            })
    }
}
