//! Cache key derivation.
//!
//! Keys must stay cheap to build, bounded in cardinality, and free of
//! sensitive content: no free-text descriptions, no un-hashed actor ids.

use triage_core::hashing::actor_hash;
use triage_core::models::{CoarseBucket, IncidentType};

/// Key for the process-local tier: global per (type, coarse bucket).
pub fn local_key(version: &str, incident_type: IncidentType, bucket: CoarseBucket) -> String {
    format!("{version}:{}:{}", incident_type.key_tag(), bucket)
}

/// Key for the shared tier: personalized per (type, hashed actor).
pub fn shared_key(version: &str, incident_type: IncidentType, actor_id: &str) -> String {
    format!(
        "{version}:{}:actor:{}",
        incident_type.key_tag(),
        actor_hash(actor_id)
    )
}

/// Prefix covering every key written under a version tag.
pub fn version_prefix(version: &str) -> String {
    format!("{version}:")
}
