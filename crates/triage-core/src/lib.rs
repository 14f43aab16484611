//! # triage-core
//!
//! Shared foundation for the predictive suggestion engine: data models
//! (incidents, propositions, feature vectors, feedback), the configuration
//! surface, the error taxonomy, and the async boundary traits the engine is
//! composed against.

pub mod config;
pub mod errors;
pub mod hashing;
pub mod models;
pub mod traits;

pub use config::TriageConfig;
pub use errors::{TriageError, TriageResult};
pub use models::incident::{ActorHistory, Incident, IncidentType, Severity};
pub use models::proposition::{ActionKind, ProposedAction, Proposition, PropositionSource};
pub use models::response::SuggestResponse;
