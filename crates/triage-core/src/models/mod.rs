pub mod cache;
pub mod experiment;
pub mod feedback;
pub mod features;
pub mod incident;
pub mod proposition;
pub mod response;

pub use cache::CacheEntry;
pub use experiment::{ExperimentAssignment, Variant};
pub use feedback::{FeedbackAction, FeedbackRecord};
pub use features::{CoarseBucket, FeatureVector};
pub use incident::{ActorHistory, Incident, IncidentType, Severity};
pub use proposition::{ActionKind, ProposedAction, Proposition, PropositionSource};
pub use response::SuggestResponse;
