//! Error taxonomy. Dependency and budget errors are recovered inside the
//! orchestrator; only input and configuration errors reach the caller.

pub mod cache_error;
pub mod ranking_error;

pub use cache_error::CacheError;
pub use ranking_error::RankingError;

/// Top-level error for the triage engine.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid incident: {reason}")]
    InvalidIncident { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("feedback sink error: {reason}")]
    FeedbackSink { reason: String },
}

pub type TriageResult<T> = Result<T, TriageError>;
