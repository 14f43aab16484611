/// Ranking subsystem errors. Every variant is an explicit "unavailable"
/// signal the orchestrator turns into a rules-only fallback.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("model endpoint unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("model response outside expected schema: {reason}")]
    MalformedResponse { reason: String },

    #[error("model call exceeded {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },

    #[error("learned backend selected but no model endpoint configured")]
    NotConfigured,
}
