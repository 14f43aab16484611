/// Shared-cache boundary errors. The cache manager treats every one of
/// these as a miss; they never propagate past it.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("shared cache unreachable: {reason}")]
    Unavailable { reason: String },

    #[error("cache entry could not be (de)serialized: {reason}")]
    Serialization { reason: String },
}
