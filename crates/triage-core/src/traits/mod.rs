//! Async boundary traits the engine is composed against. Implementations
//! live in the subsystem crates; test doubles implement them directly.

pub mod feedback_sink;
pub mod model_client;
pub mod shared_cache;

pub use feedback_sink::IFeedbackSink;
pub use model_client::{IModelClient, RankRequest, RankResponse, ScoredItem};
pub use shared_cache::ISharedCache;
