//! # triage-ranking
//!
//! Turns an incident into a feature vector and a candidate list into a
//! ranked proposition list. Two interchangeable strategies behind one
//! tagged enum:
//!
//! ```text
//! RankingStrategy
//! ├── RuleHeuristic        deterministic, no I/O
//! │   └── ScoringTables    immutable versioned lookup snapshot
//! └── LearnedModel         bounded-latency remote call
//!     └── IModelClient     reqwest-backed, strict response validation
//! ```
//!
//! Both variants emit the same shape: top-K propositions with 1-based,
//! strictly increasing ranks.

pub mod heuristic;
pub mod remote;
pub mod signals;
pub mod strategy;
pub mod tables;

pub use heuristic::HeuristicRanker;
pub use remote::{ModelClient, ModelClientConfig};
pub use signals::SignalExtractor;
pub use strategy::RankingStrategy;
pub use tables::ScoringTables;
