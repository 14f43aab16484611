//! # triage-engine
//!
//! The suggestion engine entry point. Composes the subsystem crates into
//! the per-request pipeline:
//!
//! ```text
//! SuggestionEngine::suggest(incident, actor_history)
//! ├── ExperimentAssigner      stable-hash variant bucketing
//! ├── CacheManager            local tier → shared tier → compute
//! ├── RuleMatcher             deterministic candidate generation
//! ├── SignalExtractor         incident → feature vector (pure)
//! ├── RankingStrategy         rule heuristic | learned model
//! │   └── budgeted retries    backoff inside the wall-clock budget
//! └── FeedbackLogger          detached outcome appends
//! ```
//!
//! Degradation policy: the learned path failing, timing out, or overrunning
//! the budget falls back to rule-heuristic output with `degraded: true`;
//! rules as the configured default are not degradation.

pub mod experiment;
pub mod feedback;
pub mod orchestrator;

pub use experiment::ExperimentAssigner;
pub use feedback::{FeedbackLogger, MemoryFeedbackSink};
pub use orchestrator::{EngineBuilder, SuggestionEngine};
