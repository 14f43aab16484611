//! Default values for all configuration surfaces.

/// Maximum propositions returned per request.
pub const DEFAULT_TOP_K: usize = 3;

/// Process-local cache TTL.
pub const DEFAULT_CACHE_TTL_LOCAL_S: u64 = 300; // 5 minutes

/// Shared (personalized) cache TTL.
pub const DEFAULT_CACHE_TTL_SHARED_S: u64 = 1800; // 30 minutes

/// Bounded size of the process-local cache.
pub const DEFAULT_LOCAL_CACHE_CAPACITY: u64 = 1_024;

/// Hard timeout on shared-cache reads.
pub const DEFAULT_SHARED_CACHE_TIMEOUT_MS: u64 = 20;

/// Wall-clock budget for cache + compute per request.
pub const DEFAULT_LATENCY_BUDGET_MS: u64 = 100;

/// Retry budget against the remote ranking endpoint.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;

/// Backoff delays before each retry attempt.
pub const DEFAULT_RETRY_BACKOFF_MS: [u64; 2] = [20, 50];

/// Per-attempt timeout for the model-serving call.
pub const DEFAULT_MODEL_TIMEOUT_MS: u64 = 40;

pub const DEFAULT_EXPERIMENT_ENABLED: bool = true;

/// Salt naming the active experiment window.
pub const DEFAULT_EXPERIMENT_SALT: &str = "triage-window-1";

/// Upper bound on incident description size.
pub const MAX_DESCRIPTION_BYTES: usize = 50 * 1024;
