//! The per-request orchestrator.
//!
//! State machine: RECEIVED → CACHE_CHECK → (HIT → RESPOND) |
//! (MISS → EXTRACT_FEATURES → RANK → CACHE_WRITE → RESPOND), terminating in
//! RESPOND or DEGRADED_RESPOND. Every dependency or budget failure is
//! recovered here; callers always get a response.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::Utc;
use uuid::Uuid;

use triage_cache::{CacheManager, CacheStats, CacheTier};
use triage_core::config::{RankingBackend, TriageConfig};
use triage_core::errors::{RankingError, TriageError, TriageResult};
use triage_core::models::{
    ActorHistory, CoarseBucket, FeatureVector, FeedbackAction, FeedbackRecord, Incident,
    Proposition, PropositionSource, SuggestResponse,
};
use triage_core::traits::{IFeedbackSink, IModelClient, ISharedCache};
use triage_observability::EngineMetrics;
use triage_ranking::{
    HeuristicRanker, ModelClient, ModelClientConfig, RankingStrategy, ScoringTables,
    SignalExtractor,
};
use triage_rules::builtin::builtin_snapshot;
use triage_rules::{MatchMode, RuleMatcher, RuleSnapshot};

use crate::experiment::ExperimentAssigner;
use crate::feedback::{FeedbackLogger, MemoryFeedbackSink};

/// Version tags of the snapshots currently serving. Composed into the
/// cache namespace, so bumping any part strands every cached ranking.
#[derive(Debug, Clone)]
struct VersionSet {
    rules: String,
    tables: String,
    model: String,
}

impl VersionSet {
    fn composed(&self) -> String {
        format!("{}-{}-{}", self.rules, self.tables, self.model)
    }
}

/// Builder for [`SuggestionEngine`]. Collaborator boundaries default to
/// in-process implementations; production wiring injects real ones.
pub struct EngineBuilder {
    config: TriageConfig,
    match_mode: MatchMode,
    snapshot: Option<Arc<RuleSnapshot>>,
    tables: Option<Arc<ScoringTables>>,
    shared_cache: Option<Arc<dyn ISharedCache>>,
    model_client: Option<Arc<dyn IModelClient>>,
    feedback_sink: Option<Arc<dyn IFeedbackSink>>,
}

impl EngineBuilder {
    pub fn new(config: TriageConfig) -> Self {
        Self {
            config,
            match_mode: MatchMode::Multi,
            snapshot: None,
            tables: None,
            shared_cache: None,
            model_client: None,
            feedback_sink: None,
        }
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn rule_snapshot(mut self, snapshot: Arc<RuleSnapshot>) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn scoring_tables(mut self, tables: Arc<ScoringTables>) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn shared_cache(mut self, shared: Arc<dyn ISharedCache>) -> Self {
        self.shared_cache = Some(shared);
        self
    }

    /// Override the model client (the `learned_model` backend otherwise
    /// builds one from `ranking.model_endpoint`).
    pub fn model_client(mut self, client: Arc<dyn IModelClient>) -> Self {
        self.model_client = Some(client);
        self
    }

    pub fn feedback_sink(mut self, sink: Arc<dyn IFeedbackSink>) -> Self {
        self.feedback_sink = Some(sink);
        self
    }

    pub fn build(self) -> TriageResult<SuggestionEngine> {
        let config = self.config;

        let snapshot = match self.snapshot {
            Some(s) => s,
            None => Arc::new(builtin_snapshot()?),
        };
        let tables = self
            .tables
            .unwrap_or_else(|| Arc::new(ScoringTables::builtin()));

        let versions = VersionSet {
            rules: snapshot.version().to_string(),
            tables: tables.version().to_string(),
            model: "m0".to_string(),
        };
        let cache = Arc::new(CacheManager::new(
            config.cache.clone(),
            self.shared_cache,
            versions.composed(),
        ));

        let fallback = HeuristicRanker::new(tables.clone());
        let strategy = match config.ranking.backend {
            RankingBackend::RuleHeuristic => RankingStrategy::RuleHeuristic(fallback.clone()),
            RankingBackend::LearnedModel => {
                let client: Arc<dyn IModelClient> = match self.model_client {
                    Some(client) => client,
                    None => {
                        let endpoint = config
                            .ranking
                            .model_endpoint
                            .as_deref()
                            .ok_or(TriageError::Ranking(RankingError::NotConfigured))?;
                        Arc::new(
                            ModelClient::new(ModelClientConfig::new(
                                endpoint,
                                config.ranking.model_timeout_ms,
                            ))
                            .map_err(TriageError::Ranking)?,
                        )
                    }
                };
                RankingStrategy::LearnedModel(client)
            }
        };

        let metrics = Arc::new(EngineMetrics::new());
        let sink = self
            .feedback_sink
            .unwrap_or_else(|| Arc::new(MemoryFeedbackSink::default()));
        let feedback = FeedbackLogger::new(sink, metrics.clone());
        let assigner = ExperimentAssigner::new(
            config.engine.experiment_enabled,
            &config.engine.experiment_salt,
        );

        Ok(SuggestionEngine {
            matcher: RwLock::new(RuleMatcher::new(snapshot, self.match_mode)),
            match_mode: self.match_mode,
            extractor: SignalExtractor,
            tables,
            strategy,
            fallback,
            cache,
            assigner,
            feedback,
            metrics,
            versions: RwLock::new(versions),
            config,
        })
    }
}

/// The suggestion engine entry point. One instance serves concurrent
/// requests; per-request state lives on the stack.
pub struct SuggestionEngine {
    config: TriageConfig,
    matcher: RwLock<RuleMatcher>,
    match_mode: MatchMode,
    extractor: SignalExtractor,
    tables: Arc<ScoringTables>,
    strategy: RankingStrategy,
    /// Rules-only ranker used when the configured strategy is unavailable.
    fallback: HeuristicRanker,
    cache: Arc<CacheManager>,
    assigner: ExperimentAssigner,
    feedback: FeedbackLogger,
    metrics: Arc<EngineMetrics>,
    versions: RwLock<VersionSet>,
}

impl SuggestionEngine {
    pub fn builder(config: TriageConfig) -> EngineBuilder {
        EngineBuilder::new(config)
    }

    /// Produce ranked propositions for an incident.
    ///
    /// Never fails: malformed input yields an empty flagged response, and
    /// every dependency or budget problem degrades to rule output.
    pub async fn suggest(
        &self,
        incident: &Incident,
        history: Option<&ActorHistory>,
    ) -> SuggestResponse {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        self.metrics.record_request();

        let variant = self.assigner.assign(&incident.actor_id);

        if let Err(e) = incident.validate() {
            self.metrics.record_invalid_request();
            tracing::debug!(%request_id, error = %e, "rejecting malformed incident");
            return SuggestResponse::invalid_input(variant);
        }

        let bucket = CoarseBucket::from_incident(incident);

        if let Some((propositions, tier)) = self.cache.lookup(incident, bucket).await {
            match tier {
                CacheTier::Local => self.metrics.record_local_hit(),
                CacheTier::Shared => self.metrics.record_shared_hit(),
            }
            let response = self.respond(propositions, variant, false);
            tracing::debug!(
                %request_id,
                ?tier,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "served from cache"
            );
            return response;
        }

        let matcher = {
            self.matcher
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        };
        let candidates = matcher.match_incident(incident);
        let features = self
            .extractor
            .extract(incident, history, &self.tables, Utc::now());

        let (propositions, degraded) = self
            .rank_within_budget(&candidates, &features, started)
            .await;
        self.metrics.record_computed();
        if degraded {
            self.metrics.record_degraded();
        } else {
            // DEGRADED_RESPOND bypasses the cache write: a rules-only list
            // must not shadow the learned ranking for a whole TTL.
            self.cache.write_back(incident, bucket, &propositions);
        }

        let response = self.respond(propositions, variant, degraded);
        tracing::debug!(
            %request_id,
            degraded,
            source = ?response.source,
            count = response.propositions.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "computed response"
        );
        response
    }

    /// Run the configured strategy inside the wall-clock budget, retrying
    /// the learned path on the configured backoff schedule. Falls back to
    /// the rule heuristic on exhaustion, timeout, or any model error.
    async fn rank_within_budget(
        &self,
        candidates: &[Proposition],
        features: &FeatureVector,
        started: Instant,
    ) -> (Vec<Proposition>, bool) {
        let top_k = self.config.engine.top_k;
        let budget = Duration::from_millis(self.config.engine.latency_budget_ms);

        if !self.strategy.is_learned() {
            return (self.fallback.rank(candidates, features, top_k), false);
        }

        let per_attempt = Duration::from_millis(self.config.ranking.model_timeout_ms);
        let mut attempt: u32 = 0;
        loop {
            let Some(remaining) = budget.checked_sub(started.elapsed()) else {
                self.metrics.record_budget_exceeded();
                break;
            };

            let cap = remaining.min(per_attempt);
            match tokio::time::timeout(cap, self.strategy.rank(candidates, features, top_k))
                .await
            {
                Ok(Ok(ranked)) => return (ranked, false),
                Ok(Err(e)) => {
                    self.metrics.record_model_failure();
                    tracing::warn!(attempt, error = %e, "learned ranking unavailable");
                }
                Err(_) => {
                    // The in-flight call is dropped, not awaited further.
                    self.metrics.record_model_failure();
                    tracing::warn!(attempt, cap_ms = cap.as_millis() as u64, "learned ranking timed out");
                }
            }

            if attempt >= self.config.engine.retry_attempts {
                break;
            }
            let delay = self.backoff_delay(attempt);
            if started.elapsed() + delay >= budget {
                // A retry that cannot fit the budget is skipped outright.
                self.metrics.record_budget_exceeded();
                break;
            }
            tokio::time::sleep(delay).await;
            attempt += 1;
        }

        (self.fallback.rank(candidates, features, top_k), true)
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let schedule = &self.config.engine.retry_backoff_ms;
        let ms = schedule
            .get(attempt as usize)
            .or_else(|| schedule.last())
            .copied()
            .unwrap_or(0);
        Duration::from_millis(ms)
    }

    fn respond(
        &self,
        propositions: Vec<Proposition>,
        variant: Option<triage_core::models::Variant>,
        degraded: bool,
    ) -> SuggestResponse {
        let source = propositions
            .first()
            .map(|p| p.source)
            .unwrap_or(PropositionSource::Rule);
        SuggestResponse {
            propositions,
            variant,
            source,
            degraded,
            invalid_input: false,
        }
    }

    /// Record an actor's outcome for a shown proposition. The append is
    /// detached; an accepted proposition additionally invalidates the
    /// actor's personalized cache entry (their context just changed).
    pub fn record_feedback(
        &self,
        incident: &Incident,
        proposition: &Proposition,
        action: FeedbackAction,
        resolution_latency_ms: Option<u64>,
    ) {
        let record = FeedbackRecord {
            incident_id: incident.id.clone(),
            proposition_id: proposition.id.clone(),
            rank_position: proposition.rank,
            action_taken: action,
            resolution_latency_ms,
            source: proposition.source,
            created_at: Utc::now(),
        };
        self.feedback.record(record);

        if action == FeedbackAction::Accepted {
            self.metrics.record_actor_invalidation();
            let cache = self.cache.clone();
            let incident_type = incident.incident_type;
            let actor_id = incident.actor_id.clone();
            tokio::spawn(async move {
                cache.invalidate_actor(incident_type, &actor_id).await;
            });
        }
    }

    /// Swap in a new rule snapshot (rule-table redeploy). All cached
    /// rankings from the previous table become unreachable.
    pub async fn refresh_rules(&self, snapshot: Arc<RuleSnapshot>) {
        {
            let mut matcher = self.matcher.write().unwrap_or_else(PoisonError::into_inner);
            *matcher = RuleMatcher::new(snapshot.clone(), self.match_mode);
        }
        let composed = {
            let mut versions = self
                .versions
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            versions.rules = snapshot.version().to_string();
            versions.composed()
        };
        self.cache.invalidate_version(&composed).await;
    }

    /// Note a model redeploy. Cached rankings scored by the previous model
    /// become unreachable.
    pub async fn notify_model_redeploy(&self, model_version: &str) {
        let composed = {
            let mut versions = self
                .versions
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            versions.model = model_version.to_string();
            versions.composed()
        };
        self.cache.invalidate_version(&composed).await;
    }

    /// Version tag current cache entries are written under.
    pub fn cache_version(&self) -> String {
        self.cache.version()
    }

    pub fn metrics(&self) -> &Arc<EngineMetrics> {
        &self.metrics
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }
}
