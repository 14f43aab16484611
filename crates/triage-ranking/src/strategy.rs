//! The tagged ranking strategy: rule heuristic or learned model, selected
//! by configuration and substitutable behind one call shape.

use std::sync::Arc;

use triage_core::errors::RankingError;
use triage_core::models::proposition::assign_ranks;
use triage_core::models::{FeatureVector, Proposition, PropositionSource};
use triage_core::traits::{IModelClient, RankRequest, RankResponse};

use crate::heuristic::HeuristicRanker;

/// Scores and orders candidates. `rank == 1` is best; output is capped to
/// `top_k` before returning.
pub enum RankingStrategy {
    /// Pure computation against the scoring tables snapshot.
    RuleHeuristic(HeuristicRanker),
    /// Remote scoring with strict response validation.
    LearnedModel(Arc<dyn IModelClient>),
}

impl RankingStrategy {
    /// Rank candidates. The heuristic variant cannot fail; the learned
    /// variant returns an explicit error for every unavailability mode so
    /// the orchestrator can fall back.
    pub async fn rank(
        &self,
        candidates: &[Proposition],
        features: &FeatureVector,
        top_k: usize,
    ) -> Result<Vec<Proposition>, RankingError> {
        match self {
            RankingStrategy::RuleHeuristic(ranker) => {
                Ok(ranker.rank(candidates, features, top_k))
            }
            RankingStrategy::LearnedModel(client) => {
                let request = RankRequest {
                    features: features.clone(),
                    candidates: candidates.to_vec(),
                };
                let response = client.rank(&request).await?;
                merge_model_response(candidates, response, top_k)
            }
        }
    }

    pub fn is_learned(&self) -> bool {
        matches!(self, RankingStrategy::LearnedModel(_))
    }
}

/// Validate the model reply and merge it onto the candidate list.
///
/// Items echoing a candidate id become that candidate re-scored
/// (`source: Hybrid`); items with novel ids must carry a full template and
/// become model-originated propositions (`source: Ml`). Anything else is
/// outside the expected schema: an empty reply, a non-finite or
/// out-of-range score, or a novel id without a template.
fn merge_model_response(
    candidates: &[Proposition],
    response: RankResponse,
    top_k: usize,
) -> Result<Vec<Proposition>, RankingError> {
    if response.items.is_empty() {
        return Err(RankingError::MalformedResponse {
            reason: "empty item list".into(),
        });
    }

    let mut ranked = Vec::with_capacity(response.items.len());
    for item in response.items {
        if !item.score.is_finite() || !(0.0..=1.0).contains(&item.score) {
            return Err(RankingError::MalformedResponse {
                reason: format!("score {} out of range for {}", item.score, item.proposition_id),
            });
        }
        match candidates.iter().find(|c| c.id == item.proposition_id) {
            Some(candidate) => {
                let mut p = candidate.clone();
                p.confidence = item.score;
                p.source = PropositionSource::Hybrid;
                ranked.push(p);
            }
            None => {
                let (Some(title), Some(action)) = (item.title, item.action) else {
                    return Err(RankingError::MalformedResponse {
                        reason: format!("unknown candidate id {}", item.proposition_id),
                    });
                };
                ranked.push(Proposition {
                    id: item.proposition_id,
                    title,
                    action,
                    confidence: item.score,
                    source: PropositionSource::Ml,
                    rank: 0,
                });
            }
        }
    }

    ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_k);
    assign_ranks(&mut ranked);
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use triage_core::models::{ActionKind, ProposedAction};
    use triage_core::traits::ScoredItem;

    fn candidate(id: &str, confidence: f64) -> Proposition {
        Proposition {
            id: id.into(),
            title: id.into(),
            action: ProposedAction {
                kind: ActionKind::ManualReview,
                steps: vec![],
            },
            confidence,
            source: PropositionSource::Rule,
            rank: 0,
        }
    }

    struct FixedModel(Vec<ScoredItem>);

    #[async_trait]
    impl IModelClient for FixedModel {
        async fn rank(&self, _request: &RankRequest) -> Result<RankResponse, RankingError> {
            Ok(RankResponse {
                items: self.0.clone(),
            })
        }
    }

    fn item(id: &str, score: f64) -> ScoredItem {
        ScoredItem {
            proposition_id: id.into(),
            score,
            title: None,
            action: None,
        }
    }

    #[tokio::test]
    async fn model_scores_reorder_candidates_as_hybrid() {
        let strategy = RankingStrategy::LearnedModel(Arc::new(FixedModel(vec![
            item("a", 0.2),
            item("b", 0.9),
        ])));
        let ranked = strategy
            .rank(
                &[candidate("a", 0.8), candidate("b", 0.5)],
                &FeatureVector::default(),
                3,
            )
            .await
            .unwrap();
        assert_eq!(ranked[0].id, "b");
        assert_eq!(ranked[0].source, PropositionSource::Hybrid);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
    }

    #[tokio::test]
    async fn unknown_id_without_template_is_malformed() {
        let strategy =
            RankingStrategy::LearnedModel(Arc::new(FixedModel(vec![item("ghost", 0.9)])));
        let err = strategy
            .rank(&[candidate("a", 0.8)], &FeatureVector::default(), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn novel_item_with_template_is_model_originated() {
        let novel = ScoredItem {
            proposition_id: "ml_rate_limit".into(),
            score: 0.95,
            title: Some("Rate Limit the Source".into()),
            action: Some(ProposedAction {
                kind: ActionKind::RateLimitSource,
                steps: vec!["Apply a rate limit".into()],
            }),
        };
        let strategy = RankingStrategy::LearnedModel(Arc::new(FixedModel(vec![
            item("a", 0.4),
            novel,
        ])));
        let ranked = strategy
            .rank(&[candidate("a", 0.8)], &FeatureVector::default(), 3)
            .await
            .unwrap();
        assert_eq!(ranked[0].id, "ml_rate_limit");
        assert_eq!(ranked[0].source, PropositionSource::Ml);
    }

    #[tokio::test]
    async fn out_of_range_score_is_malformed() {
        let strategy =
            RankingStrategy::LearnedModel(Arc::new(FixedModel(vec![item("a", 1.7)])));
        let err = strategy
            .rank(&[candidate("a", 0.8)], &FeatureVector::default(), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn empty_reply_is_malformed() {
        let strategy = RankingStrategy::LearnedModel(Arc::new(FixedModel(vec![])));
        let err = strategy
            .rank(&[candidate("a", 0.8)], &FeatureVector::default(), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::MalformedResponse { .. }));
    }
}
