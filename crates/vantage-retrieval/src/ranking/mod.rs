//! RankingPipeline: score → sort → threshold → truncate.

pub mod authority;
pub mod scorer;

use chrono::{DateTime, Utc};
use tracing::warn;
use vantage_core::config::{RankingWeights, RetrievalConfig};
use vantage_core::models::{CandidateResult, RankedResult, ScoreBreakdown};
use vantage_core::text::tokenize;

pub use authority::AuthorityTable;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingOutcome {
    pub results: Vec<RankedResult>,
    /// Candidates whose scoring produced a non-finite factor.
    pub dropped: usize,
    /// Ranked results removed by the threshold.
    pub below_threshold: usize,
}

#[derive(Debug, Clone)]
pub struct RankingPipeline {
    weights: RankingWeights,
    authority: AuthorityTable,
}

impl RankingPipeline {
    pub fn new(weights: RankingWeights, authority: AuthorityTable) -> Self {
        Self { weights, authority }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.weights, AuthorityTable::from_config(config))
    }

    /// Rank fused candidates against `query`.
    ///
    /// Ties on composite score go to the higher-priority strategy, then to
    /// fusion order. The threshold applies before truncation to `top_k`.
    pub fn rank(
        &self,
        query: &str,
        candidates: Vec<CandidateResult>,
        top_k: usize,
        threshold: Option<f64>,
        now: DateTime<Utc>,
    ) -> RankingOutcome {
        let terms = tokenize(query);

        // Stage 1: per-candidate factors; non-finite scoring drops the candidate.
        let mut dropped = 0;
        let mut survivors: Vec<(CandidateResult, ScoreBreakdown)> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let breakdown = ScoreBreakdown {
                content_relevance: scorer::relevance(&terms, &candidate.content),
                title_relevance: scorer::relevance(&terms, &candidate.title),
                freshness: scorer::freshness(candidate.timestamp, now),
                authority: self.authority.score(&candidate),
                diversity: 0.0,
            };
            let finite = [
                breakdown.content_relevance,
                breakdown.title_relevance,
                breakdown.freshness,
                breakdown.authority,
            ]
            .iter()
            .all(|f| f.is_finite());
            if finite {
                survivors.push((candidate, breakdown));
            } else {
                warn!(key = %candidate.identity_key(), "dropping candidate with non-finite score");
                dropped += 1;
            }
        }

        // Stage 2: diversity against the other survivors, then the composite.
        let survivor_candidates: Vec<CandidateResult> =
            survivors.iter().map(|(c, _)| c.clone()).collect();
        let word_sets = scorer::word_sets(&survivor_candidates);
        let mut ranked: Vec<(usize, RankedResult)> = survivors
            .into_iter()
            .enumerate()
            .map(|(i, (candidate, mut breakdown))| {
                breakdown.diversity = scorer::diversity(i, &word_sets);
                let score = scorer::composite(&breakdown, &self.weights);
                let result = RankedResult {
                    candidate: candidate.with_score(score),
                    score,
                    breakdown,
                };
                (i, result)
            })
            .collect();

        // Stage 3: order.
        ranked.sort_by(|(ia, a), (ib, b)| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.candidate
                        .source_strategy
                        .priority()
                        .cmp(&b.candidate.source_strategy.priority())
                })
                .then_with(|| ia.cmp(ib))
        });

        // Stage 4: threshold, then top-k.
        let before = ranked.len();
        let mut results: Vec<RankedResult> = ranked
            .into_iter()
            .map(|(_, r)| r)
            .filter(|r| threshold.map_or(true, |t| r.score >= t))
            .collect();
        let below_threshold = before - results.len();
        results.truncate(top_k);

        RankingOutcome {
            results,
            dropped,
            below_threshold,
        }
    }
}

impl Default for RankingPipeline {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}
