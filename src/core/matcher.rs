use crate::core::{
    candidates::enumerate_pairs,
    overlap::{overlap_with_threshold, MIN_OVERLAP_HOURS},
    ranker::{flatten_pairs, rank_pairs, DEFAULT_TOP_K},
    scoring::calculate_pair_score,
};
use crate::models::{Creator, ScoredPair, ScoringWeights, SessionRequest};

/// Result of the matching process
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// Creators of the selected pairs, pair-adjacent, best pair first
    pub creators: Vec<Creator>,
    pub pairs: Vec<ScoredPair>,
    pub total_candidates: usize,
    /// Pairs that passed both schedule checks and were scored
    pub scored_pairs: usize,
}

/// Main matching orchestrator - local deterministic pipeline
///
/// # Pipeline Stages
/// 1. Pair enumeration with the shared-date pre-filter
/// 2. Daily window overlap (minimum threshold)
/// 3. Scoring
/// 4. Stable ranking and top-K selection
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    min_overlap_hours: f64,
    top_k: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, min_overlap_hours: f64, top_k: usize) -> Self {
        Self {
            weights,
            min_overlap_hours,
            top_k,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), MIN_OVERLAP_HOURS, DEFAULT_TOP_K)
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Find the best pairs in `creators` using the configured `top_k`
    pub fn find_matches(&self, request: &SessionRequest, creators: &[Creator]) -> MatchResult {
        self.find_matches_with_limit(request, creators, self.top_k)
    }

    /// Find the best pairs in `creators`
    ///
    /// The request is only used for logging: required roles, genre and date
    /// do not filter or weight pairs. Never fails; "no matches" is an empty
    /// result.
    pub fn find_matches_with_limit(
        &self,
        request: &SessionRequest,
        creators: &[Creator],
        limit: usize,
    ) -> MatchResult {
        let total_candidates = creators.len();

        if total_candidates < 2 {
            tracing::debug!("Not enough creators to pair ({})", total_candidates);
            return MatchResult {
                total_candidates,
                ..MatchResult::default()
            };
        }

        let scored: Vec<ScoredPair> = enumerate_pairs(creators)
            .filter_map(|pair| {
                let overlap = overlap_with_threshold(
                    &pair.first.time_range(),
                    &pair.second.time_range(),
                    self.min_overlap_hours,
                );

                if !overlap.overlaps {
                    tracing::trace!(
                        "Skipping {} / {}: {:.2}h overlap",
                        pair.first.id(),
                        pair.second.id(),
                        overlap.hours
                    );
                    return None;
                }

                let (score, shared_genres) = calculate_pair_score(&pair, &overlap, &self.weights);

                Some(ScoredPair {
                    first: pair.first.clone(),
                    second: pair.second.clone(),
                    common_dates: pair.common_dates,
                    overlap_hours: overlap.hours,
                    shared_genres,
                    score,
                })
            })
            .collect();

        let scored_pairs = scored.len();
        let pairs = rank_pairs(scored, limit);
        let creators = flatten_pairs(&pairs);

        tracing::debug!(
            "Session '{}': {} creators, {} schedulable pairs, {} selected",
            request.title,
            total_candidates,
            scored_pairs,
            pairs.len()
        );

        MatchResult {
            creators,
            pairs,
            total_candidates,
            scored_pairs,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
