use crate::models::{Creator, ScoredPair};
use std::cmp::Ordering;

/// Number of pairs returned when the caller does not ask for a limit
pub const DEFAULT_TOP_K: usize = 3;

/// Keep the `k` best pairs, best first
///
/// The sort is stable, so among equal scores the pair enumerated first wins.
pub fn rank_pairs(mut pairs: Vec<ScoredPair>, k: usize) -> Vec<ScoredPair> {
    pairs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    pairs.truncate(k);
    pairs
}

/// Flatten ranked pairs into `[a1, b1, a2, b2, ...]`
///
/// A creator appearing in several pairs is repeated.
pub fn flatten_pairs(pairs: &[ScoredPair]) -> Vec<Creator> {
    pairs
        .iter()
        .flat_map(|p| [p.first.clone(), p.second.clone()])
        .collect()
}

/// Rank and flatten in one step
pub fn select(pairs: Vec<ScoredPair>, k: usize) -> Vec<Creator> {
    flatten_pairs(&rank_pairs(pairs, k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatorType, TimeRange};
    use chrono::NaiveDate;

    fn creator(id: &str) -> Creator {
        Creator::new(
            id,
            id,
            CreatorType::Writer,
            [NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()],
            TimeRange::parse("09:00 - 17:00").unwrap(),
            vec![],
        )
        .unwrap()
    }

    fn pair(a: &str, b: &str, score: f64) -> ScoredPair {
        ScoredPair {
            first: creator(a),
            second: creator(b),
            common_dates: vec![],
            overlap_hours: 0.0,
            shared_genres: vec![],
            score,
        }
    }

    fn ids(creators: &[Creator]) -> Vec<&str> {
        creators.iter().map(|c| c.id()).collect()
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let pairs = vec![pair("a", "b", 10.0), pair("c", "d", 30.0), pair("e", "f", 20.0), pair("g", "h", 5.0)];
        let selected = select(pairs, 3);
        assert_eq!(ids(&selected), vec!["c", "d", "e", "f", "a", "b"]);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let pairs = vec![pair("a", "b", 10.0), pair("c", "d", 10.0), pair("e", "f", 10.0)];
        let ranked = rank_pairs(pairs, 2);
        assert_eq!(ranked[0].first.id(), "a");
        assert_eq!(ranked[1].first.id(), "c");
    }

    #[test]
    fn test_k_larger_than_pairs() {
        let pairs = vec![pair("a", "b", 1.0)];
        assert_eq!(select(pairs, 10).len(), 2);
        assert!(select(vec![], DEFAULT_TOP_K).is_empty());
    }

    #[test]
    fn test_duplicates_not_removed() {
        let pairs = vec![pair("a", "b", 3.0), pair("a", "c", 2.0)];
        assert_eq!(ids(&select(pairs, 2)), vec!["a", "b", "a", "c"]);
    }
}
