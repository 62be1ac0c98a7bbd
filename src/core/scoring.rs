use crate::core::candidates::CandidatePair;
use crate::core::overlap::Overlap;
use crate::models::{Creator, ScoringWeights};

/// Calculate the compatibility score for a schedulable pair
///
/// Scoring formula (default weights):
/// score = (
///     10 * common_dates +          # Schedule compatibility dominates
///     5 * overlap_hours +          # More shared hours per day
///     2 * shared_genres +          # Secondary refinement
///     1 if roles differ            # Writer + producer bonus
/// )
pub fn calculate_pair_score(
    pair: &CandidatePair<'_>,
    overlap: &Overlap,
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    let shared_genres = shared_genres(pair.first, pair.second);

    let role_bonus = if pair.first.creator_type() != pair.second.creator_type() {
        weights.complementary_role
    } else {
        0.0
    };

    let score = pair.common_dates.len() as f64 * weights.common_date
        + overlap.hours * weights.overlap_hour
        + shared_genres.len() as f64 * weights.shared_genre
        + role_bonus;

    (score, shared_genres)
}

/// Genres both creators list, case-sensitive, in the first creator's order
#[inline]
pub fn shared_genres(a: &Creator, b: &Creator) -> Vec<String> {
    a.genres()
        .iter()
        .filter(|g| b.genres().contains(g))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::candidates::common_dates;
    use crate::core::overlap::overlap;
    use crate::models::{CreatorType, TimeRange};
    use chrono::NaiveDate;

    fn creator(id: &str, kind: CreatorType, days: &[u32], range: &str, genres: &[&str]) -> Creator {
        Creator::new(
            id,
            id.to_uppercase(),
            kind,
            days.iter().map(|d| NaiveDate::from_ymd_opt(2025, 4, *d).unwrap()),
            TimeRange::parse(range).unwrap(),
            genres.iter().map(|g| g.to_string()),
        )
        .unwrap()
    }

    fn score(a: &Creator, b: &Creator) -> (f64, Vec<String>) {
        let pair = CandidatePair {
            first: a,
            second: b,
            common_dates: common_dates(a, b),
        };
        let ov = overlap(&a.time_range(), &b.time_range());
        calculate_pair_score(&pair, &ov, &ScoringWeights::default())
    }

    #[test]
    fn test_writer_producer_example() {
        let x = creator("x", CreatorType::Writer, &[10, 11], "09:00 - 17:00", &["Pop", "R&B"]);
        let y = creator("y", CreatorType::Producer, &[10], "10:00 - 16:00", &["Pop"]);

        let (total, shared) = score(&x, &y);
        assert_eq!(shared, vec!["Pop"]);
        assert_eq!(total, 43.0);
    }

    #[test]
    fn test_same_role_no_bonus() {
        let a = creator("a", CreatorType::Writer, &[1, 2], "09:00 - 11:00", &["Pop", "Rock", "Soul"]);
        let b = creator("b", CreatorType::Writer, &[1, 2, 3], "09:00 - 12:00", &["Soul", "Rock", "Pop"]);

        let (total, shared) = score(&a, &b);
        assert_eq!(shared.len(), 3);
        assert_eq!(total, 36.0);
    }

    #[test]
    fn test_genres_case_sensitive() {
        let a = creator("a", CreatorType::Writer, &[1], "09:00 - 17:00", &["pop"]);
        let b = creator("b", CreatorType::Writer, &[1], "09:00 - 17:00", &["Pop"]);
        assert!(shared_genres(&a, &b).is_empty());
    }

    #[test]
    fn test_writer_producer_differs_from_writer() {
        let a = creator("a", CreatorType::WriterProducer, &[1], "09:00 - 11:00", &[]);
        let b = creator("b", CreatorType::Writer, &[1], "09:00 - 11:00", &[]);
        let (total, _) = score(&a, &b);
        assert_eq!(total, 10.0 + 10.0 + 1.0);
    }

    #[test]
    fn test_custom_weights() {
        let a = creator("a", CreatorType::Writer, &[1], "09:00 - 11:00", &["Pop"]);
        let b = creator("b", CreatorType::Producer, &[1], "09:00 - 11:00", &["Pop"]);
        let pair = CandidatePair {
            first: &a,
            second: &b,
            common_dates: common_dates(&a, &b),
        };
        let ov = overlap(&a.time_range(), &b.time_range());
        let weights = ScoringWeights {
            common_date: 1.0,
            overlap_hour: 0.0,
            shared_genre: 100.0,
            complementary_role: 0.5,
        };

        let (total, _) = calculate_pair_score(&pair, &ov, &weights);
        assert_eq!(total, 101.5);
    }
}
