// Core algorithm exports
pub mod candidates;
pub mod matcher;
pub mod overlap;
pub mod ranker;
pub mod scheduling;
pub mod scoring;

pub use candidates::{common_dates, enumerate_pairs, CandidatePair};
pub use matcher::{MatchResult, Matcher};
pub use overlap::{overlap, overlap_str, overlap_with_threshold, Overlap, MIN_OVERLAP_HOURS};
pub use ranker::{flatten_pairs, rank_pairs, select, DEFAULT_TOP_K};
pub use scheduling::suggest_session_slot;
pub use scoring::{calculate_pair_score, shared_genres};
