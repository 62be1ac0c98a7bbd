// Service exports
pub mod matching;
pub mod openai;

pub use matching::{validate_pool, MatchOutcome, MatchingService, SuggestionObserver, TracingObserver};
pub use openai::SuggestionClient;
