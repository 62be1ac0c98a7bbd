//! Sesh Match - collaborator pairing engine for session scheduling
//!
//! Given a session request and a pool of creators, this library ranks the
//! best-compatible creator pairs by shared days, shared daily hours, shared
//! genres and complementary roles. An OpenAI-compatible provider can be
//! consulted for advisory suggestions; it never changes the ranking.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{overlap, select, suggest_session_slot, MatchResult, Matcher};
pub use error::{Diagnostic, FailureKind, SuggestionError, ValidationError};
pub use models::{Creator, CreatorPayload, CreatorType, ScoredPair, ScoringWeights, SessionRequest, TimeRange};
pub use services::{MatchingService, SuggestionClient};
