// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Availability, Creator, CreatorType, ScoredPair, ScoringWeights, SessionRequest, SessionSlot, TimeRange};
pub use requests::{AvailabilityPayload, CreatorPayload, FindMatchesRequest, SuggestTimeRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, SuggestTimeResponse};
