use crate::error::Diagnostic;
use crate::models::domain::{Creator, ScoredPair, SessionSlot};
use serde::Serialize;

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub request_id: String,
    pub matches: Vec<Creator>,
    pub pairs: Vec<ScoredPair>,
    pub total_candidates: usize,
    pub suggestion: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Response for the slot suggestion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SuggestTimeResponse {
    pub slot: Option<SessionSlot>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
