use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while turning raw creator or time data into domain values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unknown creator type: {0}")]
    UnknownCreatorType(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid time range: {0}")]
    InvalidTimeRange(String),

    #[error("time range must start before it ends: {start} - {end}")]
    EmptyTimeRange { start: String, end: String },

    #[error("creator {0} has no available dates")]
    NoAvailableDates(String),
}

/// Errors from the remote suggestion provider
///
/// None of these ever abort a matching call; they are reported as
/// diagnostics next to the local ranking.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("OpenAI API key not found or invalid")]
    MissingCredential,

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    #[error("suggestion timed out after {0:?}")]
    Timeout(Duration),
}

impl SuggestionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SuggestionError::MissingCredential | SuggestionError::Client(_) => {
                FailureKind::Configuration
            }
            _ => FailureKind::Remote,
        }
    }
}

/// Coarse category of a non-fatal problem reported back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Validation,
    Configuration,
    Remote,
}

/// A toast-style notice attached to a matching result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: FailureKind,
    pub detail: String,
}

impl Diagnostic {
    pub fn validation(creator_id: Option<&str>, err: &ValidationError) -> Self {
        let detail = match creator_id {
            Some(id) => format!("creator {}: {}", id, err),
            None => err.to_string(),
        };
        Self {
            kind: FailureKind::Validation,
            detail,
        }
    }
}

impl From<&SuggestionError> for Diagnostic {
    fn from(err: &SuggestionError) -> Self {
        Self {
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}
