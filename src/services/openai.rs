use crate::config::{ApiKey, OpenAiSettings};
use crate::error::SuggestionError;
use crate::models::{Creator, SessionRequest};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// System prompt sent with every suggestion request
pub const MATCHING_SYSTEM_PROMPT: &str = "You are an AI matching system for music session \
    scheduling. Your goal is to find optimal pairs of creators based on their genres, \
    availability, and roles.";

/// Client for an OpenAI-compatible chat completions API
///
/// The returned text is advisory only; it is never parsed into a ranking.
#[derive(Clone)]
pub struct SuggestionClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<ApiKey>,
    timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct SuggestionPrompt<'a> {
    request: &'a SessionRequest,
    creators: &'a [Creator],
}

impl SuggestionClient {
    /// Create a client; a missing key is only reported when `suggest` runs
    pub fn new(settings: &OpenAiSettings, api_key: Option<ApiKey>) -> Result<Self, SuggestionError> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SuggestionError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
            timeout,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ask the provider which creators pair best
    ///
    /// Fails fast with `MissingCredential` before any network I/O when no key
    /// was resolved.
    pub async fn suggest(
        &self,
        request: &SessionRequest,
        creators: &[Creator],
    ) -> Result<String, SuggestionError> {
        let api_key = self.api_key.as_ref().ok_or(SuggestionError::MissingCredential)?;

        let prompt = serde_json::to_string(&SuggestionPrompt { request, creators })
            .map_err(|e| SuggestionError::InvalidResponse(format!("Failed to encode prompt: {}", e)))?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MATCHING_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(
            "Requesting suggestion from {} (model: {}, key: {})",
            url,
            self.model,
            api_key.masked()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(SuggestionError::Api { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SuggestionError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SuggestionError::InvalidResponse("Missing choices[0].message.content".into()))
    }

    /// `suggest` bounded by `timeout`; dropping the future cancels the call
    pub async fn suggest_with_timeout(
        &self,
        request: &SessionRequest,
        creators: &[Creator],
        timeout: Duration,
    ) -> Result<String, SuggestionError> {
        match tokio::time::timeout(timeout, self.suggest(request, creators)).await {
            Ok(result) => result,
            Err(_) => Err(SuggestionError::Timeout(timeout)),
        }
    }
}
