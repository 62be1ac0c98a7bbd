use crate::core::{suggest_session_slot, MatchResult, Matcher};
use crate::error::{Diagnostic, SuggestionError};
use crate::models::{Creator, CreatorPayload, SessionRequest, SessionSlot};
use crate::services::openai::SuggestionClient;
use std::sync::Arc;
use std::time::Duration;

/// Receives the outcome of every remote suggestion attempt
pub trait SuggestionObserver: Send + Sync {
    fn observe(&self, request: &SessionRequest, outcome: &Result<String, SuggestionError>);
}

/// Default observer: logs through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SuggestionObserver for TracingObserver {
    fn observe(&self, request: &SessionRequest, outcome: &Result<String, SuggestionError>) {
        match outcome {
            Ok(text) => tracing::info!(
                session = %request.title,
                chars = text.len(),
                "Received remote suggestion"
            ),
            Err(e) => tracing::warn!(
                session = %request.title,
                kind = ?e.kind(),
                "Remote suggestion unavailable: {}",
                e
            ),
        }
    }
}

/// Everything a caller gets back from one matching call
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    pub result: MatchResult,
    pub suggestion: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Validates the raw pool, consults the suggestion provider and ranks locally
///
/// Never fails: validation problems and remote failures come back as
/// diagnostics next to the local ranking.
#[derive(Clone)]
pub struct MatchingService {
    matcher: Matcher,
    suggester: Option<SuggestionClient>,
    observer: Arc<dyn SuggestionObserver>,
    remote_timeout: Duration,
}

impl MatchingService {
    /// `suggester = None` disables the remote call entirely
    pub fn new(matcher: Matcher, suggester: Option<SuggestionClient>) -> Self {
        let remote_timeout = suggester
            .as_ref()
            .map(|s| s.timeout())
            .unwrap_or(Duration::from_secs(20));

        Self {
            matcher,
            suggester,
            observer: Arc::new(TracingObserver),
            remote_timeout,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SuggestionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Find matches with the matcher's default `top_k`
    pub async fn find_matches(
        &self,
        request: &SessionRequest,
        payloads: Vec<CreatorPayload>,
    ) -> MatchOutcome {
        self.find_matches_with_limit(request, payloads, self.matcher.top_k())
            .await
    }

    pub async fn find_matches_with_limit(
        &self,
        request: &SessionRequest,
        payloads: Vec<CreatorPayload>,
        limit: usize,
    ) -> MatchOutcome {
        let (creators, mut diagnostics) = validate_pool(payloads);

        if creators.len() < 2 {
            tracing::info!(
                "Not enough valid creators for '{}' ({} of minimum 2)",
                request.title,
                creators.len()
            );
            return MatchOutcome {
                result: MatchResult {
                    total_candidates: creators.len(),
                    ..MatchResult::default()
                },
                suggestion: None,
                diagnostics,
            };
        }

        let remote = async {
            match &self.suggester {
                Some(client) => {
                    let outcome = client
                        .suggest_with_timeout(request, &creators, self.remote_timeout)
                        .await;
                    self.observer.observe(request, &outcome);
                    Some(outcome)
                }
                None => None,
            }
        };
        let local = async { self.matcher.find_matches_with_limit(request, &creators, limit) };

        let (remote, result) = tokio::join!(remote, local);

        let suggestion = match remote {
            Some(Ok(text)) => Some(text),
            Some(Err(e)) => {
                diagnostics.push(Diagnostic::from(&e));
                None
            }
            None => None,
        };

        tracing::info!(
            "Matched '{}': {} creators, {} pairs scored, {} selected",
            request.title,
            result.total_candidates,
            result.scored_pairs,
            result.pairs.len()
        );

        MatchOutcome {
            result,
            suggestion,
            diagnostics,
        }
    }

    /// Suggest a common slot for a whole group
    pub fn suggest_slot(&self, payloads: Vec<CreatorPayload>) -> (Option<SessionSlot>, Vec<Diagnostic>) {
        let (creators, diagnostics) = validate_pool(payloads);
        (suggest_session_slot(&creators), diagnostics)
    }
}

/// Convert raw payloads into creators, dropping the invalid ones
pub fn validate_pool(payloads: Vec<CreatorPayload>) -> (Vec<Creator>, Vec<Diagnostic>) {
    let mut creators = Vec::with_capacity(payloads.len());
    let mut diagnostics = Vec::new();

    for payload in payloads {
        let id = payload.id.clone();
        match Creator::try_from(payload) {
            Ok(creator) => creators.push(creator),
            Err(e) => {
                tracing::warn!("Dropping creator {:?}: {}", id, e);
                diagnostics.push(Diagnostic::validation(id.as_deref(), &e));
            }
        }
    }

    (creators, diagnostics)
}
