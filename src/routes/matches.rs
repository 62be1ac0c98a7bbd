use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse, SuggestTimeRequest,
    SuggestTimeResponse,
};
use crate::services::MatchingService;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MatchingService>,
    pub max_top_k: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/sessions/suggest-time", web::post().to(suggest_time));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "request": { "title": "string", "type": "Writing" },
///   "creators": [{ "id": "1", "name": "string", "type": "writer",
///                  "availability": { "dates": ["2025-04-10"], "timeRange": "09:00 - 17:00" },
///                  "genres": ["Pop"] }],
///   "limit": 3
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return validation_failed(errors);
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let FindMatchesRequest {
        request,
        creators,
        limit,
    } = req.into_inner();
    let limit = limit
        .unwrap_or_else(|| state.service.matcher().top_k())
        .min(state.max_top_k);

    let span = tracing::info_span!("find_matches", request_id = %request_id);
    let outcome = async {
        tracing::info!(
            "Finding matches for '{}' among {} creators, limit: {}",
            request.title,
            creators.len(),
            limit
        );
        state
            .service
            .find_matches_with_limit(&request, creators, limit)
            .await
    }
    .instrument(span)
    .await;

    HttpResponse::Ok().json(FindMatchesResponse {
        request_id,
        matches: outcome.result.creators,
        pairs: outcome.result.pairs,
        total_candidates: outcome.result.total_candidates,
        suggestion: outcome.suggestion,
        diagnostics: outcome.diagnostics,
    })
}

/// Suggest a common slot for a group of creators
///
/// POST /api/v1/sessions/suggest-time
async fn suggest_time(
    state: web::Data<AppState>,
    req: web::Json<SuggestTimeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let (slot, diagnostics) = state.service.suggest_slot(req.into_inner().creators);
    HttpResponse::Ok().json(SuggestTimeResponse { slot, diagnostics })
}
