use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use sesh_match::config::{LoggingSettings, Settings};
use sesh_match::core::Matcher;
use sesh_match::models::ScoringWeights;
use sesh_match::routes::{self, matches::AppState};
use sesh_match::services::{MatchingService, SuggestionClient};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting Sesh matching service...");
    info!("Configuration loaded successfully");

    let weights = ScoringWeights {
        common_date: settings.scoring.weights.common_date,
        overlap_hour: settings.scoring.weights.overlap_hour,
        shared_genre: settings.scoring.weights.shared_genre,
        complementary_role: settings.scoring.weights.complementary_role,
    };

    let matcher = Matcher::new(
        weights,
        settings.matching.min_overlap_hours,
        settings.matching.top_k,
    );

    info!("Matcher initialized with weights: {:?}", weights);

    // Credential is resolved once here and handed to the client
    let suggester = if settings.openai.enabled {
        let api_key = settings.openai.resolve_api_key();
        let masked = api_key.as_ref().map(|key| key.masked());

        match SuggestionClient::new(&settings.openai, api_key) {
            Ok(client) => {
                if client.has_credential() {
                    info!("Suggestion provider configured (key: {})", masked.unwrap_or_default());
                } else {
                    warn!("No OpenAI API key configured; remote suggestions will report a configuration error");
                }
                Some(client)
            }
            Err(e) => {
                error!("Failed to initialize suggestion client ({}), continuing with local ranking only", e);
                None
            }
        }
    } else {
        info!("Remote suggestions disabled");
        None
    };

    let app_state = AppState {
        service: Arc::new(MatchingService::new(matcher, suggester)),
        max_top_k: settings.matching.max_top_k,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
