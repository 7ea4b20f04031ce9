//! Service entry point: configuration, wiring, and the axum server.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use diagnostico_ai::adapters::http::{diagnostic_routes, DiagnosticHandlers};
use diagnostico_ai::adapters::{GeminiConfig, GeminiProvider};
use diagnostico_ai::application::AnalyzeSurveyHandler;
use diagnostico_ai::config::AppConfig;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("fatal: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let handlers = build_handlers(&config);
    let app = router(handlers, &config);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "starting diagnostico-ai");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Wires the analysis stack, or leaves the endpoint unconfigured when the
/// credential is absent so it answers the configuration error per request.
fn build_handlers(config: &AppConfig) -> DiagnosticHandlers {
    match config.ai.api_key() {
        Some(key) => {
            let gemini = GeminiConfig::new(key)
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout());
            let provider = Arc::new(GeminiProvider::new(gemini));

            let mut analyze = AnalyzeSurveyHandler::new(provider);
            let overrides = config.ai.candidate_models_list();
            if !overrides.is_empty() {
                analyze = analyze.with_candidate_models(overrides);
            }
            DiagnosticHandlers::new(Arc::new(analyze))
        }
        None => {
            tracing::error!(
                "GEMINI_API_KEY is not set; the diagnostic endpoint will answer with a configuration error"
            );
            DiagnosticHandlers::unconfigured()
        }
    }
}

fn router(handlers: DiagnosticHandlers, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/diagnostico", diagnostic_routes(handlers))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server.cors_origins_list()))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health() -> &'static str {
    "OK"
}
