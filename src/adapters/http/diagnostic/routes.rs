//! HTTP routes for the diagnostic endpoint.

use axum::{routing::post, Router};

use super::handlers::{analyze_survey, DiagnosticHandlers};

/// Creates the diagnostic router.
pub fn diagnostic_routes(handlers: DiagnosticHandlers) -> Router {
    Router::new()
        .route("/", post(analyze_survey))
        .with_state(handlers)
}
