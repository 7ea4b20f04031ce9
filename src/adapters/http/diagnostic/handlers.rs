//! HTTP handlers for the diagnostic endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::application::AnalyzeSurveyHandler;
use crate::domain::diagnostic::{generate_fallback_analysis, SurveyInput};

use super::dto::{AnalysisResponse, AnalyzeSurveyRequest, ErrorResponse, LenientSurveyRequest};

/// Error message returned when the service started without an AI credential.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Chave de API do serviço de IA não configurada";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// State for the diagnostic routes.
///
/// Holds `None` when no credential was configured at startup; requests then
/// answer the configuration error without touching any provider - the one
/// condition that is not recovered with the rule-based fallback.
#[derive(Clone)]
pub struct DiagnosticHandlers {
    analyze: Option<Arc<AnalyzeSurveyHandler>>,
}

impl DiagnosticHandlers {
    pub fn new(analyze: Arc<AnalyzeSurveyHandler>) -> Self {
        Self {
            analyze: Some(analyze),
        }
    }

    /// State for a deployment missing the provider credential.
    pub fn unconfigured() -> Self {
        Self { analyze: None }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/diagnostico - Run the survey analysis.
///
/// Takes the raw body instead of a `Json` extractor so a malformed payload
/// can be re-read leniently and still answered with the fallback analysis.
pub async fn analyze_survey(
    State(handlers): State<DiagnosticHandlers>,
    body: String,
) -> Response {
    let Some(analyze) = handlers.analyze.as_ref() else {
        error!("analysis requested but no AI credential is configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(MISSING_CREDENTIAL_MESSAGE)),
        )
            .into_response();
    };

    match parse_survey(&body) {
        Ok(survey) => {
            let result = analyze.handle(&survey).await;
            (StatusCode::OK, Json(AnalysisResponse::from(result))).into_response()
        }
        Err(reason) => recover_with_fallback(&body, &reason),
    }
}

fn parse_survey(body: &str) -> Result<SurveyInput, String> {
    let request: AnalyzeSurveyRequest =
        serde_json::from_str(body).map_err(|e| e.to_string())?;
    SurveyInput::try_from(request).map_err(|e| e.to_string())
}

/// Re-reads a rejected body with all fields defaulted and answers with the
/// rule-based analysis; only a body that is not JSON at all surfaces a 500.
fn recover_with_fallback(body: &str, reason: &str) -> Response {
    warn!(%reason, "survey body rejected, re-reading leniently");

    match serde_json::from_str::<LenientSurveyRequest>(body) {
        Ok(lenient) => {
            let survey = lenient.into_survey();
            let result = generate_fallback_analysis(&survey);
            (StatusCode::OK, Json(AnalysisResponse::from(result))).into_response()
        }
        Err(err) => {
            error!(%err, "lenient re-read also failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!(
                    "Falha ao processar a requisição: {}",
                    err
                ))),
            )
                .into_response()
        }
    }
}
