//! HTTP adapter for the diagnostic endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnalysisResponse, AnalyzeSurveyRequest, ErrorResponse, LenientSurveyRequest, ToolResponse,
};
pub use handlers::{DiagnosticHandlers, MISSING_CREDENTIAL_MESSAGE};
pub use routes::diagnostic_routes;
