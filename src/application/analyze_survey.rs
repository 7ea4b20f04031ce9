//! AnalyzeSurvey - the diagnostic analysis use case.
//!
//! Orchestrates candidate-model discovery, the sequential generation loop,
//! response parsing, and the rule-based fallback. Once constructed the
//! handler is infallible: every failure path degrades into a deterministic
//! [`AnalysisResult`].

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::diagnostic::{
    build_analysis_prompt, generate_fallback_analysis, parse_analysis, AnalysisResult, SurveyInput,
};
use crate::ports::AiProvider;

/// Ordered default candidate list, most capable/newest first. Used when the
/// provider's catalog cannot be listed or lists nothing usable.
pub const DEFAULT_CANDIDATE_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-pro",
];

/// Catalog entries are kept only when their identifier contains this marker.
const MODEL_NAME_MARKER: &str = "gemini";

/// Handler for running a diagnostic analysis over survey answers.
pub struct AnalyzeSurveyHandler {
    provider: Arc<dyn AiProvider>,
    candidate_models: Vec<String>,
}

impl AnalyzeSurveyHandler {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self {
            provider,
            candidate_models: DEFAULT_CANDIDATE_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }

    /// Overrides the default candidate list (operator configuration).
    pub fn with_candidate_models(mut self, models: Vec<String>) -> Self {
        if !models.is_empty() {
            self.candidate_models = models;
        }
        self
    }

    /// Runs the analysis. Never fails.
    ///
    /// Tries each candidate model once, in order. A model that is simply
    /// unavailable advances the loop; a credential failure or any other
    /// error abandons it, because retrying different models cannot fix
    /// either. Exhaustion also resolves to the fallback.
    pub async fn handle(&self, survey: &SurveyInput) -> AnalysisResult {
        let request_id = Uuid::new_v4();
        let prompt = build_analysis_prompt(survey);
        let candidates = self.discover_candidates(request_id).await;

        for model in &candidates {
            debug!(%request_id, provider = self.provider.provider_name(), model, "attempting generation");

            match self.provider.generate(model, &prompt).await {
                Ok(text) => {
                    info!(%request_id, model, chars = text.len(), "generation succeeded");
                    return parse_analysis(&text, survey);
                }
                Err(err) if err.is_model_unavailable() => {
                    warn!(%request_id, model, %err, "model unavailable, trying next candidate");
                }
                Err(err) if err.is_credential_failure() => {
                    warn!(%request_id, model, %err, "credential rejected, using rule-based fallback");
                    return generate_fallback_analysis(survey);
                }
                Err(err) => {
                    warn!(%request_id, model, %err, "generation failed, using rule-based fallback");
                    return generate_fallback_analysis(survey);
                }
            }
        }

        warn!(%request_id, tried = candidates.len(), "all candidate models exhausted, using rule-based fallback");
        generate_fallback_analysis(survey)
    }

    /// Discovers usable candidate identifiers from the provider's catalog.
    ///
    /// Catalog failures are tolerated: the configured default list is the
    /// answer whenever the listing errors or filters down to nothing.
    async fn discover_candidates(&self, request_id: Uuid) -> Vec<String> {
        match self.provider.list_models().await {
            Ok(models) => {
                let discovered: Vec<String> = models
                    .iter()
                    .map(|m| m.identifier().to_string())
                    .filter(|id| id.contains(MODEL_NAME_MARKER))
                    .collect();

                if discovered.is_empty() {
                    debug!(%request_id, "catalog listed no usable models, using default candidates");
                    self.candidate_models.clone()
                } else {
                    debug!(%request_id, count = discovered.len(), "using models discovered from catalog");
                    discovered
                }
            }
            Err(err) => {
                debug!(%request_id, %err, "model listing failed, using default candidates");
                self.candidate_models.clone()
            }
        }
    }
}
