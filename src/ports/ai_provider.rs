//! AI Provider Port - Interface for the external generative-model service.
//!
//! Abstracts the model-catalog and text-generation calls so the analysis
//! handler never touches HTTP or provider-specific error strings. Failures
//! arrive as a closed set of [`AiError`] categories; the handler routes on
//! the category, not on message text.

use async_trait::async_trait;

/// Prefix the provider's catalog puts in front of model identifiers.
pub const MODEL_NAME_PREFIX: &str = "models/";

/// Port for the generative-model provider.
///
/// Implementations connect to the external service (or a test double) and
/// translate provider responses into plain text plus classified errors.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Lists the models available to the configured credential.
    ///
    /// Callers tolerate failure here: an error or empty catalog means the
    /// hardcoded candidate list is used instead.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, AiError>;

    /// Generates text with the given model identifier and prompt.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, AiError>;

    /// Provider name for log lines (e.g. "gemini", "mock").
    fn provider_name(&self) -> &str;
}

/// A model descriptor from the provider's catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Catalog name as returned by the provider (e.g. "models/gemini-1.5-pro").
    pub name: String,
}

impl ModelInfo {
    /// Creates a descriptor from a catalog name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The bare identifier usable in generation calls, without the
    /// catalog prefix.
    pub fn identifier(&self) -> &str {
        self.name
            .strip_prefix(MODEL_NAME_PREFIX)
            .unwrap_or(&self.name)
    }
}

/// Classified provider errors.
///
/// The three-way routing in the analysis loop depends on these categories:
/// `ModelNotFound` advances to the next candidate, `PermissionDenied` and
/// everything else abandon the loop in favor of the rule-based fallback.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The credential itself was rejected (invalid, blocked, or leaked key).
    #[error("permission denied: {message}")]
    PermissionDenied {
        /// Provider-reported detail.
        message: String,
    },

    /// The requested model identifier is not available to this credential.
    #[error("model not found: {model}")]
    ModelNotFound {
        /// Identifier that was attempted.
        model: String,
    },

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider reported a server-side failure.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// The provider's response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered successfully but produced no text.
    #[error("empty completion")]
    EmptyCompletion,
}

impl AiError {
    /// Creates a permission denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Creates a model not found error.
    pub fn model_not_found(model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            model: model.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// True when the failure is tied to the credential itself; trying other
    /// models cannot help.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, AiError::PermissionDenied { .. })
    }

    /// True when only the attempted model identifier is unavailable and the
    /// next candidate may still work.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, AiError::ModelNotFound { .. })
    }
}
