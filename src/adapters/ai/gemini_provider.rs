//! Gemini Provider - Implementation of AiProvider for Google's Gemini API.
//!
//! Talks to the `generativelanguage` REST API. The credential travels as a
//! `key` query parameter on both the catalog and generation endpoints.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_base_url("https://generativelanguage.googleapis.com")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let provider = GeminiProvider::new(config);
//! ```
//!
//! Error classification happens here, once, from HTTP status codes (plus a
//! body sniff for credential complaints the API reports as 400), so callers
//! only ever see the closed [`AiError`] set.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{AiError, AiProvider, ModelInfo};

/// Default API host.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Body substrings that mean the credential itself was rejected, regardless
/// of the status code the API chose.
const CREDENTIAL_MARKERS: &[&str] = &["api key", "leaked", "permission"];

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn models_url(&self) -> String {
        format!("{}/v1beta/models", self.config.base_url)
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.config.base_url, model)
    }

    fn map_request_error(&self, err: reqwest::Error) -> AiError {
        if err.is_timeout() {
            AiError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else if err.is_connect() {
            AiError::network(format!("Connection failed: {}", err))
        } else {
            AiError::network(err.to_string())
        }
    }

    /// Consumes an unsuccessful response into a classified error.
    async fn classify_failure(&self, response: Response, model: &str) -> AiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        classify_error_status(status, &body, model)
    }
}

/// Maps an HTTP failure status (plus body) to the error taxonomy.
fn classify_error_status(status: u16, body: &str, model: &str) -> AiError {
    let lowered = body.to_lowercase();
    let credential_complaint = CREDENTIAL_MARKERS.iter().any(|m| lowered.contains(m));

    match status {
        401 | 403 => AiError::permission_denied(body.to_string()),
        400 if credential_complaint => AiError::permission_denied(body.to_string()),
        400 => AiError::InvalidRequest(body.to_string()),
        404 => AiError::model_not_found(model.to_string()),
        429 => AiError::RateLimited { retry_after_secs: 60 },
        500..=599 => AiError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AiError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, AiError> {
        let response = self
            .client
            .get(self.models_url())
            .query(&[("key", self.config.api_key())])
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            return Err(self.classify_failure(response, "").await);
        }

        let catalog: ModelsResponse = response
            .json()
            .await
            .map_err(|e| AiError::parse(format!("Failed to parse model catalog: {}", e)))?;

        Ok(catalog
            .models
            .into_iter()
            .map(|descriptor| ModelInfo::new(descriptor.name))
            .collect())
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url(model))
            .query(&[("key", self.config.api_key())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            return Err(self.classify_failure(response, model).await);
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::parse(format!("Failed to parse response: {}", e)))?;

        let text = generated
            .candidates
            .into_iter()
            .flatten()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(AiError::EmptyCompletion);
        }
        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ModelDescriptor {
    name: String,
}
