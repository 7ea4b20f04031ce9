//! Mock AI Provider for testing.
//!
//! Configurable implementation of the AiProvider port: queued generation
//! responses, error injection, and call tracking so tests can assert how
//! many candidates the analysis loop attempted and with which identifiers.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AiError, AiProvider, ModelInfo};

/// A recorded generation call.
#[derive(Debug, Clone)]
pub struct GenerationCall {
    pub model: String,
    pub prompt: String,
}

/// Error kinds injectable into the mock.
#[derive(Debug, Clone)]
pub enum MockFailure {
    PermissionDenied,
    ModelNotFound,
    RateLimited,
    Unavailable,
    Network,
    Timeout,
    EmptyCompletion,
}

impl From<MockFailure> for AiError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::PermissionDenied => AiError::permission_denied("API key not authorized"),
            MockFailure::ModelNotFound => AiError::model_not_found("mock-model"),
            MockFailure::RateLimited => AiError::RateLimited { retry_after_secs: 30 },
            MockFailure::Unavailable => AiError::unavailable("service down"),
            MockFailure::Network => AiError::network("connection reset"),
            MockFailure::Timeout => AiError::Timeout { timeout_secs: 60 },
            MockFailure::EmptyCompletion => AiError::EmptyCompletion,
        }
    }
}

/// One queued outcome for a generation call.
#[derive(Debug, Clone)]
enum QueuedGeneration {
    Success(String),
    Failure(MockFailure),
}

/// Mock provider; clones share state so tests can inspect recorded calls.
#[derive(Debug, Clone, Default)]
pub struct MockAiProvider {
    listing: Arc<Mutex<Option<Result<Vec<String>, MockFailure>>>>,
    generations: Arc<Mutex<VecDeque<QueuedGeneration>>>,
    calls: Arc<Mutex<Vec<GenerationCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the catalog listing with the given model names.
    pub fn with_models(self, names: Vec<&str>) -> Self {
        *self.listing.lock().unwrap() =
            Some(Ok(names.into_iter().map(String::from).collect()));
        self
    }

    /// Makes the catalog listing fail.
    pub fn with_listing_error(self, failure: MockFailure) -> Self {
        *self.listing.lock().unwrap() = Some(Err(failure));
        self
    }

    /// Queues a successful generation response.
    pub fn with_generation(self, text: impl Into<String>) -> Self {
        self.generations
            .lock()
            .unwrap()
            .push_back(QueuedGeneration::Success(text.into()));
        self
    }

    /// Queues a generation failure.
    pub fn with_generation_error(self, failure: MockFailure) -> Self {
        self.generations
            .lock()
            .unwrap()
            .push_back(QueuedGeneration::Failure(failure));
        self
    }

    /// Number of generation calls made so far.
    pub fn generation_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded generation calls, in order.
    pub fn generation_calls(&self) -> Vec<GenerationCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, AiError> {
        match self.listing.lock().unwrap().clone() {
            Some(Ok(names)) => Ok(names.into_iter().map(ModelInfo::new).collect()),
            Some(Err(failure)) => Err(failure.into()),
            None => Ok(Vec::new()),
        }
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, AiError> {
        self.calls.lock().unwrap().push(GenerationCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });

        match self.generations.lock().unwrap().pop_front() {
            Some(QueuedGeneration::Success(text)) => Ok(text),
            Some(QueuedGeneration::Failure(failure)) => Err(failure.into()),
            None => Ok("Mock response".to_string()),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
