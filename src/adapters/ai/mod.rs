//! AI Provider Adapters.
//!
//! Implementations of the AiProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini REST API
//! - `MockAiProvider` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{GenerationCall, MockAiProvider, MockFailure};
