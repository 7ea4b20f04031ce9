//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AiProvider` - model catalog listing and text generation against the
//!   external generative service, with classified errors

mod ai_provider;

pub use ai_provider::{AiError, AiProvider, ModelInfo, MODEL_NAME_PREFIX};
