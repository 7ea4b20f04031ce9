//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values use the `DIAGNOSTICO` prefix with
//! `__` separating nested sections; the provider credential is additionally
//! honored from the conventional plain `GEMINI_API_KEY` variable.
//!
//! # Example
//!
//! ```no_run
//! use diagnostico_ai::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, timeouts, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads `DIAGNOSTICO__*` variables (e.g.
    ///    `DIAGNOSTICO__SERVER__PORT=8080`, `DIAGNOSTICO__AI__TIMEOUT_SECS=30`)
    /// 3. Falls back to plain `GEMINI_API_KEY` for the credential when the
    ///    prefixed form is absent
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DIAGNOSTICO")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if config.ai.gemini_api_key.is_none() {
            config.ai.gemini_api_key = std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty());
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// A missing API key is deliberately NOT a validation failure: the
    /// service starts and the diagnostic endpoint reports the configuration
    /// error per request, so the misconfiguration is loudly observable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
