//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file when
//! present) using the `config` and `dotenvy` crates. Variables carry the
//! `INTERVIEW_FLOW` prefix and nested values are separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use interview_flow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod catalog;
mod error;
mod features;
mod server;
mod session;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{CorsPolicy, Environment, LogFormat, ServerConfig};
pub use session::{SessionConfig, UnknownSessionPolicy};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// service with the built-in catalog.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Session lifetime and unknown-session handling
    #[serde(default)]
    pub session: SessionConfig,

    /// Question catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `INTERVIEW_FLOW__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `INTERVIEW_FLOW__CATALOG__PATH=questions.yaml` -> `catalog.path = ...`
    /// - `INTERVIEW_FLOW__SESSION__UNKNOWN_SESSION=create`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("INTERVIEW_FLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.session.validate()?;
        self.catalog.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
