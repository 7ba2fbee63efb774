//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request body limit must be between 4 KiB and 1 MiB")]
    InvalidBodyLimit,

    #[error("Session expiry must be between one hour and one hundred years")]
    InvalidSessionExpiry,

    #[error("Eviction interval must be at least one second")]
    InvalidEvictionInterval,

    #[error("Catalog path must not be empty")]
    EmptyCatalogPath,
}
