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
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid service base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Interview cap must be greater than zero: {0}")]
    ZeroCap(&'static str),

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}
