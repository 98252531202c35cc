//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ESSAY_INTERVIEW` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use essay_interview::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Question service at {}", config.service.base_url);
//! ```

mod error;
mod interview;
mod output;
mod service;

pub use error::{ConfigError, ValidationError};
pub use interview::InterviewConfig;
pub use output::OutputConfig;
pub use service::ServiceConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration pointing at a local backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Interview backend (base URL, token, timeout)
    #[serde(default)]
    pub service: ServiceConfig,

    /// Turn caps
    #[serde(default)]
    pub interview: InterviewConfig,

    /// Transcript file and log level
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ESSAY_INTERVIEW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ESSAY_INTERVIEW__SERVICE__BASE_URL=...` -> `service.base_url = ...`
    /// - `ESSAY_INTERVIEW__INTERVIEW__GLOBAL_TURN_CAP=8` -> `interview.global_turn_cap = 8`
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
                    .prefix("ESSAY_INTERVIEW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.service.validate()?;
        self.interview.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "ESSAY_INTERVIEW__SERVICE__BASE_URL",
        "ESSAY_INTERVIEW__SERVICE__TIMEOUT_SECS",
        "ESSAY_INTERVIEW__INTERVIEW__GLOBAL_TURN_CAP",
        "ESSAY_INTERVIEW__OUTPUT__TRANSCRIPT_PATH",
        "ESSAY_INTERVIEW__OUTPUT__LOG_LEVEL",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.interview, InterviewConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ESSAY_INTERVIEW__SERVICE__BASE_URL", "https://api.example.com");
        env::set_var("ESSAY_INTERVIEW__SERVICE__TIMEOUT_SECS", "30");
        env::set_var("ESSAY_INTERVIEW__INTERVIEW__GLOBAL_TURN_CAP", "12");
        env::set_var("ESSAY_INTERVIEW__OUTPUT__TRANSCRIPT_PATH", "out/transcript.txt");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.service.base_url, "https://api.example.com");
        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.interview.global_turn_cap, 12);
        assert_eq!(
            config.output.transcript_path,
            PathBuf::from("out/transcript.txt")
        );
    }

    #[test]
    fn test_validate_reports_first_bad_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ESSAY_INTERVIEW__SERVICE__TIMEOUT_SECS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_failure_converts_to_config_error() {
        let err = ConfigError::from(ValidationError::ZeroCap("global_turn_cap"));

        assert!(matches!(
            err,
            ConfigError::ValidationFailed(ValidationError::ZeroCap("global_turn_cap"))
        ));
        assert!(err.to_string().starts_with("Validation failed"));
    }
}
