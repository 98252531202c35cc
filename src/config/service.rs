//! Interview backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::service_api::{ServiceApiConfig, DEFAULT_BASE_URL};

/// Longest request timeout accepted, in seconds.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Where the question, speech, transcription and CV services live
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL shared by every endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional bearer token
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Read each question aloud through the speech endpoint
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,
}

impl ServiceConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a bearer token is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Builds the HTTP client settings.
    pub fn to_client_config(&self) -> ServiceApiConfig {
        let config = ServiceApiConfig::new(&self.base_url).with_timeout(self.timeout());
        match &self.api_key {
            Some(key) if self.has_api_key() => config.with_api_key(key.expose_secret().clone()),
            _ => config,
        }
    }

    /// Validate service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("SERVICE__BASE_URL"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl(url.to_string()));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            speech_enabled: default_speech_enabled(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_speech_enabled() -> bool {
    true
}
