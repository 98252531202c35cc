//! Output configuration (transcript file, logging)

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Where output goes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// File the finished transcript is written to
    #[serde(default = "default_transcript_path")]
    pub transcript_path: PathBuf,

    /// Default log level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

impl OutputConfig {
    /// Validate output configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.transcript_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("OUTPUT__TRANSCRIPT_PATH"));
        }
        let level = self.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ValidationError::InvalidLogLevel(self.log_level.clone()));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            transcript_path: default_transcript_path(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_transcript_path() -> PathBuf {
    PathBuf::from("interview_transcript.txt")
}

fn default_log_level() -> String {
    "info".to_string()
}
