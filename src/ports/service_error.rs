//! Errors shared by every collaborator port.

use crate::domain::interview::InterviewError;

/// Failure talking to an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Connection could not be established or was dropped.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Local I/O failed.
    #[error("io error: {0}")]
    Io(String),
}

impl ServiceError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

impl From<ServiceError> for InterviewError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Parse(message) => InterviewError::invalid_response(message),
            other => InterviewError::unavailable(other.to_string()),
        }
    }
}
