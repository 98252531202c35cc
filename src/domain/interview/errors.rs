//! Error taxonomy for interview operations.

use thiserror::Error;

/// Errors surfaced by the interview controller and transition engine.
///
/// Every variant is recoverable: the session is never left half-updated,
/// so the caller may retry, keep waiting, or abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterviewError {
    /// The question service could not be reached or answered with a failure status.
    #[error("question service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The question service answered, but the reply was unusable.
    #[error("invalid question service response: {0}")]
    InvalidServiceResponse(String),

    /// The operation is not allowed in the session's current state.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}

impl InterviewError {
    /// Creates a service unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidServiceResponse(message.into())
    }

    /// Creates a precondition violation error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation(message.into())
    }

    /// Returns true if re-issuing the same fetch may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_) | Self::InvalidServiceResponse(_)
        )
    }
}
