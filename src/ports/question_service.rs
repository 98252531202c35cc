//! Question Service Port - the remote question generator.
//!
//! Given a session snapshot, the service returns the next question plus any
//! phase signals and bookkeeping it wants echoed back. The port only moves
//! bytes; interpreting the reply is the transition engine's job.
//!
//! # Contract
//!
//! Implementations must be safe to call again with identical input: the
//! controller retries a failed turn by re-sending the same snapshot.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::interview::{NextQuestionRequest, NextQuestionResponse};

/// Port for fetching the next interview question.
#[async_trait]
pub trait QuestionService: Send + Sync {
    /// Sends the session snapshot and returns the raw reply.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Network` / `Timeout` / `Status` when the service
    ///   cannot be reached or refuses the request
    /// - `ServiceError::Parse` when the body is not a JSON object
    async fn next_question(
        &self,
        request: &NextQuestionRequest,
    ) -> Result<NextQuestionResponse, ServiceError>;
}
