//! HTTP implementation of the question service port.

use async_trait::async_trait;

use super::client::ServiceApiClient;
use crate::domain::interview::{NextQuestionRequest, NextQuestionResponse};
use crate::ports::{QuestionService, ServiceError};

const NEXT_QUESTION_PATH: &str = "next-question";

/// Fetches questions from `POST /next-question`.
#[derive(Debug, Clone)]
pub struct HttpQuestionService {
    client: ServiceApiClient,
}

impl HttpQuestionService {
    /// Creates the adapter on top of a shared client.
    pub fn new(client: ServiceApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuestionService for HttpQuestionService {
    async fn next_question(
        &self,
        request: &NextQuestionRequest,
    ) -> Result<NextQuestionResponse, ServiceError> {
        tracing::debug!(
            track = %request.track,
            turns = request.history.len(),
            is_rapid_fire = request.is_rapid_fire,
            "requesting next question"
        );

        let response: NextQuestionResponse =
            self.client.post_json(NEXT_QUESTION_PATH, request).await?;

        tracing::debug!(
            has_question = response.question.is_some(),
            tag = response.tag.as_deref().unwrap_or(""),
            "received next question"
        );
        Ok(response)
    }
}
