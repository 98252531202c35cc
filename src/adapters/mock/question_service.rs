//! Mock question service.
//!
//! ```ignore
//! let service = MockQuestionService::new()
//!     .with_question("What subject do you enjoy most?")
//!     .with_response(NextQuestionResponse::question("x").with_tag(END_RAPID_FIRE_TAG))
//!     .with_error(ServiceError::network("down"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use super::lock;
use crate::domain::interview::{NextQuestionRequest, NextQuestionResponse};
use crate::ports::{QuestionService, ServiceError};

/// A configured reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this response.
    Response(NextQuestionResponse),
    /// Fail with this error.
    Error(ServiceError),
}

/// Queue-driven question service.
///
/// Replies are consumed in order. Once the queue is empty, each call returns
/// a plain question numbered by call count.
#[derive(Debug, Clone, Default)]
pub struct MockQuestionService {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<NextQuestionRequest>>>,
    delay: Duration,
}

impl MockQuestionService {
    /// Creates a mock with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a plain question.
    pub fn with_question(self, text: impl Into<String>) -> Self {
        self.with_response(NextQuestionResponse::question(text))
    }

    /// Queues a full response.
    pub fn with_response(self, response: NextQuestionResponse) -> Self {
        self.push(MockReply::Response(response));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ServiceError) -> Self {
        self.push(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a reply on an already-shared mock.
    pub fn push(&self, reply: MockReply) {
        lock(&self.replies).push_back(reply);
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns every request received, in order.
    pub fn get_calls(&self) -> Vec<NextQuestionRequest> {
        lock(&self.calls).clone()
    }

    /// Returns the most recent request.
    pub fn last_call(&self) -> Option<NextQuestionRequest> {
        lock(&self.calls).last().cloned()
    }
}

#[async_trait]
impl QuestionService for MockQuestionService {
    async fn next_question(
        &self,
        request: &NextQuestionRequest,
    ) -> Result<NextQuestionResponse, ServiceError> {
        let call_number = {
            let mut calls = lock(&self.calls);
            calls.push(request.clone());
            calls.len()
        };

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let reply = lock(&self.replies).pop_front();
        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Error(error)) => Err(error),
            None => Ok(NextQuestionResponse::question(format!(
                "Mock question {}",
                call_number
            ))),
        }
    }
}
