//! In-memory transcript sink.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::domain::foundation::SessionId;
use crate::ports::{ServiceError, TranscriptSink};

/// Keeps saved transcripts in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranscriptSink {
    saved: Arc<Mutex<Vec<(SessionId, String)>>>,
}

impl InMemoryTranscriptSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything saved so far, oldest first.
    pub fn saved(&self) -> Vec<(SessionId, String)> {
        lock(&self.saved).clone()
    }
}

#[async_trait]
impl TranscriptSink for InMemoryTranscriptSink {
    async fn save(&self, session_id: SessionId, content: &str) -> Result<String, ServiceError> {
        lock(&self.saved).push((session_id, content.to_string()));
        Ok(format!("memory://{}", session_id))
    }
}
