//! Transcript Sink Port - where finished transcripts are written.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::foundation::SessionId;

/// Port for exporting a rendered transcript.
#[async_trait]
pub trait TranscriptSink: Send + Sync {
    /// Stores the transcript and returns a human-readable location.
    async fn save(&self, session_id: SessionId, content: &str) -> Result<String, ServiceError>;
}
