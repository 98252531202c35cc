//! Transcription Port - speech-to-text for recorded answers.

use async_trait::async_trait;

use super::{AudioClip, ServiceError};

/// Port for transcribing a recorded answer.
///
/// The returned text is a draft the candidate may edit before submitting;
/// it never reaches the session directly.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribes a recording into text.
    async fn transcribe(&self, recording: AudioClip) -> Result<String, ServiceError>;
}
