//! Speech Synthesis Port - reads questions aloud.

use async_trait::async_trait;

use super::ServiceError;

/// Encoded audio as returned by a synthesis service or captured from a microphone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Raw encoded bytes.
    pub bytes: Vec<u8>,
    /// MIME type, when the producer reported one.
    pub content_type: Option<String>,
}

impl AudioClip {
    /// Creates a clip with no declared content type.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: None,
        }
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns true if the clip holds no audio.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Port for turning question text into speech.
///
/// Failures are never fatal to an interview; callers log and move on.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes `text` into audio.
    async fn synthesize(&self, text: &str) -> Result<AudioClip, ServiceError>;
}
