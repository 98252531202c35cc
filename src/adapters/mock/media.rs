//! Mock speech, transcription and extraction services.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::lock;
use crate::ports::{
    AudioClip, DocumentExtractor, ServiceError, SpeechSynthesizer, Transcriber, UploadedFile,
};

/// Synthesizer that returns a fixed clip (or a fixed error) and records the texts it was asked to speak.
#[derive(Debug, Clone)]
pub struct MockSpeechSynthesizer {
    result: Result<AudioClip, ServiceError>,
    spoken: Arc<Mutex<Vec<String>>>,
}

impl Default for MockSpeechSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSpeechSynthesizer {
    /// Returns a short dummy clip for every request.
    pub fn new() -> Self {
        Self {
            result: Ok(AudioClip::new(b"RIFF".to_vec()).with_content_type("audio/wav")),
            spoken: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails every request with `error`.
    pub fn failing(error: ServiceError) -> Self {
        Self {
            result: Err(error),
            ..Self::new()
        }
    }

    /// Texts received so far.
    pub fn spoken(&self) -> Vec<String> {
        lock(&self.spoken).clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, ServiceError> {
        lock(&self.spoken).push(text.to_string());
        self.result.clone()
    }
}

/// Transcriber that returns a fixed text (or a fixed error).
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    result: Result<String, ServiceError>,
    calls: Arc<Mutex<usize>>,
}

impl MockTranscriber {
    /// Returns `text` for every recording.
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            result: Ok(text.into()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Fails every recording with `error`.
    pub fn failing(error: ServiceError) -> Self {
        Self {
            result: Err(error),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of recordings received.
    pub fn call_count(&self) -> usize {
        *lock(&self.calls)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _recording: AudioClip) -> Result<String, ServiceError> {
        *lock(&self.calls) += 1;
        self.result.clone()
    }
}

/// Extractor that returns a fixed text (or a fixed error) and records file names.
#[derive(Debug, Clone)]
pub struct MockDocumentExtractor {
    result: Result<String, ServiceError>,
    uploads: Arc<Mutex<Vec<String>>>,
}

impl MockDocumentExtractor {
    /// Returns `text` for every upload.
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            result: Ok(text.into()),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails every upload with `error`.
    pub fn failing(error: ServiceError) -> Self {
        Self {
            result: Err(error),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// File names received so far.
    pub fn uploads(&self) -> Vec<String> {
        lock(&self.uploads).clone()
    }
}

#[async_trait]
impl DocumentExtractor for MockDocumentExtractor {
    async fn extract_text(&self, file: UploadedFile) -> Result<String, ServiceError> {
        lock(&self.uploads).push(file.file_name);
        self.result.clone()
    }
}
