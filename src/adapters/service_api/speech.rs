//! HTTP implementations of the speech ports.

use async_trait::async_trait;
use serde::Serialize;

use super::client::{ServiceApiClient, TextPayload};
use crate::ports::{AudioClip, ServiceError, SpeechSynthesizer, Transcriber};

const SPEAK_PATH: &str = "speak";
const TRANSCRIBE_PATH: &str = "transcribe";
const RECORDING_FILE_NAME: &str = "recording.wav";
const RECORDING_CONTENT_TYPE: &str = "audio/wav";

#[derive(Serialize)]
struct SpeakRequest<'a> {
    text: &'a str,
}

/// Synthesizes speech via `POST /speak`.
#[derive(Debug, Clone)]
pub struct HttpSpeechSynthesizer {
    client: ServiceApiClient,
}

impl HttpSpeechSynthesizer {
    pub fn new(client: ServiceApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, ServiceError> {
        let (bytes, content_type) = self
            .client
            .post_json_for_bytes(SPEAK_PATH, &SpeakRequest { text })
            .await?;

        if bytes.is_empty() {
            return Err(ServiceError::parse("speech service returned no audio"));
        }

        let clip = AudioClip::new(bytes);
        Ok(match content_type {
            Some(content_type) => clip.with_content_type(content_type),
            None => clip,
        })
    }
}

/// Transcribes recordings via `POST /transcribe`.
#[derive(Debug, Clone)]
pub struct HttpTranscriber {
    client: ServiceApiClient,
}

impl HttpTranscriber {
    pub fn new(client: ServiceApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, recording: AudioClip) -> Result<String, ServiceError> {
        let content_type = recording
            .content_type
            .as_deref()
            .unwrap_or(RECORDING_CONTENT_TYPE);

        let payload: TextPayload = self
            .client
            .post_file(
                TRANSCRIBE_PATH,
                RECORDING_FILE_NAME,
                Some(content_type),
                recording.bytes,
            )
            .await?;

        Ok(payload.text)
    }
}
