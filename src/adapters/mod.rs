//! Adapters - Implementations of port interfaces.
//!
//! - `service_api` - HTTP clients for the interview backend
//! - `mock` - In-process implementations for tests and offline runs
//! - `transcript` - Transcript export to the local filesystem

pub mod mock;
pub mod service_api;
pub mod transcript;

pub use service_api::{
    HttpDocumentExtractor, HttpQuestionService, HttpSpeechSynthesizer, HttpTranscriber,
    ServiceApiClient, ServiceApiConfig,
};
pub use transcript::FileTranscriptSink;
