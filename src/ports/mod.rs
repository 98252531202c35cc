//! Ports - Interfaces for external dependencies.
//!
//! The interview logic only talks to the outside world through these traits.
//! Adapters implement them.
//!
//! ## Question Flow
//!
//! - `QuestionService` - Produces the next interview question
//!
//! ## Media
//!
//! - `SpeechSynthesizer` - Reads questions aloud
//! - `Transcriber` - Turns a recorded answer into text
//! - `DocumentExtractor` - Pulls plain text out of an uploaded CV
//!
//! ## Output
//!
//! - `TranscriptSink` - Stores the finished transcript

mod document_extractor;
mod question_service;
mod service_error;
mod speech_synthesizer;
mod transcriber;
mod transcript_sink;

pub use document_extractor::{DocumentExtractor, UploadedFile};
pub use question_service::QuestionService;
pub use service_error::ServiceError;
pub use speech_synthesizer::{AudioClip, SpeechSynthesizer};
pub use transcriber::Transcriber;
pub use transcript_sink::TranscriptSink;
