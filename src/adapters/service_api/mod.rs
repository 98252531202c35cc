//! HTTP adapters for the interview backend.
//!
//! ## Endpoints
//!
//! | Port | Endpoint |
//! |---|---|
//! | `QuestionService` | `POST /next-question` (JSON) |
//! | `SpeechSynthesizer` | `POST /speak` (JSON in, audio out) |
//! | `Transcriber` | `POST /transcribe` (multipart in, JSON out) |
//! | `DocumentExtractor` | `POST /upload-cv` (multipart in, JSON out) |

mod client;
mod document_extractor;
mod question_service;
mod speech;

pub use client::{ServiceApiClient, ServiceApiConfig, DEFAULT_BASE_URL};
pub use document_extractor::HttpDocumentExtractor;
pub use question_service::HttpQuestionService;
pub use speech::{HttpSpeechSynthesizer, HttpTranscriber};
