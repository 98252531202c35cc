//! In-process adapters for tests and offline runs.
//!
//! Every mock is cheap to clone; clones share their queue and call log, so a
//! test can hand one clone to the controller and inspect the other.

mod media;
mod question_service;
mod transcript_sink;

pub use media::{MockDocumentExtractor, MockSpeechSynthesizer, MockTranscriber};
pub use question_service::{MockQuestionService, MockReply};
pub use transcript_sink::InMemoryTranscriptSink;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a mock's shared state, ignoring poisoning from a panicked test thread.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
