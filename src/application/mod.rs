//! Application layer - orchestrates interview turns over the ports.
//!
//! - `InterviewController` - start, answer, retry, abort and export operations
//! - `LiveInterview` - single-writer guard for a session shared across tasks
//! - `SpeechDispatcher` - background speech for each new question

mod controller;
mod live;
mod speech;

pub use controller::{InterviewController, TurnStep};
pub use live::LiveInterview;
pub use speech::{SpeechDispatcher, SpokenQuestion};
