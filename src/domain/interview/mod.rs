//! Interview domain module.
//!
//! Holds the interview session aggregate and the pure decision logic that
//! drives it: which phase the interview is in, how a question-service reply
//! changes the session, when the interview ends, and how the finished
//! history renders as a transcript.

mod engine;
mod errors;
mod exchange;
mod mode;
mod question;
mod session;
mod thresholds;
mod track;
mod transcript;

pub use engine::{
    PhaseSignals, PhaseTransitionEngine, Transition, TransitionOutcome, END_RAPID_FIRE_TAG,
};
pub use errors::InterviewError;
pub use exchange::{NextQuestionRequest, NextQuestionResponse};
pub use mode::Mode;
pub use question::{HistoryEntry, QuestionRecord, ThemeCounts};
pub use session::{FinishReason, SessionState, SKIPPED_CV_TEXT};
pub use thresholds::{
    ThresholdTable, TrackLimits, DEFAULT_ACADEMIC_DEEP_CAP, DEFAULT_BACKGROUND_DEEP_CAP,
    DEFAULT_GLOBAL_TURN_CAP,
};
pub use track::Track;
pub use transcript::{TranscriptAssembler, TRANSCRIPT_TITLE};
