//! Interview session aggregate.
//!
//! A `SessionState` is created once a track is chosen, mutated turn by turn
//! by the controller, and frozen once finished. Nothing is persisted; the
//! whole value is dropped when the interview ends.

use serde::{Deserialize, Serialize};

use super::errors::InterviewError;
use super::exchange::NextQuestionRequest;
use super::mode::Mode;
use super::question::{HistoryEntry, QuestionRecord, ThemeCounts};
use super::track::Track;
use crate::domain::foundation::{SessionId, StateMachine, Timestamp};

/// CV text sent when the candidate skips the upload.
pub const SKIPPED_CV_TEXT: &str = "No CV provided";

/// Why an interview ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The global answered-turn cap was reached.
    GlobalTurnCap,
    /// The track's deep-question cap was reached.
    DeepQuestionCap,
    /// The question service announced the end of the interview.
    ServiceDeclaredEnd,
    /// The candidate stopped the interview.
    Aborted,
}

/// All mutable progress of one interview.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    id: SessionId,
    track: Track,
    mode: Mode,
    cv_text: String,
    history: Vec<HistoryEntry>,
    current_question: QuestionRecord,
    current_theme: String,
    theme_counts: ThemeCounts,
    background_index: u32,
    academic_index: u32,
    deep_question_count: u32,
    finish_reason: Option<FinishReason>,
    awaiting_question: bool,
    started_at: Timestamp,
    finished_at: Option<Timestamp>,
}

impl SessionState {
    /// Creates a fresh session for a track.
    ///
    /// A blank `cv_text` is replaced with [`SKIPPED_CV_TEXT`]. The session
    /// starts out awaiting its first question.
    pub fn new(track: Track, cv_text: impl Into<String>) -> Self {
        let cv_text = cv_text.into();
        let cv_text = if cv_text.trim().is_empty() {
            SKIPPED_CV_TEXT.to_string()
        } else {
            cv_text
        };

        Self {
            id: SessionId::new(),
            track,
            mode: track.initial_mode(),
            cv_text,
            history: Vec::new(),
            current_question: QuestionRecord::default(),
            current_theme: String::new(),
            theme_counts: ThemeCounts::new(),
            background_index: 0,
            academic_index: 0,
            deep_question_count: 0,
            finish_reason: None,
            awaiting_question: true,
            started_at: Timestamp::now(),
            finished_at: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cv_text(&self) -> &str {
        &self.cv_text
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Number of answered turns.
    pub fn turns_answered(&self) -> usize {
        self.history.len()
    }

    pub fn current_question(&self) -> &QuestionRecord {
        &self.current_question
    }

    pub fn current_theme(&self) -> &str {
        &self.current_theme
    }

    pub fn theme_counts(&self) -> &ThemeCounts {
        &self.theme_counts
    }

    pub fn background_index(&self) -> u32 {
        self.background_index
    }

    pub fn academic_index(&self) -> u32 {
        self.academic_index
    }

    pub fn deep_question_count(&self) -> u32 {
        self.deep_question_count
    }

    pub fn is_finished(&self) -> bool {
        self.finish_reason.is_some()
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// True between an appended answer (or session creation) and the next
    /// successfully applied question.
    pub fn awaiting_question(&self) -> bool {
        self.awaiting_question
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Timestamp> {
        self.finished_at
    }

    /// Builds the snapshot sent to the question service.
    pub fn to_request(&self) -> NextQuestionRequest {
        NextQuestionRequest {
            track: self.track,
            cv_text: self.cv_text.clone(),
            history: self.history.clone(),
            theme_counts: self.theme_counts.clone(),
            current_theme: self.current_theme.clone(),
            is_rapid_fire: self.mode.is_rapid_fire(),
            background_index: self.background_index,
            academic_index: self.academic_index,
        }
    }

    /// Appends an answer to the current question and advances the local
    /// per-track index.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation` if the session is finished, is still waiting
    /// for a question, or the answer is blank. The session is untouched.
    pub fn record_answer(&mut self, answer: &str) -> Result<(), InterviewError> {
        if self.is_finished() {
            return Err(InterviewError::precondition("interview is already finished"));
        }
        if self.awaiting_question {
            return Err(InterviewError::precondition(
                "no question is pending an answer",
            ));
        }
        if answer.trim().is_empty() {
            return Err(InterviewError::precondition("answer cannot be empty"));
        }

        self.history
            .push(HistoryEntry::new(&self.current_question, answer));

        match (self.track, self.mode) {
            (Track::FamilyBackground, _) => self.background_index += 1,
            (Track::AcademicInterests, Mode::Theme) => self.academic_index += 1,
            _ => {}
        }

        self.awaiting_question = true;
        Ok(())
    }

    /// Counts one more theme-mode turn and returns the new total.
    pub(crate) fn count_deep_question(&mut self) -> u32 {
        self.deep_question_count += 1;
        self.deep_question_count
    }

    /// Marks the session finished. The first reason wins; later calls are no-ops.
    pub fn finish(&mut self, reason: FinishReason) {
        if self.finish_reason.is_none() {
            self.finish_reason = Some(reason);
            self.finished_at = Some(Timestamp::now());
        }
    }

    /// Moves to theme mode. Returns true if the mode actually changed.
    pub(crate) fn enter_theme_mode(&mut self) -> bool {
        match self.mode.transition_to(Mode::Theme) {
            Ok(mode) => {
                self.mode = mode;
                true
            }
            Err(_) => false,
        }
    }

    pub(crate) fn set_academic_index(&mut self, index: u32) {
        self.academic_index = index;
    }

    pub(crate) fn show_question(&mut self, question: QuestionRecord) {
        self.current_question = question;
        self.awaiting_question = false;
    }

    pub(crate) fn set_current_theme(&mut self, theme: String) {
        self.current_theme = theme;
    }

    pub(crate) fn set_theme_counts(&mut self, counts: ThemeCounts) {
        self.theme_counts = counts;
    }
}
