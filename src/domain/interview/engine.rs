//! Phase transition engine.
//!
//! Interprets one question-service reply against the session that produced
//! the request. The engine is pure: it returns a new session value and an
//! outcome, and never touches the network.
//!
//! Two independent signals move an interview from rapid-fire to theme mode:
//! a structured tag on the reply, and a transition phrase in the question
//! text itself. Services that cannot emit tags still rely on the phrase, so
//! both are checked and both converge on the same mode change.

use super::errors::InterviewError;
use super::exchange::NextQuestionResponse;
use super::question::QuestionRecord;
use super::session::{FinishReason, SessionState};

/// Tag marking the end of the academic rapid-fire phase.
pub const END_RAPID_FIRE_TAG: &str = "end_rapid_fire_academic";

/// Signals the engine looks for in service replies.
#[derive(Debug, Clone)]
pub struct PhaseSignals {
    /// Tags that end the rapid-fire phase without showing a question.
    pub boundary_tags: Vec<String>,
    /// Phrases (lowercase) in question text that announce theme mode.
    pub transition_phrases: Vec<String>,
    /// Phrases (lowercase) in question text that end the interview.
    pub end_markers: Vec<String>,
}

impl Default for PhaseSignals {
    fn default() -> Self {
        Self {
            boundary_tags: vec![END_RAPID_FIRE_TAG.to_string()],
            transition_phrases: vec![
                "i now have enough information to move on".to_string(),
                "let's now move to broader questions".to_string(),
            ],
            end_markers: vec!["that's the end of the background interview".to_string()],
        }
    }
}

/// What the caller should do after a reply has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Show the new current question and wait for an answer.
    Ask,
    /// The reply was a phase-boundary signal only; fetch again in theme mode
    /// before showing anything.
    RefetchInThemeMode,
    /// The service declared the interview over.
    Finished,
}

/// Result of applying one reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub outcome: TransitionOutcome,
}

/// Engine mapping (session, reply) to (next session, outcome).
#[derive(Debug, Clone, Default)]
pub struct PhaseTransitionEngine {
    signals: PhaseSignals,
}

impl PhaseTransitionEngine {
    /// Creates a new engine with the given signals.
    pub fn new(signals: PhaseSignals) -> Self {
        Self { signals }
    }

    /// True if the tag ends the rapid-fire phase.
    pub fn is_phase_boundary_tag(&self, tag: Option<&str>) -> bool {
        tag.is_some_and(|tag| self.signals.boundary_tags.iter().any(|t| t == tag))
    }

    /// True if the question text announces the move to theme mode.
    pub fn announces_theme_transition(&self, text: &str) -> bool {
        let normalized = normalize(text);
        self.signals
            .transition_phrases
            .iter()
            .any(|phrase| normalized.contains(phrase.as_str()))
    }

    /// True if the question text declares the interview over.
    pub fn declares_interview_end(&self, text: &str) -> bool {
        let normalized = normalize(text);
        self.signals
            .end_markers
            .iter()
            .any(|marker| normalized.contains(marker.as_str()))
    }

    /// Applies a reply to a session.
    ///
    /// Rules, in order:
    /// 1. a reply without `question` is rejected;
    /// 2. a boundary tag switches to theme mode, zeroes the academic index and
    ///    asks for a refetch, leaving the current question untouched (a
    ///    tagged reply carrying the end marker finishes instead);
    /// 3. a transition phrase switches to theme mode and is shown as-is;
    /// 4. the question, tag, theme and theme counts are adopted (absent
    ///    fields leave the session value unchanged);
    /// 5. an end marker finishes the interview;
    /// 6. an echoed academic index replaces the local one.
    ///
    /// # Errors
    ///
    /// `InvalidServiceResponse` if the reply has no question. The input
    /// session is never modified.
    pub fn apply(
        &self,
        session: &SessionState,
        response: NextQuestionResponse,
    ) -> Result<Transition, InterviewError> {
        let question = response
            .question
            .ok_or_else(|| InterviewError::invalid_response("missing 'question' field"))?;

        let mut next = session.clone();
        let ends_interview = self.declares_interview_end(&question);

        if self.is_phase_boundary_tag(response.tag.as_deref()) {
            if ends_interview {
                next.finish(FinishReason::ServiceDeclaredEnd);
                return Ok(Transition {
                    state: next,
                    outcome: TransitionOutcome::Finished,
                });
            }
            next.enter_theme_mode();
            next.set_academic_index(0);
            return Ok(Transition {
                state: next,
                outcome: TransitionOutcome::RefetchInThemeMode,
            });
        }

        if self.announces_theme_transition(&question) {
            next.enter_theme_mode();
        }

        next.show_question(QuestionRecord::new(
            question,
            response.tag.unwrap_or_default(),
        ));
        if let Some(theme) = response.current_theme {
            next.set_current_theme(theme);
        }
        if let Some(counts) = response.theme_counts {
            next.set_theme_counts(counts);
        }

        if ends_interview {
            next.finish(FinishReason::ServiceDeclaredEnd);
        }

        if let Some(index) = response.academic_index {
            next.set_academic_index(index);
        }

        let outcome = if next.is_finished() {
            TransitionOutcome::Finished
        } else {
            TransitionOutcome::Ask
        };

        Ok(Transition {
            state: next,
            outcome,
        })
    }
}

/// Lowercases and folds typographic apostrophes so phrase checks match
/// whatever quote style the service emits.
fn normalize(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'").to_lowercase()
}
