//! LiveInterview - a session shared between a UI loop and background work.
//!
//! Turns are strictly sequential. A `loading` flag keeps a second fetch from
//! starting while one is in flight, the network call runs without holding
//! the lock, and a reply that lands after `abort` is dropped instead of
//! being applied to a finished session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::controller::{InterviewController, TurnStep};
use crate::domain::interview::{InterviewError, SessionState, Track};

#[derive(Debug)]
struct LiveState {
    session: SessionState,
    loading: bool,
}

/// A single-writer interview session.
pub struct LiveInterview {
    controller: Arc<InterviewController>,
    state: Mutex<LiveState>,
}

impl LiveInterview {
    /// Starts an interview and wraps the resulting session.
    pub async fn start(
        controller: Arc<InterviewController>,
        track: Track,
        cv_text: impl Into<String>,
    ) -> Result<Self, InterviewError> {
        let session = controller.start(track, cv_text).await?;
        Ok(Self::from_session(controller, session))
    }

    /// Wraps an existing session.
    pub fn from_session(controller: Arc<InterviewController>, session: SessionState) -> Self {
        Self {
            controller,
            state: Mutex::new(LiveState {
                session,
                loading: false,
            }),
        }
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> SessionState {
        self.lock().session.clone()
    }

    /// True while a question fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Submits an answer and fetches the next question.
    ///
    /// Returns the session as it stands after the turn. If the interview was
    /// aborted while the fetch was in flight, the reply is discarded and the
    /// aborted session is returned.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation` while another fetch is outstanding, plus
    /// everything `InterviewController::submit_answer` can return.
    pub async fn submit_answer(&self, answer: &str) -> Result<SessionState, InterviewError> {
        let snapshot = {
            let mut state = self.lock();
            if state.loading {
                return Err(InterviewError::precondition(
                    "a question is already being fetched",
                ));
            }
            match self.controller.record_turn(&mut state.session, answer)? {
                TurnStep::Finished => return Ok(state.session.clone()),
                TurnStep::FetchNext => {}
            }
            state.loading = true;
            state.session.clone()
        };

        self.complete_fetch(snapshot).await
    }

    /// Retries a failed fetch.
    pub async fn retry_fetch(&self) -> Result<SessionState, InterviewError> {
        let snapshot = {
            let mut state = self.lock();
            if state.loading {
                return Err(InterviewError::precondition(
                    "a question is already being fetched",
                ));
            }
            if state.session.is_finished() || !state.session.awaiting_question() {
                return Err(InterviewError::precondition("no fetch to retry"));
            }
            state.loading = true;
            state.session.clone()
        };

        self.complete_fetch(snapshot).await
    }

    /// Aborts the interview. Allowed at any time, including mid-fetch.
    pub fn abort(&self) -> SessionState {
        let mut state = self.lock();
        self.controller.abort(&mut state.session);
        state.session.clone()
    }

    async fn complete_fetch(&self, mut working: SessionState) -> Result<SessionState, InterviewError> {
        let _loading = LoadingGuard { live: self };
        let result = self.controller.fetch_next(&mut working).await;

        let mut state = self.lock();
        if state.session.is_finished() {
            tracing::warn!(
                session_id = %state.session.id(),
                "Discarding question reply for finished interview"
            );
            return Ok(state.session.clone());
        }

        // Commit even on error: a failed follow-up fetch may already carry a mode switch.
        state.session = working;
        result.map(|_| state.session.clone())
    }

    fn lock(&self) -> MutexGuard<'_, LiveState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the loading flag when a fetch completes or its future is dropped.
struct LoadingGuard<'a> {
    live: &'a LiveInterview,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.live.lock().loading = false;
    }
}
