//! SpeechDispatcher - reads each new question aloud in the background.
//!
//! Speech is best-effort. Synthesis runs on its own task and the turn loop
//! never waits for it; a failure is logged and the question is simply not
//! spoken.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::foundation::SessionId;
use crate::domain::interview::SessionState;
use crate::ports::{AudioClip, SpeechSynthesizer};

/// Audio ready for playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenQuestion {
    pub session_id: SessionId,
    pub text: String,
    pub audio: AudioClip,
}

/// Fire-and-forget speech for the current question.
#[derive(Clone)]
pub struct SpeechDispatcher {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    sender: mpsc::Sender<SpokenQuestion>,
}

impl SpeechDispatcher {
    /// Creates a dispatcher and the receiver that playback reads from.
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<SpokenQuestion>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self {
                synthesizer,
                sender,
            },
            receiver,
        )
    }

    /// Speaks the session's current question.
    ///
    /// Does nothing for a finished session or one without a question.
    /// Must be called from within a Tokio runtime.
    pub fn announce(&self, session: &SessionState) -> Option<JoinHandle<()>> {
        if session.is_finished() || session.current_question().is_empty() {
            return None;
        }

        let session_id = session.id();
        let text = session.current_question().text.clone();
        let synthesizer = Arc::clone(&self.synthesizer);
        let sender = self.sender.clone();

        Some(tokio::spawn(async move {
            match synthesizer.synthesize(&text).await {
                Ok(audio) => {
                    if sender
                        .send(SpokenQuestion {
                            session_id,
                            text,
                            audio,
                        })
                        .await
                        .is_err()
                    {
                        tracing::debug!(session_id = %session_id, "Playback receiver closed");
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id,
                        error = %e,
                        "Speech synthesis failed; question will not be spoken"
                    );
                }
            }
        }))
    }
}
