//! InterviewController - drives the question/answer turn loop.
//!
//! The controller owns no session; callers hold the `SessionState` and pass
//! it in by mutable reference. Every operation leaves the session consistent
//! on error: an answer that was accepted stays in history, and the session is
//! left `awaiting_question` so `retry_fetch` can finish the turn.

use std::sync::Arc;

use crate::domain::interview::{
    FinishReason, InterviewError, Mode, PhaseTransitionEngine, SessionState, ThresholdTable,
    Track, TranscriptAssembler, Transition, TransitionOutcome,
};
use crate::ports::{
    AudioClip, DocumentExtractor, QuestionService, Transcriber, TranscriptSink, UploadedFile,
};

/// What happens after an answer has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStep {
    /// A stopping rule fired; no fetch is needed.
    Finished,
    /// The next question must be fetched.
    FetchNext,
}

/// Orchestrates one interview at a time per `SessionState`.
pub struct InterviewController {
    questions: Arc<dyn QuestionService>,
    engine: PhaseTransitionEngine,
    thresholds: ThresholdTable,
    assembler: TranscriptAssembler,
    transcriber: Option<Arc<dyn Transcriber>>,
    extractor: Option<Arc<dyn DocumentExtractor>>,
    sink: Option<Arc<dyn TranscriptSink>>,
}

impl InterviewController {
    /// Creates a controller with default signals, thresholds and transcript title.
    pub fn new(questions: Arc<dyn QuestionService>) -> Self {
        Self {
            questions,
            engine: PhaseTransitionEngine::default(),
            thresholds: ThresholdTable::default(),
            assembler: TranscriptAssembler::default(),
            transcriber: None,
            extractor: None,
            sink: None,
        }
    }

    pub fn with_engine(mut self, engine: PhaseTransitionEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdTable) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_assembler(mut self, assembler: TranscriptAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn with_document_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_transcript_sink(mut self, sink: Arc<dyn TranscriptSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Starts an interview and fetches its first question.
    ///
    /// # Errors
    ///
    /// Any fetch failure. Nothing is kept; the caller may simply call `start` again.
    pub async fn start(
        &self,
        track: Track,
        cv_text: impl Into<String>,
    ) -> Result<SessionState, InterviewError> {
        let mut session = SessionState::new(track, cv_text);

        tracing::info!(
            session_id = %session.id(),
            track = %track,
            mode = session.mode().label(),
            "Interview started"
        );

        self.fetch_next(&mut session).await?;
        Ok(session)
    }

    /// Records an answer and, unless a stopping rule fires, fetches the next question.
    ///
    /// # Errors
    ///
    /// - `PreconditionViolation` if the session is finished, has no question
    ///   pending, or the answer is blank. The session is untouched.
    /// - `ServiceUnavailable` / `InvalidServiceResponse` if the fetch fails.
    ///   The answer stays in history and `retry_fetch` completes the turn.
    pub async fn submit_answer(
        &self,
        session: &mut SessionState,
        answer: &str,
    ) -> Result<(), InterviewError> {
        match self.record_turn(session, answer)? {
            TurnStep::Finished => Ok(()),
            TurnStep::FetchNext => self.fetch_next(session).await,
        }
    }

    /// Re-issues the fetch for a turn whose previous fetch failed.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation` unless the session is unfinished and awaiting a
    /// question; otherwise the same errors as `submit_answer`.
    pub async fn retry_fetch(&self, session: &mut SessionState) -> Result<(), InterviewError> {
        if session.is_finished() {
            return Err(InterviewError::precondition("interview is already finished"));
        }
        if !session.awaiting_question() {
            return Err(InterviewError::precondition(
                "current question is already available",
            ));
        }

        tracing::info!(
            session_id = %session.id(),
            turn = session.turns_answered(),
            "Retrying question fetch"
        );
        self.fetch_next(session).await
    }

    /// Stops the interview, keeping history as-is. Safe to call repeatedly.
    pub fn abort(&self, session: &mut SessionState) {
        if session.is_finished() {
            return;
        }
        session.finish(FinishReason::Aborted);
        tracing::info!(
            session_id = %session.id(),
            turn = session.turns_answered(),
            "Interview aborted"
        );
    }

    /// Appends the answer and evaluates the local stopping rules.
    ///
    /// The global turn cap is checked first; only then is a theme-mode turn
    /// counted against the track's deep-question cap.
    pub fn record_turn(
        &self,
        session: &mut SessionState,
        answer: &str,
    ) -> Result<TurnStep, InterviewError> {
        session.record_answer(answer)?;
        let turn = session.turns_answered();

        if self.thresholds.global_cap_reached(turn) {
            session.finish(FinishReason::GlobalTurnCap);
            tracing::info!(
                session_id = %session.id(),
                track = %session.track(),
                turn,
                "Interview finished: turn cap reached"
            );
            return Ok(TurnStep::Finished);
        }

        if session.mode() == Mode::Theme {
            let deep_questions = session.count_deep_question();
            if self
                .thresholds
                .deep_cap_reached(session.track(), deep_questions)
            {
                session.finish(FinishReason::DeepQuestionCap);
                tracing::info!(
                    session_id = %session.id(),
                    track = %session.track(),
                    turn,
                    deep_questions,
                    "Interview finished: deep-question cap reached"
                );
                return Ok(TurnStep::Finished);
            }
        }

        Ok(TurnStep::FetchNext)
    }

    /// Fetches the next question and applies it.
    ///
    /// A phase-boundary reply triggers exactly one follow-up fetch in theme
    /// mode. If the follow-up is itself a boundary signal, the mode switch is
    /// kept and `InvalidServiceResponse` is returned.
    pub async fn fetch_next(&self, session: &mut SessionState) -> Result<(), InterviewError> {
        let previous_mode = session.mode();
        let transition = self.fetch_and_apply(session).await?;
        *session = transition.state;

        if transition.outcome == TransitionOutcome::RefetchInThemeMode {
            self.log_mode_switch(session, previous_mode);

            let follow_up = self.fetch_and_apply(session).await?;
            if follow_up.outcome == TransitionOutcome::RefetchInThemeMode {
                tracing::warn!(
                    session_id = %session.id(),
                    "Question service repeated the phase-boundary signal"
                );
                return Err(InterviewError::invalid_response(
                    "phase-boundary signal repeated on follow-up fetch",
                ));
            }
            *session = follow_up.state;
        } else {
            self.log_mode_switch(session, previous_mode);
        }

        if session.is_finished() {
            tracing::info!(
                session_id = %session.id(),
                track = %session.track(),
                turn = session.turns_answered(),
                "Interview finished: question service declared the end"
            );
        }

        Ok(())
    }

    async fn fetch_and_apply(&self, session: &SessionState) -> Result<Transition, InterviewError> {
        let request = session.to_request();

        let response = self.questions.next_question(&request).await.map_err(|e| {
            tracing::warn!(
                session_id = %session.id(),
                turn = session.turns_answered(),
                error = %e,
                "Question fetch failed"
            );
            InterviewError::from(e)
        })?;

        tracing::debug!(
            session_id = %session.id(),
            tag = response.tag.as_deref().unwrap_or(""),
            "Question received"
        );

        self.engine.apply(session, response).map_err(|e| {
            tracing::warn!(session_id = %session.id(), error = %e, "Rejected question reply");
            e
        })
    }

    fn log_mode_switch(&self, session: &SessionState, previous: Mode) {
        if session.mode() != previous {
            tracing::info!(
                session_id = %session.id(),
                track = %session.track(),
                mode = session.mode().label(),
                turn = session.turns_answered(),
                "Switched to theme questions"
            );
        }
    }

    /// Transcribes a recorded answer into draft text. The session is never touched.
    pub async fn transcribe_answer(&self, recording: AudioClip) -> Result<String, InterviewError> {
        let transcriber = self
            .transcriber
            .as_ref()
            .ok_or_else(|| InterviewError::unavailable("no transcription service configured"))?;

        transcriber.transcribe(recording).await.map_err(|e| {
            tracing::warn!(error = %e, "Transcription failed");
            InterviewError::from(e)
        })
    }

    /// Extracts CV text from an uploaded file.
    pub async fn extract_cv(&self, upload: UploadedFile) -> Result<String, InterviewError> {
        let extractor = self
            .extractor
            .as_ref()
            .ok_or_else(|| InterviewError::unavailable("no document extraction service configured"))?;

        let file_name = upload.file_name.clone();
        extractor.extract_text(upload).await.map_err(|e| {
            tracing::warn!(file_name = %file_name, error = %e, "CV extraction failed");
            InterviewError::from(e)
        })
    }

    /// Renders the transcript of a session.
    pub fn render_transcript(&self, session: &SessionState) -> String {
        self.assembler.render(session.history())
    }

    /// Renders a finished session and hands it to the transcript sink.
    ///
    /// Returns the location reported by the sink.
    pub async fn export_transcript(&self, session: &SessionState) -> Result<String, InterviewError> {
        if !session.is_finished() {
            return Err(InterviewError::precondition(
                "transcript is only available once the interview is finished",
            ));
        }
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| InterviewError::unavailable("no transcript sink configured"))?;

        let content = self.render_transcript(session);
        let location = sink.save(session.id(), &content).await?;

        tracing::info!(
            session_id = %session.id(),
            location = %location,
            entries = session.history().len(),
            "Transcript exported"
        );
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        InMemoryTranscriptSink, MockDocumentExtractor, MockQuestionService, MockTranscriber,
    };
    use crate::domain::interview::{NextQuestionResponse, TrackLimits, END_RAPID_FIRE_TAG};
    use crate::ports::ServiceError;

    fn controller(service: &MockQuestionService) -> InterviewController {
        InterviewController::new(Arc::new(service.clone()))
    }

    mod start {
        use super::*;

        #[tokio::test]
        async fn fetches_first_question_with_empty_history() {
            let service = MockQuestionService::new().with_question("What do you study?");

            let session = controller(&service)
                .start(Track::AcademicInterests, "")
                .await
                .unwrap();

            assert_eq!(session.current_question().text, "What do you study?");
            assert!(!session.awaiting_question());
            let request = service.last_call().unwrap();
            assert!(request.history.is_empty());
            assert!(request.is_rapid_fire);
            assert_eq!(request.cv_text, "No CV provided");
        }

        #[tokio::test]
        async fn background_track_requests_theme_questions() {
            let service = MockQuestionService::new();

            let session = controller(&service)
                .start(Track::FamilyBackground, "cv")
                .await
                .unwrap();

            assert_eq!(session.mode(), Mode::Theme);
            assert!(!service.last_call().unwrap().is_rapid_fire);
        }

        #[tokio::test]
        async fn surfaces_unreachable_service() {
            let service = MockQuestionService::new().with_error(ServiceError::network("refused"));

            let result = controller(&service).start(Track::AcademicInterests, "cv").await;

            assert!(matches!(result, Err(InterviewError::ServiceUnavailable(_))));
        }

        #[tokio::test]
        async fn boundary_tag_on_first_reply_refetches() {
            let service = MockQuestionService::new()
                .with_response(NextQuestionResponse::question("ignored").with_tag(END_RAPID_FIRE_TAG))
                .with_question("Tell me about a theme.");

            let session = controller(&service)
                .start(Track::AcademicInterests, "cv")
                .await
                .unwrap();

            assert_eq!(session.mode(), Mode::Theme);
            assert_eq!(session.current_question().text, "Tell me about a theme.");
            assert_eq!(service.call_count(), 2);
            assert!(!service.get_calls()[1].is_rapid_fire);
        }
    }

    mod submit_answer {
        use super::*;

        #[tokio::test]
        async fn appends_then_fetches() {
            let service = MockQuestionService::new()
                .with_question("Q1")
                .with_question("Q2");
            let controller = controller(&service);
            let mut session = controller.start(Track::AcademicInterests, "cv").await.unwrap();

            controller.submit_answer(&mut session, "A1").await.unwrap();

            assert_eq!(session.history().len(), 1);
            assert_eq!(session.history()[0].question, "Q1");
            assert_eq!(session.history()[0].answer, "A1");
            assert_eq!(session.current_question().text, "Q2");
            assert_eq!(service.last_call().unwrap().history.len(), 1);
        }

        #[tokio::test]
        async fn rejects_blank_answer() {
            let service = MockQuestionService::new();
            let controller = controller(&service);
            let mut session = controller.start(Track::AcademicInterests, "cv").await.unwrap();

            let result = controller.submit_answer(&mut session, "   ").await;

            assert!(matches!(result, Err(InterviewError::PreconditionViolation(_))));
            assert!(session.history().is_empty());
            assert_eq!(service.call_count(), 1);
        }

        #[tokio::test]
        async fn rejects_finished_session() {
            let service = MockQuestionService::new();
            let controller = controller(&service);
            let mut session = controller.start(Track::AcademicInterests, "cv").await.unwrap();
            controller.abort(&mut session);

            let result = controller.submit_answer(&mut session, "late").await;

            assert!(matches!(result, Err(InterviewError::PreconditionViolation(_))));
        }

        #[tokio::test]
        async fn failed_fetch_keeps_answer_and_allows_retry() {
            let service = MockQuestionService::new()
                .with_question("Q1")
                .with_error(ServiceError::Timeout { timeout_secs: 60 })
                .with_question("Q2");
            let controller = controller(&service);
            let mut session = controller.start(Track::AcademicInterests, "cv").await.unwrap();

            let result = controller.submit_answer(&mut session, "A1").await;
            assert!(matches!(result, Err(InterviewError::ServiceUnavailable(_))));
            assert_eq!(session.history().len(), 1);
            assert_eq!(session.current_question().text, "Q1");
            assert!(session.awaiting_question());

            let again = controller.submit_answer(&mut session, "A1").await;
            assert!(matches!(again, Err(InterviewError::PreconditionViolation(_))));

            controller.retry_fetch(&mut session).await.unwrap();
            assert_eq!(session.history().len(), 1);
            assert_eq!(session.current_question().text, "Q2");
        }

        #[tokio::test]
        async fn repeated_boundary_signal_keeps_mode_switch() {
            let signal = NextQuestionResponse::question("x").with_tag(END_RAPID_FIRE_TAG);
            let service = MockQuestionService::new()
                .with_question("Q1")
                .with_response(signal.clone())
                .with_response(signal);
            let controller = controller(&service);
            let mut session = controller.start(Track::AcademicInterests, "cv").await.unwrap();

            let result = controller.submit_answer(&mut session, "A1").await;

            assert!(matches!(result, Err(InterviewError::InvalidServiceResponse(_))));
            assert_eq!(session.mode(), Mode::Theme);
            assert!(session.awaiting_question());
            assert_eq!(session.current_question().text, "Q1");
        }

        #[tokio::test]
        async fn tagged_end_marker_finishes_without_refetch() {
            let service = MockQuestionService::new()
                .with_question("Q1")
                .with_response(
                    NextQuestionResponse::question(
                        "Thanks. That's the end of the background interview.",
                    )
                    .with_tag(END_RAPID_FIRE_TAG),
                );
            let controller = controller(&service);
            let mut session = controller.start(Track::AcademicInterests, "cv").await.unwrap();

            controller.submit_answer(&mut session, "A1").await.unwrap();

            assert!(session.is_finished());
            assert_eq!(session.finish_reason(), Some(FinishReason::ServiceDeclaredEnd));
            assert_eq!(session.current_question().text, "Q1");
            assert_eq!(service.call_count(), 2);
        }

        #[tokio::test]
        async fn deep_cap_fires_when_below_global_cap() {
            let service = MockQuestionService::new();
            let thresholds = ThresholdTable::default()
                .with_global_turn_cap(20)
                .with_track_limits(Track::FamilyBackground, TrackLimits::capped(3));
            let controller = controller(&service).with_thresholds(thresholds);
            let mut session = controller.start(Track::FamilyBackground, "cv").await.unwrap();

            for answer in ["a", "b", "c"] {
                controller.submit_answer(&mut session, answer).await.unwrap();
            }

            assert!(session.is_finished());
            assert_eq!(session.finish_reason(), Some(FinishReason::DeepQuestionCap));
            assert_eq!(session.deep_question_count(), 3);
            // start + two fetches; the third answer hit the cap.
            assert_eq!(service.call_count(), 3);
        }
    }

    mod retry_fetch {
        use super::*;

        #[tokio::test]
        async fn rejects_when_question_is_available() {
            let service = MockQuestionService::new();
            let controller = controller(&service);
            let mut session = controller.start(Track::AcademicInterests, "cv").await.unwrap();

            let result = controller.retry_fetch(&mut session).await;

            assert!(matches!(result, Err(InterviewError::PreconditionViolation(_))));
            assert_eq!(service.call_count(), 1);
        }
    }

    mod abort {
        use super::*;

        #[tokio::test]
        async fn keeps_first_finish_reason() {
            let service = MockQuestionService::new().with_question(
                "Thanks! That's the end of the background interview.",
            );
            let controller = controller(&service);
            let mut session = controller.start(Track::FamilyBackground, "cv").await.unwrap();

            controller.abort(&mut session);

            assert_eq!(session.finish_reason(), Some(FinishReason::ServiceDeclaredEnd));
        }
    }

    mod collaborators {
        use super::*;

        #[tokio::test]
        async fn transcribe_returns_draft_text() {
            let transcriber = MockTranscriber::returning("I like chemistry");
            let controller =
                controller(&MockQuestionService::new()).with_transcriber(Arc::new(transcriber.clone()));

            let text = controller
                .transcribe_answer(AudioClip::new(vec![1, 2, 3]))
                .await
                .unwrap();

            assert_eq!(text, "I like chemistry");
            assert_eq!(transcriber.call_count(), 1);
        }

        #[tokio::test]
        async fn transcribe_without_service_is_unavailable() {
            let controller = controller(&MockQuestionService::new());

            let result = controller.transcribe_answer(AudioClip::new(vec![1])).await;

            assert!(matches!(result, Err(InterviewError::ServiceUnavailable(_))));
        }

        #[tokio::test]
        async fn extract_cv_maps_parse_failures() {
            let extractor = MockDocumentExtractor::failing(ServiceError::parse("bad json"));
            let controller =
                controller(&MockQuestionService::new()).with_document_extractor(Arc::new(extractor));

            let result = controller
                .extract_cv(UploadedFile::new("cv.pdf", vec![0]))
                .await;

            assert!(matches!(result, Err(InterviewError::InvalidServiceResponse(_))));
        }

        #[tokio::test]
        async fn export_requires_finished_session() {
            let sink = InMemoryTranscriptSink::new();
            let controller =
                controller(&MockQuestionService::new()).with_transcript_sink(Arc::new(sink.clone()));
            let mut session = controller.start(Track::AcademicInterests, "cv").await.unwrap();
            controller.submit_answer(&mut session, "A1").await.unwrap();

            let early = controller.export_transcript(&session).await;
            assert!(matches!(early, Err(InterviewError::PreconditionViolation(_))));

            controller.abort(&mut session);
            controller.export_transcript(&session).await.unwrap();

            let saved = sink.saved();
            assert_eq!(saved.len(), 1);
            assert_eq!(saved[0].0, session.id());
            assert!(saved[0].1.contains("Question 1: Mock question 1\nAnswer 1: A1\n"));
        }
    }
}
