//! Property tests for interview invariants under arbitrary service behaviour.

use proptest::prelude::*;
use std::sync::Arc;

use essay_interview::adapters::mock::{MockQuestionService, MockReply};
use essay_interview::application::InterviewController;
use essay_interview::domain::interview::{Mode, NextQuestionResponse, Track, END_RAPID_FIRE_TAG};
use essay_interview::ports::ServiceError;

#[derive(Debug, Clone)]
enum Reply {
    Plain,
    Boundary,
    Phrase,
    EndMarker,
    Malformed,
    Failure,
}

impl Reply {
    fn into_mock(self, n: usize) -> MockReply {
        match self {
            Reply::Plain => MockReply::Response(NextQuestionResponse::question(format!("Q{n}"))),
            Reply::Boundary => MockReply::Response(
                NextQuestionResponse::question("signal").with_tag(END_RAPID_FIRE_TAG),
            ),
            Reply::Phrase => MockReply::Response(NextQuestionResponse::question(
                "Let's now move to broader questions.",
            )),
            Reply::EndMarker => MockReply::Response(NextQuestionResponse::question(
                "That's the end of the background interview.",
            )),
            Reply::Malformed => MockReply::Response(NextQuestionResponse::default()),
            Reply::Failure => MockReply::Error(ServiceError::network("connection reset")),
        }
    }
}

fn arb_reply() -> impl Strategy<Value = Reply> {
    prop_oneof![
        6 => Just(Reply::Plain),
        1 => Just(Reply::Boundary),
        1 => Just(Reply::Phrase),
        1 => Just(Reply::EndMarker),
        1 => Just(Reply::Malformed),
        1 => Just(Reply::Failure),
    ]
}

fn arb_track() -> impl Strategy<Value = Track> {
    prop_oneof![
        Just(Track::AcademicInterests),
        Just(Track::ExtracurricularActivities),
        Just(Track::FamilyBackground),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Answering, retrying and aborting never exceed the turn cap and never
    /// return to rapid-fire questions.
    #[test]
    fn history_is_capped_and_mode_is_monotonic(
        track in arb_track(),
        replies in proptest::collection::vec(arb_reply(), 0..40),
    ) {
        let service = MockQuestionService::new();
        for (n, reply) in replies.into_iter().enumerate() {
            service.push(reply.into_mock(n));
        }
        let controller = InterviewController::new(Arc::new(service.clone()));

        runtime().block_on(async {
            let Ok(mut session) = controller.start(track, "").await else {
                return Ok(());
            };
            let mut seen_theme = session.mode() == Mode::Theme;
            if track == Track::FamilyBackground {
                prop_assert_eq!(session.mode(), Mode::Theme);
            }

            for step in 0..60 {
                if session.is_finished() {
                    break;
                }
                let _ = if session.awaiting_question() {
                    controller.retry_fetch(&mut session).await
                } else {
                    controller.submit_answer(&mut session, &format!("answer {step}")).await
                };

                prop_assert!(session.history().len() <= 8);
                if seen_theme {
                    prop_assert_eq!(session.mode(), Mode::Theme);
                }
                seen_theme |= session.mode() == Mode::Theme;
            }

            let before = session.clone();
            controller.abort(&mut session);
            prop_assert!(session.is_finished());
            prop_assert_eq!(session.history(), before.history());
            Ok(())
        })?;
    }
}
