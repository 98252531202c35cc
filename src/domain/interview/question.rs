//! Questions and answered turns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-theme question counts, owned by the question service and echoed back verbatim.
pub type ThemeCounts = BTreeMap<String, u32>;

/// The question currently shown to the candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question text as emitted by the service.
    pub text: String,
    /// Opaque service signal; empty means none.
    #[serde(default)]
    pub tag: String,
}

impl QuestionRecord {
    /// Creates a question record.
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }

    /// Returns true if no question has been received yet.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One answered turn.
///
/// History order is both display order and the order sent back to the
/// question service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tag: String,
}

impl HistoryEntry {
    /// Creates a history entry from the question that was shown and the answer given.
    pub fn new(question: &QuestionRecord, answer: impl Into<String>) -> Self {
        Self {
            question: question.text.clone(),
            answer: answer.into(),
            tag: question.tag.clone(),
        }
    }
}
