//! Transcript rendering.

use std::fmt::Write;

use super::question::HistoryEntry;

/// Title line of every transcript.
pub const TRANSCRIPT_TITLE: &str = "College Essay Interview Transcript";

/// Renders an answered history as a plain-text document.
///
/// Layout:
///
/// ```text
/// College Essay Interview Transcript
///
/// Question 1: ...
/// Answer 1: ...
///
/// Question 2: ...
/// Answer 2: ...
///
/// ```
#[derive(Debug, Clone)]
pub struct TranscriptAssembler {
    title: String,
}

impl Default for TranscriptAssembler {
    fn default() -> Self {
        Self::new(TRANSCRIPT_TITLE)
    }
}

impl TranscriptAssembler {
    /// Creates an assembler with a custom title line.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Renders the history. Pure: equal input yields byte-identical output.
    pub fn render(&self, history: &[HistoryEntry]) -> String {
        let mut out = String::with_capacity(self.title.len() + 2 + history.len() * 128);
        out.push_str(&self.title);
        out.push_str("\n\n");

        for (i, entry) in history.iter().enumerate() {
            let n = i + 1;
            // Writing to a String cannot fail.
            let _ = write!(
                out,
                "Question {n}: {}\nAnswer {n}: {}\n\n",
                entry.question, entry.answer
            );
        }

        out
    }
}
