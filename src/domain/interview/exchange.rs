//! Wire shapes exchanged with the question service.

use serde::{Deserialize, Serialize};

use super::question::{HistoryEntry, ThemeCounts};
use super::track::Track;

/// Snapshot of a session sent to the question service on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextQuestionRequest {
    pub track: Track,
    pub cv_text: String,
    pub history: Vec<HistoryEntry>,
    pub theme_counts: ThemeCounts,
    pub current_theme: String,
    pub is_rapid_fire: bool,
    pub background_index: u32,
    pub academic_index: u32,
}

/// Raw reply from the question service.
///
/// Every field is optional on the wire; the transition engine decides which
/// absences are errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextQuestionResponse {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub current_theme: Option<String>,
    #[serde(default)]
    pub theme_counts: Option<ThemeCounts>,
    #[serde(default)]
    pub academic_index: Option<u32>,
}

impl NextQuestionResponse {
    /// A plain question with no signals or bookkeeping.
    pub fn question(text: impl Into<String>) -> Self {
        Self {
            question: Some(text.into()),
            ..Default::default()
        }
    }

    /// Attaches a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Attaches the current theme.
    pub fn with_current_theme(mut self, theme: impl Into<String>) -> Self {
        self.current_theme = Some(theme.into());
        self
    }

    /// Attaches theme counts.
    pub fn with_theme_counts(mut self, counts: ThemeCounts) -> Self {
        self.theme_counts = Some(counts);
        self
    }

    /// Attaches an academic index override.
    pub fn with_academic_index(mut self, index: u32) -> Self {
        self.academic_index = Some(index);
        self
    }
}
