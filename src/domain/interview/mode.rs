//! Question modes within an interview.
//!
//! The mode decides what kind of question the service is asked for. Modes
//! only move forward.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Kind of question currently being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Short, factual questions.
    Rapid,
    /// Deeper follow-ups on one theme at a time.
    Theme,
}

impl Mode {
    /// Value of the `is_rapid_fire` request flag.
    pub fn is_rapid_fire(&self) -> bool {
        matches!(self, Self::Rapid)
    }

    /// Returns a short label suitable for logs and UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rapid => "rapid-fire",
            Self::Theme => "theme",
        }
    }
}

impl StateMachine for Mode {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (Mode::Rapid, Mode::Theme))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Mode::Rapid => vec![Mode::Theme],
            Mode::Theme => vec![],
        }
    }
}
