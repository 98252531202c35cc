//! Interview stopping-rule configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::interview::{
    ThresholdTable, Track, TrackLimits, DEFAULT_ACADEMIC_DEEP_CAP, DEFAULT_BACKGROUND_DEEP_CAP,
    DEFAULT_GLOBAL_TURN_CAP,
};

/// Turn caps applied by the controller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterviewConfig {
    /// Answered turns after which every interview ends
    #[serde(default = "default_global_turn_cap")]
    pub global_turn_cap: usize,

    /// Theme-mode turns after which an academic interview ends
    #[serde(default = "default_academic_deep_cap")]
    pub academic_deep_cap: u32,

    /// Theme-mode turns after which a background interview ends
    #[serde(default = "default_background_deep_cap")]
    pub background_deep_cap: u32,
}

impl InterviewConfig {
    /// Builds the controller's threshold table.
    ///
    /// Extracurricular interviews have no deep-question cap.
    pub fn thresholds(&self) -> ThresholdTable {
        ThresholdTable::default()
            .with_global_turn_cap(self.global_turn_cap)
            .with_track_limits(
                Track::AcademicInterests,
                TrackLimits::capped(self.academic_deep_cap),
            )
            .with_track_limits(
                Track::FamilyBackground,
                TrackLimits::capped(self.background_deep_cap),
            )
    }

    /// Validate interview configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.global_turn_cap == 0 {
            return Err(ValidationError::ZeroCap("global_turn_cap"));
        }
        if self.academic_deep_cap == 0 {
            return Err(ValidationError::ZeroCap("academic_deep_cap"));
        }
        if self.background_deep_cap == 0 {
            return Err(ValidationError::ZeroCap("background_deep_cap"));
        }
        Ok(())
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            global_turn_cap: default_global_turn_cap(),
            academic_deep_cap: default_academic_deep_cap(),
            background_deep_cap: default_background_deep_cap(),
        }
    }
}

fn default_global_turn_cap() -> usize {
    DEFAULT_GLOBAL_TURN_CAP
}

fn default_academic_deep_cap() -> u32 {
    DEFAULT_ACADEMIC_DEEP_CAP
}

fn default_background_deep_cap() -> u32 {
    DEFAULT_BACKGROUND_DEEP_CAP
}
