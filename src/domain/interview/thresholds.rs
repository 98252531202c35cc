//! Termination thresholds, keyed by track.
//!
//! The global turn cap is always checked before the per-track deep-question
//! cap. With the default values (8 turns against 9 and 25 deep questions) the
//! per-track caps can never fire; raise `global_turn_cap` to reach them.

use super::track::Track;

/// Default cap on answered turns, across every track.
pub const DEFAULT_GLOBAL_TURN_CAP: usize = 8;
/// Default deep-question cap for the academic track.
pub const DEFAULT_ACADEMIC_DEEP_CAP: u32 = 9;
/// Default deep-question cap for the background track.
pub const DEFAULT_BACKGROUND_DEEP_CAP: u32 = 25;

/// Limits that apply to one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackLimits {
    /// Theme-mode turns after which the interview ends; `None` means no cap.
    pub deep_question_cap: Option<u32>,
}

impl TrackLimits {
    /// Limits with no deep-question cap.
    pub const fn uncapped() -> Self {
        Self {
            deep_question_cap: None,
        }
    }

    /// Limits with the given deep-question cap.
    pub const fn capped(cap: u32) -> Self {
        Self {
            deep_question_cap: Some(cap),
        }
    }
}

/// Table of termination thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdTable {
    global_turn_cap: usize,
    academic: TrackLimits,
    extracurricular: TrackLimits,
    background: TrackLimits,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            global_turn_cap: DEFAULT_GLOBAL_TURN_CAP,
            academic: TrackLimits::capped(DEFAULT_ACADEMIC_DEEP_CAP),
            extracurricular: TrackLimits::uncapped(),
            background: TrackLimits::capped(DEFAULT_BACKGROUND_DEEP_CAP),
        }
    }
}

impl ThresholdTable {
    /// Overrides the global turn cap.
    pub fn with_global_turn_cap(mut self, cap: usize) -> Self {
        self.global_turn_cap = cap;
        self
    }

    /// Overrides the limits for one track.
    pub fn with_track_limits(mut self, track: Track, limits: TrackLimits) -> Self {
        match track {
            Track::AcademicInterests => self.academic = limits,
            Track::ExtracurricularActivities => self.extracurricular = limits,
            Track::FamilyBackground => self.background = limits,
        }
        self
    }

    /// Returns the global turn cap.
    pub fn global_turn_cap(&self) -> usize {
        self.global_turn_cap
    }

    /// Returns the limits for a track.
    pub fn limits_for(&self, track: Track) -> TrackLimits {
        match track {
            Track::AcademicInterests => self.academic,
            Track::ExtracurricularActivities => self.extracurricular,
            Track::FamilyBackground => self.background,
        }
    }

    /// True once `answered` turns reach the global cap.
    pub fn global_cap_reached(&self, answered: usize) -> bool {
        answered >= self.global_turn_cap
    }

    /// True once `deep_questions` reach the track's cap, if it has one.
    pub fn deep_cap_reached(&self, track: Track, deep_questions: u32) -> bool {
        self.limits_for(track)
            .deep_question_cap
            .is_some_and(|cap| deep_questions >= cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_thresholds() {
        let table = ThresholdTable::default();
        assert_eq!(table.global_turn_cap(), 8);
        assert_eq!(
            table.limits_for(Track::AcademicInterests).deep_question_cap,
            Some(9)
        );
        assert_eq!(
            table.limits_for(Track::FamilyBackground).deep_question_cap,
            Some(25)
        );
        assert_eq!(
            table.limits_for(Track::ExtracurricularActivities).deep_question_cap,
            None
        );
    }

    #[test]
    fn global_cap_is_inclusive() {
        let table = ThresholdTable::default();
        assert!(!table.global_cap_reached(7));
        assert!(table.global_cap_reached(8));
    }

    #[test]
    fn deep_cap_only_applies_to_capped_tracks() {
        let table = ThresholdTable::default();
        assert!(table.deep_cap_reached(Track::AcademicInterests, 9));
        assert!(!table.deep_cap_reached(Track::AcademicInterests, 8));
        assert!(!table.deep_cap_reached(Track::ExtracurricularActivities, 1_000));
    }

    #[test]
    fn default_deep_caps_lie_beyond_the_global_cap() {
        let table = ThresholdTable::default();
        for track in Track::ALL {
            if let Some(cap) = table.limits_for(track).deep_question_cap {
                assert!(cap as usize > table.global_turn_cap());
            }
        }
    }

    #[test]
    fn overrides_apply_per_track() {
        let table = ThresholdTable::default()
            .with_global_turn_cap(30)
            .with_track_limits(Track::ExtracurricularActivities, TrackLimits::capped(4));

        assert_eq!(table.global_turn_cap(), 30);
        assert!(table.deep_cap_reached(Track::ExtracurricularActivities, 4));
        assert_eq!(
            table.limits_for(Track::AcademicInterests),
            TrackLimits::capped(DEFAULT_ACADEMIC_DEEP_CAP)
        );
    }
}
