//! Interview tracks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::mode::Mode;
use crate::domain::foundation::ValidationError;

/// The topical focus chosen for an interview.
///
/// Serialized as the display label, which is what the question service
/// keys its prompts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    #[serde(rename = "Academic Interests")]
    AcademicInterests,
    #[serde(rename = "Extracurricular Activities")]
    ExtracurricularActivities,
    #[serde(rename = "Family & Background")]
    FamilyBackground,
}

impl Track {
    /// All tracks in menu order.
    pub const ALL: [Track; 3] = [
        Track::AcademicInterests,
        Track::ExtracurricularActivities,
        Track::FamilyBackground,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AcademicInterests => "Academic Interests",
            Self::ExtracurricularActivities => "Extracurricular Activities",
            Self::FamilyBackground => "Family & Background",
        }
    }

    /// Mode a fresh session on this track starts in.
    ///
    /// The background track has no rapid-fire phase.
    pub fn initial_mode(&self) -> Mode {
        match self {
            Self::AcademicInterests | Self::ExtracurricularActivities => Mode::Rapid,
            Self::FamilyBackground => Mode::Theme,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Track {
    type Err = ValidationError;

    /// Accepts the display label, the snake_case name, or the 1-based menu number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| {
                    ValidationError::invalid_format("track", format!("no track numbered {n}"))
                });
        }
        match trimmed.to_lowercase().as_str() {
            "academic interests" | "academic_interests" => Ok(Self::AcademicInterests),
            "extracurricular activities" | "extracurricular_activities" => {
                Ok(Self::ExtracurricularActivities)
            }
            "family & background" | "family_background" => Ok(Self::FamilyBackground),
            "" => Err(ValidationError::empty_field("track")),
            other => Err(ValidationError::invalid_format(
                "track",
                format!("unknown track '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod serialization {
        use super::*;

        #[test]
        fn serializes_to_display_label() {
            let json = serde_json::to_string(&Track::FamilyBackground).unwrap();
            assert_eq!(json, "\"Family & Background\"");
        }

        #[test]
        fn deserializes_from_display_label() {
            let track: Track = serde_json::from_str("\"Academic Interests\"").unwrap();
            assert_eq!(track, Track::AcademicInterests);
        }

        #[test]
        fn label_matches_serialized_form() {
            for track in Track::ALL {
                let json = serde_json::to_string(&track).unwrap();
                assert_eq!(json, format!("\"{}\"", track.label()));
            }
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn parses_labels_case_insensitively() {
            assert_eq!(
                "extracurricular ACTIVITIES".parse::<Track>().unwrap(),
                Track::ExtracurricularActivities
            );
        }

        #[test]
        fn parses_snake_case_names() {
            assert_eq!(
                "family_background".parse::<Track>().unwrap(),
                Track::FamilyBackground
            );
        }

        #[test]
        fn parses_menu_numbers() {
            assert_eq!("1".parse::<Track>().unwrap(), Track::AcademicInterests);
            assert_eq!(" 3 ".parse::<Track>().unwrap(), Track::FamilyBackground);
        }

        #[test]
        fn rejects_out_of_range_numbers() {
            assert!("0".parse::<Track>().is_err());
            assert!("4".parse::<Track>().is_err());
        }

        #[test]
        fn rejects_empty_and_unknown() {
            assert_eq!(
                "  ".parse::<Track>().unwrap_err(),
                ValidationError::empty_field("track")
            );
            assert!("sports".parse::<Track>().is_err());
        }
    }

    mod initial_mode {
        use super::*;

        #[test]
        fn academic_starts_rapid() {
            assert_eq!(Track::AcademicInterests.initial_mode(), Mode::Rapid);
        }

        #[test]
        fn extracurricular_starts_rapid() {
            assert_eq!(Track::ExtracurricularActivities.initial_mode(), Mode::Rapid);
        }

        #[test]
        fn background_skips_rapid_fire() {
            assert_eq!(Track::FamilyBackground.initial_mode(), Mode::Theme);
        }
    }
}
