//! Alert classification for normalized risk scores
//!
//! Maps a 0-100 score onto four tiers and each tier onto the badge metadata
//! the case list renders (color and icon).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Four-tier categorical risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    /// Score 0-29
    NoneLow,
    /// Score 30-59
    Moderate,
    /// Score 60-79
    High,
    /// Score 80-100
    Critical,
}

/// Lower edge of each tier above `NoneLow`.
const MODERATE_FLOOR: f64 = 30.0;
const HIGH_FLOOR: f64 = 60.0;
const CRITICAL_FLOOR: f64 = 80.0;

impl AlertLevel {
    pub const ALL: [AlertLevel; 4] = [
        AlertLevel::NoneLow,
        AlertLevel::Moderate,
        AlertLevel::High,
        AlertLevel::Critical,
    ];

    /// Classify a normalized score.
    ///
    /// Anything outside `[0, 100]`, NaN included, falls back to `NoneLow`.
    /// A fractional score between two bands (e.g. 29.5) stays in the lower band.
    pub fn from_score(score: f64) -> Self {
        if !(0.0..=100.0).contains(&score) {
            return AlertLevel::NoneLow;
        }

        if score < MODERATE_FLOOR {
            AlertLevel::NoneLow
        } else if score < HIGH_FLOOR {
            AlertLevel::Moderate
        } else if score < CRITICAL_FLOOR {
            AlertLevel::High
        } else {
            AlertLevel::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::NoneLow => "none_low",
            AlertLevel::Moderate => "moderate",
            AlertLevel::High => "high",
            AlertLevel::Critical => "critical",
        }
    }

    /// Human readable label for reports
    pub fn label(self) -> &'static str {
        match self {
            AlertLevel::NoneLow => "None/Low",
            AlertLevel::Moderate => "Moderate",
            AlertLevel::High => "High",
            AlertLevel::Critical => "Critical",
        }
    }

    pub fn presentation(self) -> Presentation {
        presentation_for(self)
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        AlertLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| {
                format!("unknown alert level '{s}' (expected none_low, moderate, high or critical)")
            })
    }
}

/// Badge color used when rendering an alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeColor {
    Green,
    Gold,
    Orange,
    Red,
    NeutralGray,
}

/// Icon identifier used when rendering an alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKey {
    CheckCircle,
    ExclamationCircle,
    Warning,
    Fire,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Presentation {
    pub color: BadgeColor,
    pub icon_key: IconKey,
}

impl Presentation {
    /// Shown for labels that are not a known alert level
    pub const NEUTRAL: Presentation = Presentation {
        color: BadgeColor::NeutralGray,
        icon_key: IconKey::Info,
    };
}

/// Badge metadata for an alert level.
pub fn presentation_for(level: AlertLevel) -> Presentation {
    let (color, icon_key) = match level {
        AlertLevel::NoneLow => (BadgeColor::Green, IconKey::CheckCircle),
        AlertLevel::Moderate => (BadgeColor::Gold, IconKey::ExclamationCircle),
        AlertLevel::High => (BadgeColor::Orange, IconKey::Warning),
        AlertLevel::Critical => (BadgeColor::Red, IconKey::Fire),
    };
    Presentation { color, icon_key }
}

/// Badge metadata for a free-text level label, e.g. one read back from storage.
pub fn presentation_for_label(label: &str) -> Presentation {
    label
        .parse::<AlertLevel>()
        .map(presentation_for)
        .unwrap_or(Presentation::NEUTRAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_band_boundaries() {
        let cases = [
            (0.0, AlertLevel::NoneLow),
            (29.0, AlertLevel::NoneLow),
            (30.0, AlertLevel::Moderate),
            (59.0, AlertLevel::Moderate),
            (60.0, AlertLevel::High),
            (79.0, AlertLevel::High),
            (80.0, AlertLevel::Critical),
            (100.0, AlertLevel::Critical),
        ];
        for (score, expected) in cases {
            assert_eq!(AlertLevel::from_score(score), expected, "score {score}");
        }
    }

    #[test]
    fn fractional_scores_between_bands_stay_in_lower_band() {
        assert_eq!(AlertLevel::from_score(29.99), AlertLevel::NoneLow);
        assert_eq!(AlertLevel::from_score(59.5), AlertLevel::Moderate);
        assert_eq!(AlertLevel::from_score(79.17), AlertLevel::High);
    }

    #[test]
    fn out_of_range_scores_fall_back_to_none_low() {
        assert_eq!(AlertLevel::from_score(-0.01), AlertLevel::NoneLow);
        assert_eq!(AlertLevel::from_score(100.5), AlertLevel::NoneLow);
        assert_eq!(AlertLevel::from_score(f64::NAN), AlertLevel::NoneLow);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(AlertLevel::NoneLow < AlertLevel::Moderate);
        assert!(AlertLevel::High < AlertLevel::Critical);
    }

    #[test]
    fn presentation_table() {
        assert_eq!(
            presentation_for(AlertLevel::Critical),
            Presentation {
                color: BadgeColor::Red,
                icon_key: IconKey::Fire
            }
        );
        assert_eq!(AlertLevel::NoneLow.presentation().color, BadgeColor::Green);
        assert_eq!(
            presentation_for(AlertLevel::Moderate).icon_key,
            IconKey::ExclamationCircle
        );
    }

    #[test]
    fn unknown_label_gets_neutral_presentation() {
        assert_eq!(
            presentation_for_label("catastrophic"),
            Presentation::NEUTRAL
        );
        assert_eq!(
            presentation_for_label(" HIGH "),
            presentation_for(AlertLevel::High)
        );
    }

    #[test]
    fn serializes_as_snake_case_label() {
        let json = serde_json::to_string(&AlertLevel::NoneLow).unwrap();
        assert_eq!(json, "\"none_low\"");
        let json = serde_json::to_string(&Presentation::NEUTRAL).unwrap();
        assert_eq!(json, r#"{"color":"neutral_gray","icon_key":"info"}"#);
    }
}
