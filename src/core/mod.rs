//! Scoring inputs: follow-up outcomes, case priority and case status.

use crate::errors::InvalidInputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative result of a single follow-up action on a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpOutcome {
    Positive,
    Neutral,
    Pending,
    Negative,
}

impl FollowUpOutcome {
    pub const ALL: [FollowUpOutcome; 4] = [
        FollowUpOutcome::Positive,
        FollowUpOutcome::Neutral,
        FollowUpOutcome::Pending,
        FollowUpOutcome::Negative,
    ];

    /// Contribution of this outcome to the raw score.
    pub fn weight(self) -> i64 {
        match self {
            FollowUpOutcome::Positive => -2,
            FollowUpOutcome::Neutral => 0,
            FollowUpOutcome::Pending => 1,
            FollowUpOutcome::Negative => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FollowUpOutcome::Positive => "positive",
            FollowUpOutcome::Neutral => "neutral",
            FollowUpOutcome::Pending => "pending",
            FollowUpOutcome::Negative => "negative",
        }
    }

    /// Recognize a free-text outcome label.
    ///
    /// Surrounding whitespace and letter case are ignored. Anything that is
    /// not one of the four outcome names yields `None`; callers skip those
    /// entries instead of failing.
    pub fn parse_lenient(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|outcome| outcome.as_str() == normalized)
    }
}

impl fmt::Display for FollowUpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case urgency set by staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn multiplier(self) -> i64 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(InvalidInputError::UnknownPriority(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a referral case is still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Open,
    Closed,
}

impl CaseStatus {
    /// Closed cases multiply everything by zero: only open cases are at risk.
    pub fn multiplier(self) -> i64 {
        match self {
            CaseStatus::Open => 1,
            CaseStatus::Closed => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::Closed => "closed",
        }
    }
}

impl FromStr for CaseStatus {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(CaseStatus::Open),
            "closed" => Ok(CaseStatus::Closed),
            other => Err(InvalidInputError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_weights() {
        let weights: Vec<i64> = FollowUpOutcome::ALL.iter().map(|o| o.weight()).collect();
        assert_eq!(weights, vec![-2, 0, 1, 2]);
    }

    #[test]
    fn lenient_outcome_parsing_normalizes_case_and_whitespace() {
        assert_eq!(
            FollowUpOutcome::parse_lenient("  Negative "),
            Some(FollowUpOutcome::Negative)
        );
        assert_eq!(
            FollowUpOutcome::parse_lenient("PENDING"),
            Some(FollowUpOutcome::Pending)
        );
        assert_eq!(FollowUpOutcome::parse_lenient("went well"), None);
        assert_eq!(FollowUpOutcome::parse_lenient(""), None);
    }

    #[test]
    fn priority_parsing_is_strict() {
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(
            "alta".parse::<Priority>(),
            Err(InvalidInputError::UnknownPriority("alta".into()))
        );
        assert!("urgent".parse::<Priority>().is_err());
        assert!("High".parse::<Priority>().is_err());
    }

    #[test]
    fn status_parsing_is_strict() {
        assert_eq!("closed".parse::<CaseStatus>(), Ok(CaseStatus::Closed));
        assert_eq!(
            "draft".parse::<CaseStatus>(),
            Err(InvalidInputError::UnknownStatus("draft".into()))
        );
    }

    #[test]
    fn multipliers() {
        assert_eq!(Priority::Low.multiplier(), 1);
        assert_eq!(Priority::Medium.multiplier(), 2);
        assert_eq!(Priority::High.multiplier(), 3);
        assert_eq!(CaseStatus::Open.multiplier(), 1);
        assert_eq!(CaseStatus::Closed.multiplier(), 0);
    }

    #[test]
    fn defaults_match_case_record_fallbacks() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(CaseStatus::default(), CaseStatus::Open);
    }

    #[test]
    fn serde_uses_lowercase_labels() {
        assert_eq!(
            serde_json::to_string(&FollowUpOutcome::Negative).unwrap(),
            "\"negative\""
        );
        let priority: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(priority, Priority::Low);
    }
}
