pub mod case;
pub mod insights;
pub mod level;

pub use case::{compute_risk_assessment_for_case, CaseRecord, FollowUpEntry, FollowUpRecord};
pub use insights::{assess_cases, rank_by_risk, AlertDistribution, CaseAssessment};
pub use level::{
    presentation_for, presentation_for_label, AlertLevel, BadgeColor, IconKey, Presentation,
};

use crate::core::{CaseStatus, FollowUpOutcome, Priority};
use crate::errors::InvalidInputError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Derived risk of a single case.
///
/// Always recomputed from `(outcomes, priority, status)`; never the source of truth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub raw_score: i64,
    /// 0-100, rounded to two decimal places
    pub normalized_score: f64,
    pub alert_level: AlertLevel,
    /// Recognized outcomes that fed the computation
    pub valid_outcomes: usize,
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self {
            raw_score: 0,
            normalized_score: 0.0,
            alert_level: AlertLevel::NoneLow,
            valid_outcomes: 0,
        }
    }
}

impl RiskAssessment {
    pub fn presentation(&self) -> Presentation {
        presentation_for(self.alert_level)
    }
}

/// Score a case from typed inputs.
pub fn compute_risk_assessment(
    outcomes: &[FollowUpOutcome],
    priority: Priority,
    status: CaseStatus,
) -> RiskAssessment {
    score_outcomes(outcomes.iter().copied(), priority, status)
}

/// Score a case from textual inputs.
///
/// Priority and status must be exact lowercase labels. Outcome labels are
/// matched leniently and unrecognized ones are skipped.
pub fn compute_risk_assessment_from_labels<S: AsRef<str>>(
    outcomes: &[S],
    priority: &str,
    status: &str,
) -> Result<RiskAssessment, InvalidInputError> {
    let priority: Priority = priority.parse()?;
    let status: CaseStatus = status.parse()?;
    let recognized = recognize_labels(outcomes.iter().map(AsRef::as_ref));
    Ok(score_outcomes(recognized, priority, status))
}

/// Score a case from loosely-typed JSON values.
///
/// `outcomes` must be an array; its non-string or unrecognized entries are
/// skipped. `priority` and `status` must be strings holding a valid label.
pub fn compute_risk_assessment_from_json(
    outcomes: &Value,
    priority: &Value,
    status: &Value,
) -> Result<RiskAssessment, InvalidInputError> {
    let entries = outcomes.as_array().ok_or(InvalidInputError::NotASequence {
        found: json_type_name(outcomes),
    })?;
    let priority: Priority = priority
        .as_str()
        .ok_or_else(|| InvalidInputError::UnknownPriority(priority.to_string()))?
        .parse()?;
    let status: CaseStatus = status
        .as_str()
        .ok_or_else(|| InvalidInputError::UnknownStatus(status.to_string()))?
        .parse()?;

    let labels = entries.iter().filter_map(|entry| {
        let label = entry.as_str();
        if label.is_none() {
            log::debug!("Skipping non-text follow-up outcome {}", entry);
        }
        label
    });
    Ok(score_outcomes(recognize_labels(labels), priority, status))
}

fn recognize_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<FollowUpOutcome> {
    labels
        .into_iter()
        .filter_map(|label| {
            let outcome = FollowUpOutcome::parse_lenient(label);
            if outcome.is_none() {
                log::debug!("Skipping unrecognized follow-up outcome '{}'", label);
            }
            outcome
        })
        .collect()
}

fn score_outcomes(
    outcomes: impl IntoIterator<Item = FollowUpOutcome>,
    priority: Priority,
    status: CaseStatus,
) -> RiskAssessment {
    let (weight_sum, valid_outcomes) = outcomes
        .into_iter()
        .fold((0i64, 0usize), |(sum, count), outcome| {
            (sum + outcome.weight(), count + 1)
        });

    if valid_outcomes == 0 {
        return RiskAssessment::default();
    }

    let multiplier = priority.multiplier() * status.multiplier();
    let raw_score = weight_sum * multiplier;

    // Extremes reachable with the same number of outcomes
    let count = valid_outcomes as i64;
    let score_max = count * 2 * multiplier;
    let score_min = count * -2 * multiplier;

    let normalized_score = normalize_score(raw_score, score_min, score_max);

    RiskAssessment {
        raw_score,
        normalized_score,
        alert_level: AlertLevel::from_score(normalized_score),
        valid_outcomes,
    }
}

fn normalize_score(raw: i64, min: i64, max: i64) -> f64 {
    if max == min {
        return 0.0;
    }
    let percent = (raw - min) as f64 / (max - min) as f64 * 100.0;
    round_to_hundredths(percent.clamp(0.0, 100.0))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn outcome() -> impl Strategy<Value = FollowUpOutcome> {
        prop::sample::select(FollowUpOutcome::ALL.to_vec())
    }

    fn priority() -> impl Strategy<Value = Priority> {
        prop::sample::select(vec![Priority::Low, Priority::Medium, Priority::High])
    }

    fn status() -> impl Strategy<Value = CaseStatus> {
        prop::sample::select(vec![CaseStatus::Open, CaseStatus::Closed])
    }

    fn label() -> impl Strategy<Value = String> {
        prop_oneof![
            outcome().prop_map(|o| o.as_str().to_string()),
            "[a-z ]{0,12}",
        ]
    }

    proptest! {
        #[test]
        fn normalized_score_always_in_bounds(
            outcomes in prop::collection::vec(outcome(), 0..50),
            priority in priority(),
            status in status(),
        ) {
            let result = compute_risk_assessment(&outcomes, priority, status);
            prop_assert!(result.normalized_score >= 0.0 && result.normalized_score <= 100.0);
            prop_assert_eq!(
                result.alert_level,
                AlertLevel::from_score(result.normalized_score)
            );
        }

        #[test]
        fn closed_cases_never_score(
            outcomes in prop::collection::vec(outcome(), 0..50),
            priority in priority(),
        ) {
            let result = compute_risk_assessment(&outcomes, priority, CaseStatus::Closed);
            prop_assert_eq!(result.raw_score, 0);
            prop_assert_eq!(result.normalized_score, 0.0);
            prop_assert_eq!(result.alert_level, AlertLevel::NoneLow);
        }

        #[test]
        fn negative_replacement_never_lowers_score(
            outcomes in prop::collection::vec(outcome(), 1..50),
            index in any::<prop::sample::Index>(),
            priority in priority(),
        ) {
            let before = compute_risk_assessment(&outcomes, priority, CaseStatus::Open);
            let mut worse = outcomes.clone();
            worse[index.index(outcomes.len())] = FollowUpOutcome::Negative;
            let after = compute_risk_assessment(&worse, priority, CaseStatus::Open);
            prop_assert!(after.normalized_score >= before.normalized_score);
        }

        #[test]
        fn order_does_not_matter(
            outcomes in prop::collection::vec(outcome(), 0..30),
            priority in priority(),
            status in status(),
        ) {
            let mut reversed = outcomes.clone();
            reversed.reverse();
            prop_assert_eq!(
                compute_risk_assessment(&outcomes, priority, status),
                compute_risk_assessment(&reversed, priority, status)
            );
        }

        #[test]
        fn unrecognized_labels_do_not_change_result(
            labels in prop::collection::vec(label(), 0..30),
            priority in priority(),
            status in status(),
        ) {
            let recognized: Vec<&String> = labels
                .iter()
                .filter(|l| FollowUpOutcome::parse_lenient(l).is_some())
                .collect();
            let with_noise =
                compute_risk_assessment_from_labels(&labels, priority.as_str(), status.as_str());
            let without = compute_risk_assessment_from_labels(
                &recognized,
                priority.as_str(),
                status.as_str(),
            );
            prop_assert_eq!(with_noise, without);
        }
    }
}
