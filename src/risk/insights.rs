use super::{
    compute_risk_assessment_for_case, AlertLevel, CaseRecord, Presentation, RiskAssessment,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Outcome of scoring one case inside a batch.
///
/// A case with invalid priority or status is reported with `assessment: None`
/// and the neutral presentation ("no risk data") instead of failing the batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseAssessment {
    /// Position of the case in the input
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<String>,
    pub assessment: Option<RiskAssessment>,
    pub presentation: Presentation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaseAssessment {
    pub fn alert_level(&self) -> Option<AlertLevel> {
        self.assessment.map(|a| a.alert_level)
    }

    /// Whether this case should be listed when only `min` and above is wanted.
    /// Unscored cases are listed only when nothing is filtered out.
    pub fn meets(&self, min: AlertLevel) -> bool {
        match self.alert_level() {
            Some(level) => level >= min,
            None => min == AlertLevel::NoneLow,
        }
    }
}

fn assess_one(index: usize, case: &CaseRecord) -> CaseAssessment {
    let scored = compute_risk_assessment_for_case(case);
    if let Err(ref e) = scored {
        log::warn!(
            "Case {} has no risk data: {}",
            case.display_id().unwrap_or_else(|| format!("#{index}")),
            e
        );
    }

    CaseAssessment {
        index,
        case_id: case.display_id(),
        student: case.student.clone(),
        presentation: scored
            .as_ref()
            .map(RiskAssessment::presentation)
            .unwrap_or(Presentation::NEUTRAL),
        error: scored.as_ref().err().map(ToString::to_string),
        assessment: scored.ok(),
    }
}

/// Score every case independently. Output order matches input order.
pub fn assess_cases(cases: &[CaseRecord]) -> Vec<CaseAssessment> {
    cases
        .par_iter()
        .enumerate()
        .map(|(index, case)| assess_one(index, case))
        .collect()
}

/// Highest risk first; unscored cases last; ties keep input order.
pub fn rank_by_risk(mut assessments: Vec<CaseAssessment>) -> Vec<CaseAssessment> {
    assessments.sort_by(|a, b| match (&a.assessment, &b.assessment) {
        (Some(x), Some(y)) => y.normalized_score.total_cmp(&x.normalized_score),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    assessments
}

/// Number of cases per alert level
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDistribution {
    pub none_low: usize,
    pub moderate: usize,
    pub high: usize,
    pub critical: usize,
    pub unscored: usize,
    pub total: usize,
}

impl AlertDistribution {
    pub fn from_assessments(assessments: &[CaseAssessment]) -> Self {
        assessments
            .iter()
            .fold(Self::default(), |mut dist, case| {
                match case.alert_level() {
                    Some(AlertLevel::NoneLow) => dist.none_low += 1,
                    Some(AlertLevel::Moderate) => dist.moderate += 1,
                    Some(AlertLevel::High) => dist.high += 1,
                    Some(AlertLevel::Critical) => dist.critical += 1,
                    None => dist.unscored += 1,
                }
                dist.total += 1;
                dist
            })
    }

    pub fn count(&self, level: AlertLevel) -> usize {
        match level {
            AlertLevel::NoneLow => self.none_low,
            AlertLevel::Moderate => self.moderate,
            AlertLevel::High => self.high,
            AlertLevel::Critical => self.critical,
        }
    }

    /// Cases that need attention (high or critical)
    pub fn at_risk(&self) -> usize {
        self.high + self.critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_cases() -> Vec<CaseRecord> {
        vec![
            CaseRecord::new()
                .with_id("c-1")
                .with_priority("low")
                .with_follow_up("positive"),
            CaseRecord::new()
                .with_id("c-2")
                .with_priority("high")
                .with_follow_up("negative")
                .with_follow_up("negative"),
            CaseRecord::new().with_id("c-3").with_priority("urgent"),
            CaseRecord::new()
                .with_id("c-4")
                .with_priority("medium")
                .with_follow_up("pending")
                .with_follow_up("neutral"),
        ]
    }

    #[test]
    fn batch_preserves_input_order() {
        let results = assess_cases(&sample_cases());
        let ids: Vec<_> = results.iter().map(|r| r.case_id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["c-1", "c-2", "c-3", "c-4"]);
        let indexes: Vec<_> = results.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn invalid_case_yields_no_risk_data() {
        let results = assess_cases(&sample_cases());
        let bad = &results[2];
        assert_eq!(bad.assessment, None);
        assert_eq!(bad.presentation, Presentation::NEUTRAL);
        assert!(bad.error.as_deref().unwrap().contains("urgent"));
    }

    #[test]
    fn ranking_puts_highest_risk_first_and_unscored_last() {
        let ranked = rank_by_risk(assess_cases(&sample_cases()));
        let ids: Vec<_> = ranked.iter().map(|r| r.case_id.clone().unwrap()).collect();
        // c-2: 100, c-4: 62.5, c-1: 0, c-3: unscored
        assert_eq!(ids, vec!["c-2", "c-4", "c-1", "c-3"]);
    }

    #[test]
    fn ranking_is_stable_for_equal_scores() {
        let cases: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| CaseRecord::new().with_id(*id).with_follow_up("neutral"))
            .collect();
        let ranked = rank_by_risk(assess_cases(&cases));
        let ids: Vec<_> = ranked.iter().map(|r| r.case_id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn distribution_counts_every_case() {
        let dist = AlertDistribution::from_assessments(&assess_cases(&sample_cases()));
        assert_eq!(
            dist,
            AlertDistribution {
                none_low: 1,
                moderate: 0,
                high: 1,
                critical: 1,
                unscored: 1,
                total: 4,
            }
        );
        assert_eq!(dist.at_risk(), 2);
        assert_eq!(dist.count(AlertLevel::Critical), 1);
    }

    #[test]
    fn min_level_filter() {
        let results = assess_cases(&sample_cases());
        let listed: Vec<_> = results
            .iter()
            .filter(|r| r.meets(AlertLevel::High))
            .map(|r| r.case_id.clone().unwrap())
            .collect();
        assert_eq!(listed, vec!["c-2", "c-4"]);
        assert!(results.iter().all(|r| r.meets(AlertLevel::NoneLow)));
    }
}
