//! Risk scoring for school referral cases ("derivaciones").
//!
//! The core is [`risk::compute_risk_assessment`]: a pure function turning a
//! case's follow-up outcomes, priority and status into a 0-100 score and a
//! four-tier alert level. The rest of the crate wires that function to case
//! exports, configuration and terminal/JSON reporting.

// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod risk;

// Re-export commonly used types
pub use crate::core::{CaseStatus, FollowUpOutcome, Priority};

pub use crate::errors::{Error, InvalidInputError, Result};

pub use crate::risk::{
    assess_cases, compute_risk_assessment, compute_risk_assessment_for_case,
    compute_risk_assessment_from_json, compute_risk_assessment_from_labels, presentation_for,
    presentation_for_label, rank_by_risk, AlertDistribution, AlertLevel, BadgeColor,
    CaseAssessment, CaseRecord, FollowUpEntry, FollowUpRecord, IconKey, Presentation,
    RiskAssessment,
};
