//! Case and follow-up records as exported by the referral tracker.
//!
//! Records come from heterogeneous upstream data, so everything here is
//! lenient: a follow-up that is not an object, has no result, or carries a
//! non-text result is kept as [`FollowUpEntry::Malformed`] and ignored when
//! scoring. Only an entry that is not an object, or a bad top-level priority
//! or status, can make a case fail.

use super::{compute_risk_assessment_from_labels, json_type_name, RiskAssessment};
use crate::errors::InvalidInputError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single logged action on a case.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowUpRecord {
    #[serde(default, alias = "resultado", skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, alias = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, alias = "notas", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One element of a case's follow-up list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FollowUpEntry {
    Record(FollowUpRecord),
    /// Anything that could not be read as a follow-up record
    Malformed(Value),
}

impl FollowUpEntry {
    /// Outcome label carried by this entry, if any.
    pub fn result(&self) -> Option<&str> {
        match self {
            FollowUpEntry::Record(record) => record.result.as_deref(),
            FollowUpEntry::Malformed(_) => None,
        }
    }
}

impl From<Value> for FollowUpEntry {
    fn from(value: Value) -> Self {
        if !value.is_object() {
            return FollowUpEntry::Malformed(value);
        }
        match serde_json::from_value::<FollowUpRecord>(value.clone()) {
            Ok(record) => FollowUpEntry::Record(record),
            Err(e) => {
                log::debug!("Keeping malformed follow-up entry as-is: {}", e);
                FollowUpEntry::Malformed(value)
            }
        }
    }
}

impl From<FollowUpRecord> for FollowUpEntry {
    fn from(record: FollowUpRecord) -> Self {
        FollowUpEntry::Record(record)
    }
}

impl<'de> Deserialize<'de> for FollowUpEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FollowUpEntry::from)
    }
}

/// A referral case ("derivación").
///
/// `priority` and `status` are kept as raw JSON so that a bad value fails
/// only this case's assessment, not the whole file. Deserialization never
/// fails: fields of the wrong shape are dropped, and an entry that is not
/// an object at all is kept in `rejected` and reported when scored.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CaseRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    pub follow_ups: Vec<FollowUpEntry>,
    /// Entry that was not a JSON object
    #[serde(skip)]
    pub rejected: Option<Value>,
}

/// First present key among a field name and its Spanish alias.
fn field<'a>(map: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| map.get(*name))
}

fn student_name(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        other => {
            log::debug!("Ignoring non-scalar student field {}", other);
            None
        }
    }
}

fn follow_up_entries(value: &Value) -> Vec<FollowUpEntry> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(entries) => entries.iter().cloned().map(FollowUpEntry::from).collect(),
        other => {
            log::debug!("Ignoring follow-up list that is not an array: {}", other);
            Vec::new()
        }
    }
}

impl From<Value> for CaseRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => CaseRecord {
                id: field(&map, &["id"]).cloned(),
                student: field(&map, &["student", "estudiante"]).and_then(student_name),
                priority: field(&map, &["priority", "prioridad"]).cloned(),
                status: field(&map, &["status", "estado"]).cloned(),
                follow_ups: field(&map, &["follow_ups", "seguimientos"])
                    .map(follow_up_entries)
                    .unwrap_or_default(),
                rejected: None,
            },
            other => CaseRecord {
                rejected: Some(other),
                ..CaseRecord::default()
            },
        }
    }
}

impl<'de> Deserialize<'de> for CaseRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(CaseRecord::from)
    }
}

impl CaseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(Value::String(id.into()));
        self
    }

    pub fn with_student(mut self, student: impl Into<String>) -> Self {
        self.student = Some(student.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(Value::String(priority.into()));
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(Value::String(status.into()));
        self
    }

    pub fn with_follow_up(mut self, result: impl Into<String>) -> Self {
        let record = FollowUpRecord {
            result: Some(result.into()),
            ..Default::default()
        };
        self.follow_ups.push(record.into());
        self
    }

    /// Identifier for display, whether exported as a string or a number.
    pub fn display_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Result labels of all follow-ups that carry one.
    pub fn outcome_labels(&self) -> Vec<&str> {
        self.follow_ups.iter().filter_map(FollowUpEntry::result).collect()
    }
}

/// Score a case record.
///
/// Missing (or null) priority defaults to `medium`, missing status to `open`.
pub fn compute_risk_assessment_for_case(
    case: &CaseRecord,
) -> Result<RiskAssessment, InvalidInputError> {
    if let Some(rejected) = &case.rejected {
        return Err(InvalidInputError::NotACase {
            found: json_type_name(rejected),
        });
    }
    let priority = text_field(
        case.priority.as_ref(),
        "medium",
        InvalidInputError::UnknownPriority,
    )?;
    let status = text_field(case.status.as_ref(), "open", InvalidInputError::UnknownStatus)?;
    compute_risk_assessment_from_labels(&case.outcome_labels(), priority, status)
}

fn text_field<'a>(
    value: Option<&'a Value>,
    default: &'static str,
    invalid: fn(String) -> InvalidInputError,
) -> Result<&'a str, InvalidInputError> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(invalid(other.to_string())),
    }
}
