pub mod output;

use crate::errors::{Error, Result};
use crate::risk::CaseRecord;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub use output::{create_writer, AssessmentReport, OutputFormat, OutputWriter};

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Parse a case export: either a JSON array of cases or `{ "cases": [...] }`.
///
/// Only the outer shape is checked here. Each element becomes a
/// [`CaseRecord`] even when malformed, so a bad case is reported when it is
/// scored instead of rejecting the whole file.
pub fn parse_cases(contents: &str) -> Result<Vec<CaseRecord>> {
    let entries = match serde_json::from_str::<Value>(contents)? {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("cases") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(Error::CaseFile("object has no \"cases\" array".into())),
        },
        _ => {
            return Err(Error::CaseFile(
                "expected a JSON array of cases or an object with a \"cases\" array".into(),
            ))
        }
    };
    Ok(entries.into_iter().map(CaseRecord::from).collect())
}

/// Read a case export from disk.
pub fn read_cases(path: &Path) -> Result<Vec<CaseRecord>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::input(path, format!("cannot read file: {e}")))?;
    let cases = parse_cases(&contents).map_err(|e| Error::input(path, e.to_string()))?;
    log::debug!("Read {} cases from {}", cases.len(), path.display());
    Ok(cases)
}
