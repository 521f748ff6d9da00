//! Import and export of the JSON data document
//!
//! The document carries a `subjects` array (course rows for the GPA sheet),
//! a `semesters` array (rows for the CGPA sheet), or both:
//!
//! ```json
//! { "subjects": [ { "id": 1, "name": "Calculus", "credit": 4, "grade": "A" } ] }
//! ```

use crate::core::models::{CourseRecord, SemesterRecord};
use crate::core::numeric::{parse_float_prefix, value_to_u32};
use crate::debug;
use serde::Serialize;
use serde_json::{Map, Value};

/// Why an import document was refused. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// The text is not a JSON document
    #[error("Invalid JSON format. Please copy the data correctly.")]
    InvalidJson,
    /// The document holds neither usable subjects nor a semesters array
    #[error("No valid data found in JSON. Expected \"subjects\" or \"semesters\" array.")]
    NoValidData,
}

/// A validated import document
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ImportPayload {
    /// Accepted course rows; `None` when nothing usable was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<CourseRecord>>,
    /// Semester rows; `None` when the document had no semesters array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semesters: Option<Vec<SemesterRecord>>,
    /// Subject entries dropped by validation
    #[serde(skip)]
    pub rejected_subjects: usize,
}

impl ImportPayload {
    /// Payload holding only course rows
    #[must_use]
    pub const fn from_subjects(subjects: Vec<CourseRecord>) -> Self {
        Self {
            subjects: Some(subjects),
            semesters: None,
            rejected_subjects: 0,
        }
    }

    /// Pretty-printed JSON document (two-space indentation)
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Render course rows as an import document: `{ "subjects": [...] }`
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_import_json(subjects: &[CourseRecord]) -> Result<String, serde_json::Error> {
    ImportPayload::from_subjects(subjects.to_vec()).to_json()
}

/// Build an export document from the current sheets.
///
/// Re-importing the result reproduces the same rows, minus any subject whose
/// id, credit or grade is zero/empty (those never pass the import check).
///
/// # Errors
/// Returns an error if serialization fails.
pub fn export_payload(
    subjects: &[CourseRecord],
    semesters: &[SemesterRecord],
) -> Result<String, serde_json::Error> {
    ImportPayload {
        subjects: Some(subjects.to_vec()),
        semesters: Some(semesters.to_vec()),
        rejected_subjects: 0,
    }
    .to_json()
}

/// Parse and validate an import document.
///
/// - `subjects`: each entry needs a truthy `id`, `credit` and `grade` (non-zero
///   numbers, non-empty strings); other entries are dropped. The array counts
///   only if at least one entry survives.
/// - `semesters`: taken as given when present as an array. Entries are coerced
///   to rows without validation (unreadable GPAs become 0, i.e. unset).
///
/// # Errors
/// [`ImportError::InvalidJson`] if the text is not JSON (or is `null`);
/// [`ImportError::NoValidData`] if neither collection is usable.
pub fn parse_import(text: &str) -> Result<ImportPayload, ImportError> {
    let document: Value = serde_json::from_str(text).map_err(|_| ImportError::InvalidJson)?;
    if document.is_null() {
        return Err(ImportError::InvalidJson);
    }

    let mut payload = ImportPayload::default();

    if let Some(items) = document.get("subjects").and_then(Value::as_array) {
        let accepted: Vec<CourseRecord> = items.iter().filter_map(subject_from_value).collect();
        payload.rejected_subjects = items.len() - accepted.len();
        if payload.rejected_subjects > 0 {
            debug!(
                "Import dropped {} of {} subjects",
                payload.rejected_subjects,
                items.len()
            );
        }
        if !accepted.is_empty() {
            payload.subjects = Some(accepted);
        }
    }

    if let Some(items) = document.get("semesters").and_then(Value::as_array) {
        payload.semesters = Some(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| semester_from_value(index, item))
                .collect(),
        );
    }

    if payload.subjects.is_none() && payload.semesters.is_none() {
        return Err(ImportError::NoValidData);
    }
    Ok(payload)
}

/// JavaScript-style truthiness of a JSON value
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| is_truthy(value))
}

fn subject_from_value(item: &Value) -> Option<CourseRecord> {
    let object = item.as_object()?;

    let id = match field(object, "id")? {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    }
    .filter(|id| *id > 0)?;

    let credit = match field(object, "credit")? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_float_prefix(text),
        _ => None,
    }?;

    let grade = field(object, "grade")?.as_str()?.to_string();

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(CourseRecord {
        id,
        name,
        credit,
        grade,
    })
}

fn semester_from_value(index: usize, item: &Value) -> SemesterRecord {
    let fallback_id = u32::try_from(index + 1).unwrap_or(u32::MAX);
    let id = item
        .get("id")
        .map(value_to_u32)
        .filter(|id| *id > 0)
        .unwrap_or(fallback_id);
    let gpa = match item.get("gpa") {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => parse_float_prefix(text).unwrap_or(0.0),
        _ => 0.0,
    };
    SemesterRecord::new(id, gpa)
}
