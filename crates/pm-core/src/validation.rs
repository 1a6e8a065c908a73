//! Input validation for incident reports.
//!
//! Validation is stricter than normalization: it rejects reports that
//! normalization would silently repair (blank title, unknown severity).
//! Callers that accept user input run it before analysis.

use serde_json::Value;

use crate::enums::Severity;
use crate::errors::ValidationError;
use crate::incident::RawIncident;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 10_000;

/// Check a raw incident, collecting every problem.
///
/// # Errors
///
/// Returns [`ValidationError`] listing each failed rule in field order.
pub fn validate_incident(raw: &RawIncident) -> Result<(), ValidationError> {
    let mut problems = Vec::new();

    match non_blank(raw.title.as_ref()) {
        None => problems.push("Title is required".to_string()),
        Some(title) if title.chars().count() > MAX_TITLE_CHARS => problems.push(format!(
            "Title must be less than {MAX_TITLE_CHARS} characters"
        )),
        Some(_) => {}
    }

    match non_blank(raw.description.as_ref()) {
        None => problems.push("Description is required".to_string()),
        Some(description) if description.chars().count() > MAX_DESCRIPTION_CHARS => {
            problems.push("Description must be less than 10,000 characters".to_string());
        }
        Some(_) => {}
    }

    if let Some(severity) = raw.severity.as_ref() {
        let recognised = severity.as_str().and_then(Severity::from_label).is_some();
        if !recognised {
            problems.push(
                "Invalid severity level. Use P0-P3, SEV0-SEV3, or CRITICAL/HIGH/MEDIUM/LOW"
                    .to_string(),
            );
        }
    }

    if raw.timeline.as_ref().is_some_and(|t| !t.is_array()) {
        problems.push("Timeline must be an array".to_string());
    }

    if raw
        .affected_systems
        .as_ref()
        .is_some_and(|s| !s.is_array() && !s.is_string())
    {
        problems.push("Affected systems must be an array or comma-separated string".to_string());
    }

    if raw.duration.as_ref().is_some_and(|d| !d.is_string()) {
        problems.push("Duration must be a string (e.g., \"2 hours 30 minutes\")".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { problems })
    }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
