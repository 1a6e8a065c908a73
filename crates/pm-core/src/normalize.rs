//! Coerce a [`RawIncident`] into a [`NormalizedIncident`].
//!
//! Normalization never fails. Every field has a deterministic default, so
//! a report missing everything still yields a usable incident.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::enums::{Phase, Severity};
use crate::incident::{NormalizedIncident, RawIncident, TimelineEntry};

pub const DEFAULT_TITLE: &str = "Untitled Incident";
pub const DEFAULT_DURATION: &str = "Unknown";
pub const DEFAULT_TIMELINE_TIME: &str = "Unknown";

/// Normalize an incident, using the current time when no date was given.
#[must_use]
pub fn normalize(raw: &RawIncident) -> NormalizedIncident {
    normalize_at(raw, Utc::now())
}

/// Normalize an incident with an explicit fallback timestamp.
#[must_use]
pub fn normalize_at(raw: &RawIncident, now: DateTime<Utc>) -> NormalizedIncident {
    let incident = NormalizedIncident {
        title: text(raw.title.as_ref()).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        date: text(raw.date.as_ref())
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        duration: text(raw.duration.as_ref()).unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        severity: severity(raw.severity.as_ref()),
        affected_systems: list(raw.affected_systems.as_ref()),
        description: text(raw.description.as_ref()).unwrap_or_default(),
        timeline: timeline(raw.timeline.as_ref()),
        resolution: text(raw.resolution.as_ref()).unwrap_or_default(),
        additional_context: text(raw.additional_context.as_ref()).unwrap_or_default(),
    };

    tracing::debug!(
        title = %incident.title,
        severity = %incident.severity,
        affected_systems = incident.affected_systems.len(),
        timeline_entries = incident.timeline.len(),
        "Normalized incident"
    );

    incident
}

/// Map a severity label to `P0..P3`. Unrecognised or missing input is `P2`.
#[must_use]
pub fn severity(value: Option<&Value>) -> Severity {
    value
        .and_then(Value::as_str)
        .and_then(Severity::from_label)
        .unwrap_or_default()
}

/// Split a sequence or comma-delimited string into trimmed, non-empty items.
#[must_use]
pub fn list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalize timeline entries, preserving their order.
///
/// Non-object entries are skipped. A missing `time` becomes `"Unknown"` and
/// a missing `event` falls back to the entry's `description`.
#[must_use]
pub fn timeline(value: Option<&Value>) -> Vec<TimelineEntry> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| TimelineEntry {
            time: text(entry.get("time"))
                .unwrap_or_else(|| DEFAULT_TIMELINE_TIME.to_string()),
            event: text(entry.get("event"))
                .or_else(|| text(entry.get("description")))
                .unwrap_or_default(),
            phase: entry
                .get("phase")
                .and_then(Value::as_str)
                .and_then(Phase::from_label),
        })
        .collect()
}

/// Trimmed text of a string or scalar value; `None` when empty or not a scalar.
fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    let rendered = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!rendered.is_empty()).then_some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn raw(value: Value) -> RawIncident {
        serde_json::from_value(value).unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn empty_incident_gets_all_defaults() {
        let incident = normalize_at(&RawIncident::default(), fixed_now());

        assert_eq!(incident.title, "Untitled Incident");
        assert_eq!(incident.date, "2024-05-01T12:30:00.000Z");
        assert_eq!(incident.duration, "Unknown");
        assert_eq!(incident.severity, Severity::P2);
        assert!(incident.affected_systems.is_empty());
        assert_eq!(incident.description, "");
        assert!(incident.timeline.is_empty());
        assert_eq!(incident.resolution, "");
        assert_eq!(incident.additional_context, "");
    }

    #[test]
    fn strings_are_trimmed_and_blank_means_missing() {
        let incident = normalize_at(
            &raw(json!({
                "title": "   ",
                "duration": "  2 hours ",
                "description": "\n Disk filled up \t",
                "resolution": " Rotated logs "
            })),
            fixed_now(),
        );

        assert_eq!(incident.title, "Untitled Incident");
        assert_eq!(incident.duration, "2 hours");
        assert_eq!(incident.description, "Disk filled up");
        assert_eq!(incident.resolution, "Rotated logs");
    }

    #[test]
    fn provided_date_is_kept() {
        let incident = normalize_at(&raw(json!({ "date": "2024-01-15" })), fixed_now());
        assert_eq!(incident.date, "2024-01-15");
    }

    #[rstest]
    #[case(json!("P0"), Severity::P0)]
    #[case(json!("sev1"), Severity::P1)]
    #[case(json!("Sev2"), Severity::P2)]
    #[case(json!("p3"), Severity::P3)]
    #[case(json!("critical"), Severity::P0)]
    #[case(json!("HIGH"), Severity::P1)]
    #[case(json!("Medium"), Severity::P2)]
    #[case(json!("low"), Severity::P3)]
    #[case(json!("catastrophic"), Severity::P2)]
    #[case(json!(1), Severity::P2)]
    #[case(json!(null), Severity::P2)]
    fn severity_mapping(#[case] input: Value, #[case] expected: Severity) {
        assert_eq!(severity(Some(&input)), expected);
    }

    #[test]
    fn missing_severity_defaults_to_p2() {
        assert_eq!(severity(None), Severity::P2);
    }

    #[test]
    fn comma_string_and_sequence_normalize_identically() {
        let from_string = list(Some(&json!(" api ,db,, , cache ")));
        let from_array = list(Some(&json!(["api", " db", "", "   ", "cache "])));

        assert_eq!(from_string, vec!["api", "db", "cache"]);
        assert_eq!(from_array, from_string);
    }

    #[test]
    fn list_drops_non_scalar_items_and_unsupported_shapes() {
        assert_eq!(list(Some(&json!(["api", {"name": "db"}, null, 42]))), vec!["api", "42"]);
        assert!(list(Some(&json!({"api": true}))).is_empty());
        assert!(list(None).is_empty());
    }

    #[test]
    fn timeline_defaults_and_fallbacks() {
        let entries = timeline(Some(&json!([
            { "time": "10:00", "event": "paged" },
            { "description": "rolled back" },
            { "time": "10:30" },
            "not an entry",
            { "time": "11:00", "event": "recovered", "phase": "Resolution" },
            { "time": "11:05", "event": "watching", "phase": "postmortem" }
        ])));

        assert_eq!(
            entries,
            vec![
                TimelineEntry::new("10:00", "paged"),
                TimelineEntry::new("Unknown", "rolled back"),
                TimelineEntry::new("10:30", ""),
                TimelineEntry {
                    time: "11:00".into(),
                    event: "recovered".into(),
                    phase: Some(Phase::Resolution),
                },
                TimelineEntry::new("11:05", "watching"),
            ]
        );
    }

    #[test]
    fn non_array_timeline_is_empty() {
        assert!(timeline(Some(&json!("10:00 paged"))).is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_at(
            &raw(json!({
                "title": " DB outage ",
                "severity": "sev0",
                "affectedSystems": "db, api",
                "description": "Primary failed over",
                "timeline": [
                    { "time": "10:00", "event": "paged", "phase": "detection" },
                    { "description": "failover" }
                ]
            })),
            fixed_now(),
        );
        let second = normalize_at(&RawIncident::from(&first), fixed_now());

        assert_eq!(second, first);
    }
}
