//! Incident report shapes before and after normalization.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{Phase, Severity};

/// An incident report exactly as submitted.
///
/// Every field is an arbitrary JSON value and may be missing. Use
/// [`normalize()`](crate::normalize::normalize) to obtain a
/// [`NormalizedIncident`]. Unknown keys are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIncident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Value>,
    /// Either an array of system names or a comma-delimited string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_systems: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    /// Array of `{time, event}` objects; `description` is accepted in place of `event`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<Value>,
}

/// One timeline entry of a normalized incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimelineEntry {
    pub time: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
}

impl TimelineEntry {
    pub fn new(time: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            event: event.into(),
            phase: None,
        }
    }
}

/// Canonical incident, created once per request and never mutated.
///
/// Invariants: `severity` is always one of `P0..P3`, and
/// `affected_systems` never holds an empty or whitespace-only entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedIncident {
    pub title: String,
    /// ISO-8601 date or timestamp.
    pub date: String,
    pub duration: String,
    pub severity: Severity,
    pub affected_systems: Vec<String>,
    pub description: String,
    /// Chronological, in the order given by the reporter.
    pub timeline: Vec<TimelineEntry>,
    pub resolution: String,
    pub additional_context: String,
}

impl From<&NormalizedIncident> for RawIncident {
    fn from(incident: &NormalizedIncident) -> Self {
        let timeline = incident
            .timeline
            .iter()
            .map(|entry| {
                let mut object = serde_json::Map::new();
                object.insert("time".into(), Value::String(entry.time.clone()));
                object.insert("event".into(), Value::String(entry.event.clone()));
                if let Some(phase) = entry.phase {
                    object.insert("phase".into(), Value::String(phase.as_str().into()));
                }
                Value::Object(object)
            })
            .collect();

        Self {
            title: Some(Value::String(incident.title.clone())),
            date: Some(Value::String(incident.date.clone())),
            duration: Some(Value::String(incident.duration.clone())),
            severity: Some(Value::String(incident.severity.as_str().into())),
            affected_systems: Some(Value::Array(
                incident
                    .affected_systems
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect(),
            )),
            description: Some(Value::String(incident.description.clone())),
            timeline: Some(Value::Array(timeline)),
            resolution: Some(Value::String(incident.resolution.clone())),
            additional_context: Some(Value::String(incident.additional_context.clone())),
        }
    }
}
