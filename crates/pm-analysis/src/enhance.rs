//! Merge parsed model output with the normalized incident into a
//! schema-complete [`PostMortemReport`].
//!
//! Model output is untrusted: any field may be missing, mistyped, or empty.
//! Each section falls back to the incident's own data or a fixed default,
//! so this step never fails.

use chrono::{DateTime, Utc};
use pm_core::report::{
    DEFAULT_EFFORT, DEFAULT_EXECUTIVE_SUMMARY, DEFAULT_OWNER, DEFAULT_ROOT_CAUSE, NOT_ASSESSED,
    UNKNOWN_TIME, baseline_confidence,
};
use pm_core::{
    ActionItem, ActionPriority, ConfidenceScores, Impact, NormalizedIncident, Phase,
    PostMortemReport, ReportTimelineEntry, Severity,
};
use serde_json::{Map, Value};

/// Build the final report, stamped with the current time.
#[must_use]
pub fn enhance(parsed: &Value, incident: &NormalizedIncident) -> PostMortemReport {
    enhance_at(parsed, incident, Utc::now())
}

/// Like [`enhance`] with an explicit `generated_at`.
#[must_use]
pub fn enhance_at(
    parsed: &Value,
    incident: &NormalizedIncident,
    generated_at: DateTime<Utc>,
) -> PostMortemReport {
    let report = PostMortemReport {
        executive_summary: text_or(parsed.get("executive_summary"), DEFAULT_EXECUTIVE_SUMMARY),
        root_cause: text_or(parsed.get("root_cause"), DEFAULT_ROOT_CAUSE),
        contributing_factors: strings(parsed.get("contributing_factors")).unwrap_or_default(),
        timeline: timeline(parsed.get("timeline"), incident),
        impact: impact(parsed.get("impact"), incident),
        what_went_well: strings(parsed.get("what_went_well")).unwrap_or_default(),
        action_items: action_items(parsed.get("action_items")),
        confidence_scores: confidence_scores(parsed.get("confidence_scores")),
        incident_title: incident.title.clone(),
        generated_at,
    };

    tracing::debug!(
        timeline_entries = report.timeline.len(),
        action_items = report.action_items.len(),
        "Assembled post-mortem report"
    );
    report
}

/// A non-blank string.
fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

fn text_or(value: Option<&Value>, fallback: &str) -> String {
    non_blank(value).unwrap_or(fallback).to_string()
}

/// String items of an array; `None` when the value is not an array.
fn strings(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(ToString::to_string)
            .collect(),
    )
}

fn timeline(value: Option<&Value>, incident: &NormalizedIncident) -> Vec<ReportTimelineEntry> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return incident
            .timeline
            .iter()
            .map(|entry| ReportTimelineEntry {
                time: entry.time.clone(),
                event: entry.event.clone(),
                phase: entry.phase.unwrap_or_default(),
            })
            .collect();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| ReportTimelineEntry {
            time: text_or(entry.get("time"), UNKNOWN_TIME),
            event: text_or(entry.get("event"), ""),
            phase: entry
                .get("phase")
                .and_then(Value::as_str)
                .and_then(Phase::from_label)
                .unwrap_or_default(),
        })
        .collect()
}

fn impact(value: Option<&Value>, incident: &NormalizedIncident) -> Impact {
    let empty = Map::new();
    let impact = value.and_then(Value::as_object).unwrap_or(&empty);

    Impact {
        affected_systems: strings(impact.get("affected_systems"))
            .unwrap_or_else(|| incident.affected_systems.clone()),
        severity: impact
            .get("severity")
            .and_then(Value::as_str)
            .and_then(Severity::from_label)
            .unwrap_or(incident.severity),
        user_impact: text_or(impact.get("user_impact"), NOT_ASSESSED),
        business_impact: text_or(impact.get("business_impact"), NOT_ASSESSED),
    }
}

fn action_items(value: Option<&Value>) -> Vec<ActionItem> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| ActionItem {
            priority: item
                .get("priority")
                .and_then(Value::as_str)
                .and_then(ActionPriority::from_label)
                .unwrap_or_default(),
            description: text_or(item.get("description"), ""),
            owner: text_or(item.get("owner"), DEFAULT_OWNER),
            effort: text_or(item.get("effort"), DEFAULT_EFFORT),
        })
        .collect()
}

/// Scores as reported, rounded and clamped to 0–100. Only a missing or
/// non-object block falls back to the baseline; absent sections stay absent.
fn confidence_scores(value: Option<&Value>) -> ConfidenceScores {
    let Some(scores) = value.and_then(Value::as_object) else {
        return baseline_confidence();
    };

    scores
        .iter()
        .filter_map(|(section, score)| {
            let score = score.as_f64()?;
            score.is_finite().then(|| (section.clone(), clamp_score(score)))
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}
