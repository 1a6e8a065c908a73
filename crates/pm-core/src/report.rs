//! The schema-complete post-mortem report.
//!
//! Every field is always present. Fallback values live here as constants
//! so the enhancer and the report schema agree on them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use crate::enums::{ActionPriority, Phase, Severity};

pub const DEFAULT_EXECUTIVE_SUMMARY: &str = "Analysis pending";
pub const DEFAULT_ROOT_CAUSE: &str = "Investigation required";
pub const NOT_ASSESSED: &str = "Not assessed";
pub const DEFAULT_OWNER: &str = "TBD";
pub const DEFAULT_EFFORT: &str = "Medium";
pub const UNKNOWN_TIME: &str = "Unknown";

/// Section name → model-reported confidence, 0–100.
pub type ConfidenceScores = BTreeMap<String, u8>;

/// Baseline confidence per report section, used when the model omits scores.
pub const BASELINE_CONFIDENCE: [(&str, u8); 7] = [
    ("executive_summary", 75),
    ("root_cause", 70),
    ("contributing_factors", 70),
    ("timeline", 80),
    ("impact", 75),
    ("what_went_well", 65),
    ("action_items", 70),
];

#[must_use]
pub fn baseline_confidence() -> ConfidenceScores {
    BASELINE_CONFIDENCE
        .iter()
        .map(|(section, score)| ((*section).to_string(), *score))
        .collect()
}

/// Timeline entry in a report. Unlike an incident entry, the phase is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportTimelineEntry {
    pub time: String,
    pub event: String,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Impact {
    pub affected_systems: Vec<String>,
    pub severity: Severity,
    pub user_impact: String,
    pub business_impact: String,
}

/// A remediation task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActionItem {
    pub priority: ActionPriority,
    pub description: String,
    pub owner: String,
    pub effort: String,
}

/// Structured retrospective produced for one incident.
///
/// Assembled once by the enhancer and returned to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PostMortemReport {
    pub executive_summary: String,
    pub root_cause: String,
    pub contributing_factors: Vec<String>,
    pub timeline: Vec<ReportTimelineEntry>,
    pub impact: Impact,
    pub what_went_well: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub confidence_scores: ConfidenceScores,
    pub incident_title: String,
    pub generated_at: DateTime<Utc>,
}

/// JSON Schema (draft 2020-12) describing [`PostMortemReport`].
#[must_use]
pub fn report_schema() -> serde_json::Value {
    schema_for!(PostMortemReport).to_value()
}
