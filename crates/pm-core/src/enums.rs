//! Severity tiers, timeline phases, and action item priorities.
//!
//! Each enum has a `from_label()` parser that accepts the loose spellings
//! found in incident reports and model output, and an `as_str()` that
//! returns the canonical serialized form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Incident priority tier. `P0` is the most critical.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Severity {
    P0,
    P1,
    #[default]
    P2,
    P3,
}

impl Severity {
    /// Parse a severity label, case-insensitively.
    ///
    /// Accepts `P0`..`P3`, `SEV0`..`SEV3`, and the descriptive
    /// `CRITICAL`/`HIGH`/`MEDIUM`/`LOW`. Returns `None` for anything else.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let upper = label.trim().to_ascii_uppercase();
        // SEVn is an alias of Pn.
        let canonical = upper
            .strip_prefix("SEV")
            .map_or_else(|| upper.clone(), |tier| format!("P{tier}"));
        match canonical.as_str() {
            "P0" | "CRITICAL" => Some(Self::P0),
            "P1" | "HIGH" => Some(Self::P1),
            "P2" | "MEDIUM" => Some(Self::P2),
            "P3" | "LOW" => Some(Self::P3),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Categorical tag for a timeline entry.
///
/// ```text
/// detection → investigation → mitigation → resolution → monitoring
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Detection,
    #[default]
    Investigation,
    Mitigation,
    Resolution,
    Monitoring,
}

impl Phase {
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "detection" => Some(Self::Detection),
            "investigation" => Some(Self::Investigation),
            "mitigation" => Some(Self::Mitigation),
            "resolution" => Some(Self::Resolution),
            "monitoring" => Some(Self::Monitoring),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Detection => "detection",
            Self::Investigation => "investigation",
            Self::Mitigation => "mitigation",
            Self::Resolution => "resolution",
            Self::Monitoring => "monitoring",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionPriority
// ---------------------------------------------------------------------------

/// Priority of a remediation action item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl ActionPriority {
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            "URGENT" => Some(Self::Urgent),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for ActionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("P0", Some(Severity::P0))]
    #[case("p1", Some(Severity::P1))]
    #[case(" SEV2 ", Some(Severity::P2))]
    #[case("sev3", Some(Severity::P3))]
    #[case("Critical", Some(Severity::P0))]
    #[case("high", Some(Severity::P1))]
    #[case("MEDIUM", Some(Severity::P2))]
    #[case("low", Some(Severity::P3))]
    #[case("P4", None)]
    #[case("SEV", None)]
    #[case("0", None)]
    #[case("SEVP1", None)]
    #[case("", None)]
    fn severity_labels(#[case] label: &str, #[case] expected: Option<Severity>) {
        assert_eq!(Severity::from_label(label), expected);
    }

    #[test]
    fn severity_serializes_as_tier_name() {
        let json = serde_json::to_string(&Severity::P1).unwrap();
        assert_eq!(json, "\"P1\"");
    }

    #[test]
    fn phase_roundtrip_and_default() {
        assert_eq!(Phase::default(), Phase::Investigation);
        for phase in [
            Phase::Detection,
            Phase::Investigation,
            Phase::Mitigation,
            Phase::Resolution,
            Phase::Monitoring,
        ] {
            assert_eq!(Phase::from_label(phase.as_str()), Some(phase));
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{phase}\""));
        }
        assert_eq!(Phase::from_label("postmortem"), None);
    }

    #[test]
    fn action_priority_parsing() {
        assert_eq!(ActionPriority::default(), ActionPriority::Medium);
        assert_eq!(ActionPriority::from_label("urgent"), Some(ActionPriority::Urgent));
        assert_eq!(ActionPriority::from_label(" High "), Some(ActionPriority::High));
        assert_eq!(ActionPriority::from_label("P1"), None);
        assert_eq!(
            serde_json::to_string(&ActionPriority::Low).unwrap(),
            "\"LOW\""
        );
    }
}
