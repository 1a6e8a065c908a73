//! # pm-core
//!
//! Core types, input normalization, and validation for post-mortem generation.
//!
//! This crate provides the foundational types shared across all crates:
//! - [`RawIncident`]: the loosely-shaped incident report as submitted
//! - [`NormalizedIncident`]: the canonical incident produced by [`normalize()`]
//! - [`PostMortemReport`]: the schema-complete report returned to callers
//! - Severity, timeline phase, and action priority enums
//! - Input validation with every problem collected in one pass

pub mod enums;
pub mod errors;
pub mod incident;
pub mod normalize;
pub mod report;
pub mod validation;

pub use enums::{ActionPriority, Phase, Severity};
pub use errors::ValidationError;
pub use incident::{NormalizedIncident, RawIncident, TimelineEntry};
pub use normalize::{normalize, normalize_at};
pub use report::{ActionItem, ConfidenceScores, Impact, PostMortemReport, ReportTimelineEntry};
pub use validation::validate_incident;
