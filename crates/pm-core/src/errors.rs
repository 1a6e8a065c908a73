//! Error types for incident input handling.
//!
//! Normalization never fails, so the only error raised here is from
//! [`validate_incident`](crate::validation::validate_incident). Completion
//! and parsing errors live in `pm-llm`.

use thiserror::Error;

/// An incident report failed input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", problems.join("; "))]
pub struct ValidationError {
    /// Every problem found, in field order.
    pub problems: Vec<String>,
}
