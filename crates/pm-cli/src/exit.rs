//! Process exit codes.

use pm_analysis::PromptError;
use pm_config::ConfigError;
use pm_core::ValidationError;
use pm_llm::{ErrorKind, LlmError};

pub const FAILURE: i32 = 1;
pub const INVALID_INPUT: i32 = 2;
pub const AUTH: i32 = 3;
pub const QUOTA: i32 = 4;
pub const UNAVAILABLE: i32 = 5;

/// Map an error chain to the exit code scripts can branch on.
pub fn code_for(error: &anyhow::Error) -> i32 {
    if let Some(error) = error.downcast_ref::<LlmError>() {
        return match error.kind() {
            ErrorKind::Configuration => INVALID_INPUT,
            ErrorKind::Auth => AUTH,
            ErrorKind::Quota => QUOTA,
            ErrorKind::Timeout
            | ErrorKind::Parse
            | ErrorKind::Endpoint
            | ErrorKind::RetriesExhausted => UNAVAILABLE,
        };
    }

    let invalid = error.downcast_ref::<ValidationError>().is_some()
        || error.downcast_ref::<ConfigError>().is_some()
        || error.downcast_ref::<PromptError>().is_some();
    if invalid { INVALID_INPUT } else { FAILURE }
}
