//! Completion error types.
//!
//! [`LlmError`] is the error surface of the whole analysis pipeline. Its
//! [`kind()`](LlmError::kind) gives a stable identity callers can map to
//! status codes or exit codes without matching on messages.

use std::time::Duration;

use thiserror::Error;

use crate::classify::{FailureClass, classify};

/// Model output did not contain a usable JSON object.
///
/// The display message is fixed; `detail` carries the underlying reason
/// for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid response format")]
pub struct ParseError {
    pub detail: String,
}

impl ParseError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Failure reported by a [`ChatBackend`](crate::ChatBackend) for a single call.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection, TLS, or I/O failure before a response arrived.
    #[error("HTTP error: {0}")]
    Transport(String),

    /// Endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Error message from the response body, or the raw body.
        message: String,
    },

    /// Response body was not a chat-completion envelope.
    #[error("Malformed completion response: {0}")]
    Decode(String),

    /// Envelope parsed but carried no message content.
    #[error("Empty response from completion endpoint")]
    EmptyResponse,
}

impl BackendError {
    /// Sort this failure into fatal or transient.
    #[must_use]
    pub fn class(&self) -> FailureClass {
        match self {
            Self::Api { status, message } => classify(Some(*status), message),
            Self::Transport(message) => classify(None, message),
            Self::Decode(_) | Self::EmptyResponse => FailureClass::Transient,
        }
    }
}

/// Stable identity of an [`LlmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Auth,
    Quota,
    Timeout,
    Parse,
    Endpoint,
    RetriesExhausted,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration_error",
            Self::Auth => "auth_error",
            Self::Quota => "quota_error",
            Self::Timeout => "timeout_error",
            Self::Parse => "parse_error",
            Self::Endpoint => "endpoint_error",
            Self::RetriesExhausted => "retries_exhausted_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    /// No credential configured; no request was sent.
    #[error("Completion API key is not configured")]
    Configuration,

    /// Endpoint rejected the credential.
    #[error("Invalid API key: {0}")]
    Auth(BackendError),

    /// Endpoint reported rate-limit or quota exhaustion.
    #[error("API quota/rate limit exceeded: {0}")]
    Quota(BackendError),

    /// Attempt exceeded its wall-clock budget.
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Any other endpoint failure.
    #[error(transparent)]
    Endpoint(BackendError),

    /// Every attempt failed with a transient error.
    #[error("Completion failed after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<LlmError>,
    },
}

impl From<BackendError> for LlmError {
    fn from(error: BackendError) -> Self {
        match error.class() {
            FailureClass::Auth => Self::Auth(error),
            FailureClass::Quota => Self::Quota(error),
            FailureClass::Transient => Self::Endpoint(error),
        }
    }
}

impl LlmError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration => ErrorKind::Configuration,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Quota(_) => ErrorKind::Quota,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Endpoint(_) => ErrorKind::Endpoint,
            Self::RetriesExhausted { .. } => ErrorKind::RetriesExhausted,
        }
    }

    /// Whether another attempt could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Timeout | ErrorKind::Parse | ErrorKind::Endpoint
        )
    }

    /// Kind of the final attempt's failure, for [`LlmError::RetriesExhausted`].
    ///
    /// Distinguishes "the model kept returning garbage" (`Parse`) from
    /// "the endpoint kept failing" (`Endpoint`, `Timeout`).
    #[must_use]
    pub fn last_failure_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::RetriesExhausted { last, .. } => Some(last.kind()),
            _ => None,
        }
    }
}
