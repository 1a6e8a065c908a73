//! Shared HTTP response helpers for the completion backend.
//!
//! Turns non-success responses into [`BackendError::Api`], pulling the
//! human-readable message out of OpenAI-style error bodies so the
//! classifier sees `"Invalid API Key"` rather than a JSON blob.

use serde::Deserialize;

use crate::error::BackendError;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<serde_json::Value>,
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Extract `error.message` (plus type/code) from an error body, falling back
/// to the trimmed raw body.
pub fn error_message(body: &str) -> String {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return body.trim().to_string();
    };

    let mut parts = Vec::new();
    if let Some(message) = envelope.error.message {
        parts.push(message);
    }
    if let Some(kind) = envelope.error.kind {
        parts.push(format!("type={kind}"));
    }
    if let Some(code) = envelope.error.code.filter(|c| !c.is_null()) {
        let code = code.as_str().map_or_else(|| code.to_string(), ToString::to_string);
        parts.push(format!("code={code}"));
    }

    if parts.is_empty() {
        body.trim().to_string()
    } else {
        parts.join(" ")
    }
}
