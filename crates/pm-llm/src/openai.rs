//! OpenAI-compatible chat-completion backend (Groq by default).

use pm_config::LlmConfig;
use serde::Deserialize;

use crate::backend::{ChatBackend, ChatRequest};
use crate::error::BackendError;
use crate::http::check_response;

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Chat backend speaking the OpenAI `/chat/completions` protocol.
///
/// Holds one pooled [`reqwest::Client`] for all requests.
pub struct OpenAiBackend {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiBackend {
    /// Create a backend for `base_url` (e.g. `https://api.groq.com/openai/v1`).
    ///
    /// The per-attempt timeout is enforced by the
    /// [`CompletionClient`](crate::CompletionClient), not here.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("postmortem/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            http,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(&config.base_url, config.api_key.trim())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatBackend for OpenAiBackend {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let resp = check_response(resp).await?;

        let body = resp
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        first_choice_content(&body)
    }
}

/// Pull `choices[0].message.content` out of a completion body.
fn first_choice_content(body: &str) -> Result<String, BackendError> {
    let data: CompletionResponse =
        serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))?;

    data.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(BackendError::EmptyResponse)
}
