//! Chat-completion request shape and the backend seam.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;

use crate::error::BackendError;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Body of a `POST /chat/completions` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// A system + user message pair with the default sampling parameters.
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system.into(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user.into(),
                },
            ],
        }
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Length in bytes of all message contents.
    #[must_use]
    pub fn prompt_length(&self) -> usize {
        self.messages.iter().map(|m| m.content.len()).sum()
    }
}

/// A chat-completion endpoint.
///
/// One call, one response: retries and timeouts belong to
/// [`CompletionClient`](crate::CompletionClient).
pub trait ChatBackend: Send + Sync {
    /// Whether a credential is available. When `false`, no call is made.
    fn is_configured(&self) -> bool;

    /// Send one request and return the first choice's message content.
    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;
}

impl<B: ChatBackend> ChatBackend for Arc<B> {
    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<String, BackendError>> + Send {
        (**self).chat(request)
    }
}
