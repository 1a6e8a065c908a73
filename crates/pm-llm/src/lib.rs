//! # pm-llm
//!
//! Resilient access to an OpenAI-compatible chat-completion endpoint.
//!
//! - [`CompletionClient`]: attempt timeout, fatal-vs-transient classification,
//!   and exponential backoff around an injected [`ChatBackend`]
//! - [`OpenAiBackend`]: the production backend (`POST {base_url}/chat/completions`)
//! - [`extract_json`]: locate and parse the JSON object in free-form model output
//!
//! ## Retry policy
//!
//! Authentication and quota failures stop immediately. Everything else
//! (transport errors, 5xx, timeouts, unparsable output) is retried up to
//! [`RetryPolicy::max_attempts`], sleeping `base_delay * 2^attempt` between
//! attempts. See [`classify`] for how endpoint failures are sorted.

pub mod backend;
pub mod classify;
pub mod client;
pub mod error;
pub mod extract;
mod http;
pub mod openai;
pub mod retry;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::{ChatBackend, ChatMessage, ChatRequest, Role};
pub use classify::{FailureClass, classify};
pub use client::CompletionClient;
pub use error::{BackendError, ErrorKind, LlmError, ParseError};
pub use extract::extract_json;
pub use openai::OpenAiBackend;
pub use retry::RetryPolicy;
