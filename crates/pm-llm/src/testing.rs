//! Scripted in-memory [`ChatBackend`] for tests.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for downstream crates' tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::backend::{ChatBackend, ChatRequest};
use crate::error::BackendError;

/// What the backend does on one call.
#[derive(Debug)]
pub enum Step {
    Reply(String),
    Fail(BackendError),
    /// Never resolve; only the attempt timeout ends the call.
    Hang,
}

impl Step {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply(text.into())
    }

    pub const fn fail(error: BackendError) -> Self {
        Self::Fail(error)
    }
}

/// Plays back a fixed script of [`Step`]s, then repeats a fallback reply.
#[derive(Debug)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Step>>,
    fallback: Option<String>,
    configured: bool,
    calls: AtomicU32,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedBackend {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Mutex::new(steps.into_iter().collect()),
            fallback: None,
            configured: true,
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `text` on every call.
    pub fn repeating(text: impl Into<String>) -> Self {
        Self {
            fallback: Some(text.into()),
            ..Self::new([])
        }
    }

    /// A backend without a credential.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new([])
        }
    }

    /// Number of `chat` calls made so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, in call order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn next_step(&self) -> Step {
        let scripted = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());
        scripted.unwrap_or_else(|| match &self.fallback {
            Some(text) => Step::Reply(text.clone()),
            None => Step::Fail(BackendError::Transport("script exhausted".into())),
        })
    }
}

impl ChatBackend for ScriptedBackend {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match self.next_step() {
            Step::Reply(text) => Ok(text),
            Step::Fail(error) => Err(error),
            Step::Hang => std::future::pending().await,
        }
    }
}
