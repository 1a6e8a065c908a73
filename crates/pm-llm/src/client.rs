//! Completion client: timeout racing, classification, and backoff.

use std::time::Instant;

use crate::backend::{ChatBackend, ChatRequest};
use crate::error::{LlmError, ParseError};
use crate::retry::RetryPolicy;

/// Calls a [`ChatBackend`] under a [`RetryPolicy`].
///
/// The backend is injected so tests can substitute a scripted fake.
pub struct CompletionClient<B> {
    backend: B,
    policy: RetryPolicy,
}

impl<B: ChatBackend> CompletionClient<B> {
    pub const fn new(backend: B, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Return the model's raw text, retrying transient failures.
    ///
    /// # Errors
    ///
    /// See [`Self::complete_with`].
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.complete_with(request, |text| Ok(text.to_string())).await
    }

    /// Run the retry loop where each attempt is a network call followed by
    /// `extract` on the returned text.
    ///
    /// An `extract` failure counts as a transient attempt failure, so a
    /// re-sampled completion gets a chance to parse.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Configuration`] if the backend has no credential (no call is made)
    /// - [`LlmError::Auth`] / [`LlmError::Quota`] on the first such failure
    /// - [`LlmError::RetriesExhausted`] wrapping the last transient failure
    pub async fn complete_with<T, F>(
        &self,
        request: &ChatRequest,
        extract: F,
    ) -> Result<T, LlmError>
    where
        F: Fn(&str) -> Result<T, ParseError>,
    {
        if !self.backend.is_configured() {
            tracing::error!("Completion API key is not configured; refusing to call endpoint");
            return Err(LlmError::Configuration);
        }

        let max_attempts = self.policy.max_attempts.max(1);
        let prompt_length = request.prompt_length();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let start_time = Instant::now();

            tracing::info!(
                attempt,
                max_attempts,
                model = %request.model,
                prompt_length,
                "Sending completion request"
            );

            let error = match self.attempt(request, &extract).await {
                Ok(value) => {
                    tracing::info!(
                        attempt,
                        model = %request.model,
                        elapsed_ms = start_time.elapsed().as_millis(),
                        "Completion request succeeded"
                    );
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !error.is_transient() {
                tracing::error!(
                    attempt,
                    kind = %error.kind(),
                    error = %error,
                    "Completion failed with a non-retryable error"
                );
                return Err(error);
            }

            if attempt >= max_attempts {
                tracing::error!(
                    attempts = attempt,
                    kind = %error.kind(),
                    error = %error,
                    "All completion attempts failed"
                );
                return Err(LlmError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(error),
                });
            }

            let delay = self.policy.delay_after(attempt);
            tracing::warn!(
                attempt,
                delay_ms = delay.as_millis(),
                kind = %error.kind(),
                error = %error,
                "Completion attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// One attempt. The timeout drops the in-flight request future on expiry.
    async fn attempt<T, F>(&self, request: &ChatRequest, extract: &F) -> Result<T, LlmError>
    where
        F: Fn(&str) -> Result<T, ParseError>,
    {
        let text = tokio::time::timeout(self.policy.attempt_timeout, self.backend.chat(request))
            .await
            .map_err(|_| LlmError::Timeout(self.policy.attempt_timeout))??;

        tracing::debug!(response_length = text.len(), "Received completion text");
        Ok(extract(&text)?)
    }
}
