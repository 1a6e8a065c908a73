//! End-to-end analysis: normalize, prompt, complete, parse, enhance.

use pm_config::LlmConfig;
use pm_core::{PostMortemReport, RawIncident, normalize};
use pm_llm::{
    ChatBackend, ChatRequest, CompletionClient, LlmError, OpenAiBackend, RetryPolicy, extract_json,
};

use crate::enhance::enhance;
use crate::prompts::PromptBuilder;

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ModelParams {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Turns raw incident reports into post-mortems.
///
/// Holds only read-only state, so one analyzer can serve concurrent
/// `analyze` calls.
pub struct Analyzer<B> {
    prompts: PromptBuilder,
    client: CompletionClient<B>,
    params: ModelParams,
}

impl Analyzer<OpenAiBackend> {
    /// Production analyzer talking to the configured endpoint.
    pub fn from_config(config: &LlmConfig, prompts: PromptBuilder) -> Self {
        Self::new(
            prompts,
            CompletionClient::new(
                OpenAiBackend::from_config(config),
                RetryPolicy::from_config(config),
            ),
            ModelParams::from_config(config),
        )
    }
}

impl<B: ChatBackend> Analyzer<B> {
    pub const fn new(
        prompts: PromptBuilder,
        client: CompletionClient<B>,
        params: ModelParams,
    ) -> Self {
        Self {
            prompts,
            client,
            params,
        }
    }

    pub const fn prompts(&self) -> &PromptBuilder {
        &self.prompts
    }

    pub const fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Produce a schema-complete report for `raw`.
    ///
    /// The input is not validated here; missing fields take their
    /// normalization defaults.
    ///
    /// # Errors
    ///
    /// Returns the [`LlmError`] from the completion client unchanged.
    pub async fn analyze(&self, raw: &RawIncident) -> Result<PostMortemReport, LlmError> {
        let incident = normalize(raw);
        tracing::info!(
            title = %incident.title,
            severity = %incident.severity,
            model = %self.params.model,
            "Starting incident analysis"
        );

        let request = ChatRequest::new(
            self.params.model.as_str(),
            self.prompts.system_prompt(),
            self.prompts.build(&incident),
        )
        .with_temperature(self.params.temperature)
        .with_max_tokens(self.params.max_tokens);

        let parsed = self.client.complete_with(&request, extract_json).await?;
        let report = enhance(&parsed, &incident);

        tracing::info!(
            title = %report.incident_title,
            action_items = report.action_items.len(),
            "Incident analysis complete"
        );
        Ok(report)
    }
}
