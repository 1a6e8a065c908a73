use std::path::Path;

use anyhow::Context;
use pm_analysis::{PromptBuilder, PromptTemplates};
use pm_config::PmConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (with `.env`) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PmConfig> {
    let mut config = PmConfig::load_with_dotenv()?;
    apply_overrides(&mut config, flags);

    if !config.llm.is_configured() {
        tracing::debug!("no completion API key configured; analyze will fail");
    }
    Ok(config)
}

fn apply_overrides(config: &mut PmConfig, flags: &GlobalFlags) {
    if let Some(model) = &flags.model {
        config.llm.model.clone_from(model);
    }
    if let Some(dir) = &flags.prompts_dir {
        config.general.prompts_dir = dir.display().to_string();
    }
}

/// Prompt builder from the configured template directory, or the built-ins.
pub fn prompt_builder(config: &PmConfig) -> anyhow::Result<PromptBuilder> {
    let dir = config.general.prompts_dir().map(Path::new);
    let templates = PromptTemplates::load(dir).context("failed to load prompt templates")?;
    Ok(PromptBuilder::new(templates))
}
