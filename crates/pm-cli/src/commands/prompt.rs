use pm_analysis::PromptBuilder;
use pm_config::PmConfig;
use pm_core::{RawIncident, normalize};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::root_commands::InputArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::input;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RenderedPrompt<'a> {
    model: &'a str,
    system: &'a str,
    user: String,
}

/// Handle `postmortem prompt`. `--format raw` prints the user prompt as plain text.
pub fn handle(args: &InputArgs, config: &PmConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = input::read_incident(args.file.as_deref())?;
    let prompts = bootstrap::prompt_builder(config)?;
    let rendered = render(&prompts, &config.llm.model, &raw);

    match flags.format {
        OutputFormat::Raw => {
            println!("{}", rendered.user);
            Ok(())
        }
        OutputFormat::Json => output(&rendered, flags.format),
    }
}

fn render<'a>(prompts: &'a PromptBuilder, model: &'a str, raw: &RawIncident) -> RenderedPrompt<'a> {
    RenderedPrompt {
        model,
        system: prompts.system_prompt(),
        user: prompts.build(&normalize(raw)),
    }
}
