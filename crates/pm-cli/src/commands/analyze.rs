use pm_analysis::Analyzer;
use pm_config::PmConfig;
use pm_core::validate_incident;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::input;
use crate::output::output;

/// Handle `postmortem analyze`.
pub async fn handle(
    args: &AnalyzeArgs,
    config: &PmConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let raw = input::read_incident(args.input.file.as_deref())?;

    if config.general.validate_input && !args.no_validate {
        validate_incident(&raw)?;
    }

    let analyzer = Analyzer::from_config(&config.llm, bootstrap::prompt_builder(config)?);
    let report = analyzer.analyze(&raw).await?;

    output(&report, flags.format)
}
