use pm_config::PmConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &PmConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => commands::analyze::handle(&args, config, flags).await,
        Commands::Normalize(args) => commands::normalize::handle(&args, flags),
        Commands::Prompt(args) => commands::prompt::handle(&args, config, flags),
        Commands::Validate(args) => commands::validate::handle(&args, flags),
        Commands::Schema => commands::schema::handle(flags),
    }
}
