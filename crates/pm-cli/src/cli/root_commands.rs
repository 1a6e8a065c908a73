use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Generate a post-mortem report for an incident.
    Analyze(AnalyzeArgs),
    /// Print the normalized incident (no network).
    Normalize(InputArgs),
    /// Print the prompts that would be sent to the model (no network).
    Prompt(InputArgs),
    /// Check an incident report for problems.
    Validate(InputArgs),
    /// Print the JSON Schema of the post-mortem report.
    Schema,
}

/// Where to read the incident JSON from.
#[derive(Clone, Debug, Args)]
pub struct InputArgs {
    /// Incident JSON file; reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Skip input validation and rely on normalization defaults.
    #[arg(long)]
    pub no_validate: bool,
}
