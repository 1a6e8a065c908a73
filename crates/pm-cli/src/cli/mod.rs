use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `postmortem` binary.
#[derive(Debug, Parser)]
#[command(
    name = "postmortem",
    version,
    about = "Turn incident reports into structured post-mortems"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory with system-prompt.txt and user-prompt-template.txt
    #[arg(long, global = true)]
    pub prompts_dir: Option<PathBuf>,

    /// Model name, overriding configuration
    #[arg(short, long, global = true)]
    pub model: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            prompts_dir: self.prompts_dir.clone(),
            model: self.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "postmortem",
            "--format",
            "raw",
            "--verbose",
            "--model",
            "llama-3.1-8b-instant",
            "analyze",
            "incident.json",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert_eq!(cli.model.as_deref(), Some("llama-3.1-8b-instant"));
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input.file.as_deref(), Some(Path::new("incident.json")));
        assert!(!args.no_validate);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["postmortem", "normalize", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Normalize(ref args) if args.file.is_none()));
    }

    #[test]
    fn analyze_accepts_no_validate() {
        let cli = Cli::try_parse_from(["postmortem", "analyze", "--no-validate"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Analyze(ref args) if args.no_validate));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["postmortem", "--format", "table", "schema"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["postmortem", "--prompts-dir", "/tmp/prompts", "prompt"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.prompts_dir.as_deref(), Some(Path::new("/tmp/prompts")));
        assert_eq!(flags.format, OutputFormat::Json);
        assert!(flags.model.is_none());
    }
}
