use pm_core::validate_incident;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputArgs;
use crate::input;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    problems: &'a [String],
}

/// Handle `postmortem validate`. Prints the problems, then fails if there are any.
pub fn handle(args: &InputArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = input::read_incident(args.file.as_deref())?;

    match validate_incident(&raw) {
        Ok(()) => output(
            &ValidationReport {
                valid: true,
                problems: &[],
            },
            flags.format,
        ),
        Err(error) => {
            output(
                &ValidationReport {
                    valid: false,
                    problems: &error.problems,
                },
                flags.format,
            )?;
            Err(error.into())
        }
    }
}
