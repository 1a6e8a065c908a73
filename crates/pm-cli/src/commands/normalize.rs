use pm_core::normalize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputArgs;
use crate::input;
use crate::output::output;

/// Handle `postmortem normalize`.
pub fn handle(args: &InputArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = input::read_incident(args.file.as_deref())?;
    output(&normalize(&raw), flags.format)
}
