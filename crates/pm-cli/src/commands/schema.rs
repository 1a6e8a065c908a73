use pm_core::report::report_schema;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `postmortem schema`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&report_schema(), flags.format)
}
