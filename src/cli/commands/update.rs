use anyhow::Result;

use super::super::{exit_status::ExitStatus, report};
use crate::{
    cli::args::CommonArgs,
    core::{UpdateContext, emit::write_outputs, plan_update},
};

/// Scan, merge and rewrite both outputs.
pub fn update(args: &CommonArgs) -> Result<ExitStatus> {
    let ctx = UpdateContext::new(args)?;

    let plan = plan_update(&ctx, &mut |progress| report::print_progress(&ctx, progress))?;
    report::print_diagnostics(&plan.diagnostics(), ctx.verbose);
    report::print_merge_summary(&plan.merge, ctx.verbose);

    report::print_writing(&ctx);
    write_outputs(&plan.outputs, &ctx.map_path(), &ctx.module_path())?;

    report::print_complete(plan.merge.map.elements.len());
    Ok(ExitStatus::Success)
}
