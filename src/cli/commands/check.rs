use anyhow::Result;

use super::super::{exit_status::ExitStatus, report};
use crate::{
    cli::args::CommonArgs,
    core::{UpdateContext, emit::compare_outputs, plan_update},
};

/// Report whether `update` would change either output. Writes nothing.
pub fn check(args: &CommonArgs) -> Result<ExitStatus> {
    let ctx = UpdateContext::new(args)?;

    let plan = plan_update(&ctx, &mut |_| {})?;
    report::print_diagnostics(&plan.diagnostics(), ctx.verbose);

    let status = compare_outputs(&plan.outputs, &ctx.map_path(), &ctx.module_path())?;
    report::print_check_status(&ctx, &status);
    if !status.is_up_to_date() {
        report::print_merge_summary(&plan.merge, ctx.verbose);
        return Ok(ExitStatus::Failure);
    }

    Ok(ExitStatus::Success)
}
