use anyhow::Result;

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::core::ExtractContext;

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = ExtractContext::new(&cmd.common, cmd.output.as_deref())?;
    tracing::debug!(
        domain = %ctx.domain,
        files = ctx.files.len(),
        config_from_file = ctx.config_from_file,
        "starting extraction"
    );

    let build = ctx.build_catalog();
    let destination = ctx.write_catalog(&build.catalog)?;

    Ok(CommandResult {
        summary: CommandSummary::Extract(ExtractSummary {
            message_count: build.catalog.len(),
            files_scanned: build.files_scanned,
            destination,
            unreadable: build.unreadable,
            skipped_count: ctx.skipped_count,
        }),
        error_count: 0,
    })
}
