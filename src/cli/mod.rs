//! Command-line interface layer.

use anyhow::Result;

pub mod args;
mod commands;
pub mod exit_status;
mod report;

pub use args::{Arguments, Command, CommonArgs, ExtractCommand};
pub use exit_status::ExitStatus;

use commands::{CommandResult, extract::extract, init::init};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success);
    };

    let result = run(command)?;
    report::print(&result, verbose);

    Ok(exit_status_from_result(&result))
}

fn run(command: Command) -> Result<CommandResult> {
    match command {
        Command::Extract(cmd) => extract(cmd),
        Command::Init => init(),
    }
}

fn exit_status_from_result(result: &CommandResult) -> ExitStatus {
    if result.error_count > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}
