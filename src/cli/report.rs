//! Report formatting and printing utilities.
//!
//! Separate from core logic to allow makepot to be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Extract(summary) => {
            print_extract_to(summary, &mut io::stdout().lock());
            print_extract_warnings_to(summary, verbose, &mut io::stderr().lock());
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print the extraction summary line.
pub fn print_extract_to<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} from {} {} into {}",
            summary.message_count,
            if summary.message_count == 1 {
                "message"
            } else {
                "messages"
            },
            summary.files_scanned,
            if summary.files_scanned == 1 {
                "file"
            } else {
                "files"
            },
            summary.destination.display()
        )
        .green()
    );
}

/// Print warnings about paths that were skipped during the run.
pub fn print_extract_warnings_to<W: Write>(summary: &ExtractSummary, verbose: bool, writer: &mut W) {
    if !summary.unreadable.is_empty() {
        if verbose {
            for file in &summary.unreadable {
                let _ = writeln!(
                    writer,
                    "{} Cannot read {}: {}",
                    "warning:".bold().yellow(),
                    file.path,
                    file.reason
                );
            }
        } else {
            let _ = writeln!(
                writer,
                "{} {} file(s) could not be read (use {} for details)",
                "warning:".bold().yellow(),
                summary.unreadable.len(),
                "-v".cyan()
            );
        }
    }

    // The scanner already reported each path in verbose mode.
    if summary.skipped_count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be accessed (use {} for details)",
            "warning:".bold().yellow(),
            summary.skipped_count,
            "-v".cyan()
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}
