use std::path::PathBuf;

use crate::core::UnreadableFile;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub message_count: usize,
    pub files_scanned: usize,
    pub destination: PathBuf,
    pub unreadable: Vec<UnreadableFile>,
    /// Paths the scanner could not access.
    pub skipped_count: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    /// False when the config file already existed.
    pub created: bool,
}

/// Result of running makepot commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
}
