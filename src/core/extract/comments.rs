//! Translator comment tracking.
//!
//! A comment containing the `translators:` hint is remembered until the next
//! significant token. If that token starts a successful extraction the hint
//! is attached to the message; any other token drops it. Only the comment
//! immediately preceding a call counts:
//!
//! ```php
//! // translators: %s is the user name
//! __( 'Hello, %s!', 'my-plugin' );   // <- gets the hint
//!
//! // translators: shown on the login screen
//! echo __( 'Welcome', 'my-plugin' ); // <- does not: `echo` intervenes
//! ```

use regex::Regex;
use std::sync::LazyLock;

static HINT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)translators:").unwrap());

/// Per-file pending hint state.
#[derive(Debug, Default)]
pub struct CommentTracker {
    pending: Option<String>,
}

impl CommentTracker {
    /// Record a comment token. Hint comments become pending; any other
    /// comment discards whatever was pending.
    pub fn observe(&mut self, comment: &str) {
        self.pending = translator_comment(comment);
    }

    /// Attach-and-clear: hand the pending hint to a new extraction.
    pub fn take(&mut self) -> Option<String> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Normalize a raw comment lexeme into hint text.
///
/// Returns `None` when the comment carries no hint marker. Delimiters and
/// docblock `*` gutters are stripped line by line, blank lines dropped, the
/// remaining lines joined with single spaces, and the text after the marker
/// returned trimmed.
pub fn translator_comment(raw: &str) -> Option<String> {
    let text = strip_delimiters(raw)
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let marker = HINT_MARKER.find(&text)?;
    Some(text[marker.end()..].trim().to_string())
}

fn strip_delimiters(raw: &str) -> &str {
    if let Some(block) = raw.strip_prefix("/*") {
        block.strip_suffix("*/").unwrap_or(block)
    } else if let Some(line) = raw.strip_prefix("//") {
        line
    } else {
        raw.strip_prefix('#').unwrap_or(raw)
    }
}
