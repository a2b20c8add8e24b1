//! Translation template (`.pot`) serialization.
//!
//! The whole template is rendered in memory, written to a temporary file next
//! to the destination and renamed into place, so a failed run never leaves a
//! half-written file behind.

use std::{
    fmt::Write as _,
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use chrono::Utc;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::catalog::{Catalog, CatalogEntry};

/// Value of the `X-Generator` header.
pub const GENERATOR: &str = concat!("makepot ", env!("CARGO_PKG_VERSION"));

/// Failure to put the template on disk.
///
/// Callers may use this to fall back to another extraction tool.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create directory {}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write translation template {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Generation metadata written into the synthetic header entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotHeader {
    pub domain: String,
    /// `YYYY-MM-DD HH:MM+0000`.
    pub creation_date: String,
    pub generator: String,
}

impl PotHeader {
    /// Header stamped with the current UTC time.
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            creation_date: Utc::now().format("%Y-%m-%d %H:%M+0000").to_string(),
            generator: GENERATOR.to_string(),
        }
    }
}

/// Render the header followed by every entry in sort-key order.
pub fn render_pot(catalog: &Catalog, header: &PotHeader) -> String {
    let mut out = String::new();
    write_header(&mut out, header);
    for entry in catalog.sorted_entries() {
        out.push('\n');
        write_entry(&mut out, entry);
    }
    out
}

/// Render and write the template, creating parent directories as needed.
///
/// Returns the path written.
pub fn write_pot(
    catalog: &Catalog,
    header: &PotHeader,
    destination: &Path,
) -> Result<PathBuf, WriteError> {
    let content = render_pot(catalog, header);
    let write_error = |source| WriteError::Write {
        path: destination.to_path_buf(),
        source,
    };

    let parent = match destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|source| WriteError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
            parent
        }
        None => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(parent).map_err(write_error)?;
    file.write_all(content.as_bytes()).map_err(write_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_error)?;
    }
    file.persist(destination).map_err(|err| write_error(err.error))?;

    Ok(destination.to_path_buf())
}

fn write_header(out: &mut String, header: &PotHeader) {
    let fields = [
        ("Project-Id-Version", header.domain.as_str()),
        ("Report-Msgid-Bugs-To", ""),
        ("POT-Creation-Date", header.creation_date.as_str()),
        ("PO-Revision-Date", "YEAR-MO-DA HO:MI+0000"),
        ("Last-Translator", ""),
        ("Language-Team", ""),
        ("Language", ""),
        ("MIME-Version", "1.0"),
        ("Content-Type", "text/plain; charset=UTF-8"),
        ("Content-Transfer-Encoding", "8bit"),
        ("X-Generator", header.generator.as_str()),
        ("X-Domain", header.domain.as_str()),
    ];

    out.push_str("msgid \"\"\nmsgstr \"\"\n");
    for (name, value) in fields {
        let _ = writeln!(out, "\"{}: {}\\n\"", name, escape(value));
    }
}

fn write_entry(out: &mut String, entry: &CatalogEntry) {
    for comment in &entry.comments {
        let _ = writeln!(out, "#. {}", comment);
    }
    if !entry.references.is_empty() {
        let references: Vec<&str> = entry.references.iter().map(String::as_str).collect();
        let _ = writeln!(out, "#: {}", references.join(" "));
    }

    let key = &entry.key;
    if let Some(context) = &key.context {
        write_string(out, "msgctxt", context);
    }
    write_string(out, "msgid", &key.singular);
    match &key.plural {
        Some(plural) => {
            write_string(out, "msgid_plural", plural);
            out.push_str("msgstr[0] \"\"\nmsgstr[1] \"\"\n");
        }
        None => out.push_str("msgstr \"\"\n"),
    }
}

/// Write `keyword "value"`, splitting values with inner newlines into one
/// quoted segment per line after an empty first segment.
fn write_string(out: &mut String, keyword: &str, value: &str) {
    let segments: Vec<&str> = value.split_inclusive('\n').collect();
    if segments.len() <= 1 {
        let _ = writeln!(out, "{} \"{}\"", keyword, escape(value));
        return;
    }

    let _ = writeln!(out, "{} \"\"", keyword);
    for segment in segments {
        let _ = writeln!(out, "\"{}\"", escape(segment));
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\u{07}' => escaped.push_str("\\a"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0B}' => escaped.push_str("\\v"),
            '\u{0C}' => escaped.push_str("\\f"),
            c if c.is_ascii_control() => {
                let _ = write!(escaped, "\\{:03o}", c as u32);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
