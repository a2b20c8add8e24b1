use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        catalog::Catalog,
        extract::{ExtractedMessage, FileExtractor},
        file_scanner::scan_files,
        pot::{PotHeader, WriteError, write_pot},
        registry::Registry,
    },
    utils::relative_display_path,
};

/// Default template location under the source root: `languages/<domain>.pot`.
const DEFAULT_OUTPUT_DIR: &str = "languages";

/// A source file that could not be read. Skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFile {
    pub path: String,
    pub reason: String,
}

/// Result of scanning every file into one catalog.
#[derive(Debug, Default)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub files_scanned: usize,
    pub unreadable: Vec<UnreadableFile>,
}

/// Extract one domain's catalog from `files`.
///
/// Files are processed in parallel, each producing its own batch of
/// messages; batches are then merged sequentially in the order of `files`,
/// so the catalog is identical however the work was scheduled.
pub fn build_catalog(
    root: &Path,
    files: &[PathBuf],
    registry: &Registry,
    domain: &str,
) -> CatalogBuild {
    let extractor = FileExtractor::new(registry, domain);

    let batches: Vec<(String, Result<Vec<ExtractedMessage>, String>)> = files
        .par_iter()
        .map(|path| {
            let reference_path = relative_display_path(root, path);
            let messages = fs::read(path)
                .map(|bytes| extractor.extract(&String::from_utf8_lossy(&bytes)))
                .map_err(|err| err.to_string());
            (reference_path, messages)
        })
        .collect();

    let mut build = CatalogBuild::default();
    for (reference_path, messages) in batches {
        match messages {
            Ok(messages) => {
                tracing::debug!(file = %reference_path, count = messages.len(), "extracted messages");
                build.files_scanned += 1;
                for message in messages {
                    build.catalog.add(
                        message.key,
                        format!("{}:{}", reference_path, message.line),
                        message.comment,
                    );
                }
            }
            Err(reason) => {
                tracing::warn!(file = %reference_path, %reason, "skipping unreadable file");
                build.unreadable.push(UnreadableFile {
                    path: reference_path,
                    reason,
                });
            }
        }
    }

    build
}

/// Everything one `extract` run needs, resolved from CLI args, the config
/// file and defaults (in that order of priority).
pub struct ExtractContext {
    pub config: Config,

    /// Source root; references are written relative to it.
    pub root_dir: PathBuf,

    /// Target text domain.
    pub domain: String,

    /// Where the template is written.
    pub destination: PathBuf,

    /// Source files to scan, sorted.
    pub files: Vec<PathBuf>,

    /// Paths the scanner could not access.
    pub skipped_count: usize,

    pub verbose: bool,

    /// True when `.makepotrc.json` was found.
    pub config_from_file: bool,

    registry: Registry,
}

impl ExtractContext {
    /// Load configuration and collect source files.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or the source root is not
    /// a directory.
    pub fn new(common_args: &CommonArgs, output: Option<&Path>) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        if !root_dir.is_dir() {
            return Err(anyhow!(
                "Source root is not a directory: {}",
                root_dir.display()
            ));
        }

        let config_result = load_config(&root_dir)?;
        let config = config_result.config;

        let domain = match common_args.domain.clone().or_else(|| config.domain.clone()) {
            Some(domain) => domain,
            None => default_domain(&root_dir)?,
        };

        let destination = match (output, &config.output) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(configured)) => resolve_against(&root_dir, Path::new(configured)),
            (None, None) => resolve_against(
                &root_dir,
                &Path::new(DEFAULT_OUTPUT_DIR).join(format!("{}.pot", domain)),
            ),
        };

        let scan_result = scan_files(
            &root_dir,
            &config.includes,
            &config.ignores,
            &config.extensions,
            verbose,
        );

        Ok(Self {
            root_dir,
            domain,
            destination,
            files: scan_result.files,
            skipped_count: scan_result.skipped_count,
            verbose,
            config_from_file: config_result.from_file,
            config,
            registry: Registry::default(),
        })
    }

    /// Run the extraction over every scanned file.
    pub fn build_catalog(&self) -> CatalogBuild {
        build_catalog(&self.root_dir, &self.files, &self.registry, &self.domain)
    }

    /// Serialize `catalog` to [`Self::destination`], returning the path written.
    pub fn write_catalog(&self, catalog: &Catalog) -> Result<PathBuf, WriteError> {
        write_pot(catalog, &PotHeader::new(&self.domain), &self.destination)
    }
}

/// The source root's directory name, used when no domain is configured.
fn default_domain(root_dir: &Path) -> Result<String> {
    let absolute = root_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve source root: {}", root_dir.display()))?;
    absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| {
            format!(
                "Cannot derive a text domain from {}; pass --domain",
                absolute.display()
            )
        })
}

/// Resolve a configured path relative to the source root.
fn resolve_against(root_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    // With `--source-root .` keep the path as configured, so output reads
    // "languages/x.pot" rather than "./languages/x.pot".
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    let relative = path.strip_prefix(".").unwrap_or(path);
    if is_cur_dir {
        relative.to_path_buf()
    } else {
        root_dir.join(relative)
    }
}
