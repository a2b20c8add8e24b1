//! Extraction engine.
//!
//! Source files are tokenized, registered call sites are matched against the
//! [`Registry`], and the resolved messages are merged into a [`Catalog`] that
//! is serialized as a `.pot` template.

pub mod catalog;
pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod lexer;
pub mod pot;
pub mod registry;

pub use catalog::{Catalog, CatalogEntry, MessageKey};
pub use context::{CatalogBuild, ExtractContext, UnreadableFile, build_catalog};
pub use extract::{ExtractedMessage, FileExtractor};
pub use pot::{PotHeader, WriteError, render_pot, write_pot};
pub use registry::{ArgumentRoles, MessageShape, Registry};
