//! makepot - translation template extractor for PHP sources
//!
//! makepot scans PHP source files for calls to gettext-style translation
//! functions (`__`, `_x`, `_n`, ...), resolves their literal arguments and
//! writes every message of one text domain into a `.pot` template.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (tokenize, match calls, merge, serialize)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
