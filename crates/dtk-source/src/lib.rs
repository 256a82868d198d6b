//! DTK Token Sources
//!
//! Declarative input for the token registry.
//!
//! # Overview
//!
//! - **TokenDocument**: tokens grouped by category, in declaration order
//! - **TokenBundle**: base document plus named theme documents
//! - **DocumentParser**: JSON, YAML and TOML decoding, selected by file extension
//! - **Loader**: single bundle files or `tokens.<ext>` + `themes/` directories

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod loader;
pub mod parsers;

// Re-exports
pub use document::{DocumentEntry, ThemeDocument, TokenBundle, TokenDocument};
pub use error::{DtkError, SourceError};
pub use loader::{load, load_registry, Loader};
pub use parsers::{default_parsers, DocumentParser, JsonParser, ParserRegistry, TomlParser, YamlParser};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
