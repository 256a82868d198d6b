//! Loading token bundles from disk
//!
//! Two layouts are supported:
//! - a single bundle file with `base` and `themes` sections
//! - a directory holding `tokens.<ext>` plus `themes/<name>.<ext>`, where
//!   the theme name is the file stem

use crate::document::{TokenBundle, TokenDocument};
use crate::error::{DtkError, SourceError};
use crate::parsers::{default_parsers, ParserRegistry};
use dtk_registry::{RegistryConfig, TokenRegistry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stem of the base document in directory layouts
pub const BASE_STEM: &str = "tokens";

/// Subdirectory holding theme documents
pub const THEMES_DIR: &str = "themes";

/// Reads token sources using a parser registry
#[derive(Debug)]
pub struct Loader {
    parsers: ParserRegistry,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Loader with JSON, YAML and TOML support
    #[must_use]
    pub fn new() -> Self {
        Self::with_parsers(default_parsers())
    }

    /// Loader with custom parsers
    #[must_use]
    pub fn with_parsers(parsers: ParserRegistry) -> Self {
        Self { parsers }
    }

    /// Load a bundle file or a bundle directory
    ///
    /// # Errors
    /// See [`load_bundle`](Self::load_bundle) and [`load_dir`](Self::load_dir).
    pub fn load(&self, path: &Path) -> Result<TokenBundle, SourceError> {
        if path.is_dir() {
            self.load_dir(path)
        } else {
            self.load_bundle(path)
        }
    }

    /// Load a single file with `base` and `themes` sections
    ///
    /// # Errors
    /// Returns [`SourceError`] on unknown extension, IO or syntax errors.
    pub fn load_bundle(&self, path: &Path) -> Result<TokenBundle, SourceError> {
        let parser = self.parsers.require_for_path(path)?;
        let content = read(path)?;
        let bundle = parser.parse_bundle(&content).map_err(|e| e.at(path))?;
        info!(
            path = %path.display(),
            tokens = bundle.base.len(),
            themes = bundle.themes.len(),
            "token bundle loaded"
        );
        Ok(bundle)
    }

    /// Load `tokens.<ext>` and `themes/*.<ext>` from a directory
    ///
    /// Theme files are read in path order; files with unknown extensions
    /// are skipped.
    ///
    /// # Errors
    /// Returns [`SourceError::MissingBase`] or [`SourceError::AmbiguousBase`]
    /// for base document problems, [`SourceError::DuplicateTheme`] when two
    /// theme files share a stem, plus IO and syntax errors.
    pub fn load_dir(&self, dir: &Path) -> Result<TokenBundle, SourceError> {
        let base_path = self.find_base(dir)?;
        let mut bundle = TokenBundle::new(self.load_document(&base_path)?);

        let themes_dir = dir.join(THEMES_DIR);
        if themes_dir.is_dir() {
            for path in sorted_files(&themes_dir)? {
                if self.parsers.find_for_path(&path).is_none() {
                    debug!(path = %path.display(), "skipping file without parser");
                    continue;
                }
                let Some(theme) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                    continue;
                };
                if bundle.themes.contains_key(&theme) {
                    return Err(SourceError::DuplicateTheme { theme, path });
                }
                let document = self.load_document(&path)?;
                debug!(theme = %theme, overrides = document.len(), "theme document loaded");
                bundle.themes.insert(theme, document);
            }
        }

        info!(
            dir = %dir.display(),
            tokens = bundle.base.len(),
            themes = bundle.themes.len(),
            "token directory loaded"
        );
        Ok(bundle)
    }

    /// Load a single category-grouped document
    ///
    /// # Errors
    /// Returns [`SourceError`] on unknown extension, IO or syntax errors.
    pub fn load_document(&self, path: &Path) -> Result<TokenDocument, SourceError> {
        let parser = self.parsers.require_for_path(path)?;
        let content = read(path)?;
        parser.parse_document(&content).map_err(|e| e.at(path))
    }

    /// Load and build in one step
    ///
    /// # Errors
    /// Returns [`DtkError::Source`] for loading problems and
    /// [`DtkError::Build`] for validation failures.
    pub fn load_registry(&self, path: &Path, config: RegistryConfig) -> Result<TokenRegistry, DtkError> {
        let bundle = self.load(path)?;
        Ok(bundle.into_builder(config).build()?)
    }

    fn find_base(&self, dir: &Path) -> Result<PathBuf, SourceError> {
        let mut candidates: Vec<PathBuf> = self
            .parsers
            .all_extensions()
            .into_iter()
            .map(|ext| dir.join(format!("{BASE_STEM}.{ext}")))
            .filter(|path| path.is_file())
            .collect();

        match candidates.len() {
            0 => Err(SourceError::MissingBase(dir.to_path_buf())),
            1 => Ok(candidates.remove(0)),
            _ => Err(SourceError::AmbiguousBase(candidates)),
        }
    }
}

/// Load a bundle with the default parsers
///
/// # Errors
/// See [`Loader::load`].
pub fn load(path: &Path) -> Result<TokenBundle, SourceError> {
    Loader::new().load(path)
}

/// Load and build a registry with the default parsers
///
/// # Errors
/// See [`Loader::load_registry`].
pub fn load_registry(path: &Path, config: RegistryConfig) -> Result<TokenRegistry, DtkError> {
    Loader::new().load_registry(path, config)
}

fn read(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|e| SourceError::io_error(path, e))
}

fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| SourceError::io_error(dir, e))? {
        let path = entry.map_err(|e| SourceError::io_error(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
