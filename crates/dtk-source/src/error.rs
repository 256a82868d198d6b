//! Error types for token sources

use dtk_registry::BuildError;
use std::path::PathBuf;

/// Errors while reading declarative token sources
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No parser registered for file extension
    #[error("no parser registered for extension: '{0}'")]
    NoParserForExtension(String),

    /// Document could not be decoded (path not yet known)
    #[error("parse error: {0}")]
    Parse(String),

    /// Syntax or shape error in a source file
    #[error("syntax error in {path}: {message}")]
    Syntax { path: PathBuf, message: String },

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory has no `tokens.<ext>` base document
    #[error("no base token document (tokens.<ext>) in {0}")]
    MissingBase(PathBuf),

    /// Directory has more than one base document
    #[error("multiple base token documents: {}", .0.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    AmbiguousBase(Vec<PathBuf>),

    /// Two theme files share a stem
    #[error("theme '{theme}' defined more than once (again in {path})")]
    DuplicateTheme { theme: String, path: PathBuf },
}

impl SourceError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a path to a pathless parse error
    #[must_use]
    pub fn at(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Parse(message) => Self::Syntax {
                path: path.into(),
                message,
            },
            other => other,
        }
    }
}

/// Errors on the combined load-then-build path
#[derive(Debug, thiserror::Error)]
pub enum DtkError {
    /// Reading or decoding failed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Registry validation failed
    #[error(transparent)]
    Build(#[from] BuildError),
}
