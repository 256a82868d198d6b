//! Document parsers for different file formats
//!
//! Provides decoding from declarative files into token documents:
//! - JSON via serde_json
//! - YAML via serde_yaml
//! - TOML via toml

use crate::document::{TokenBundle, TokenDocument};
use crate::error::SourceError;
use std::path::Path;

mod json;
mod toml;
mod yaml;

pub use self::json::JsonParser;
pub use self::toml::TomlParser;
pub use self::yaml::YamlParser;

/// Parser trait for decoding file content into token documents
///
/// Implement this trait to add support for new file formats.
pub trait DocumentParser: Send + Sync + 'static {
    /// Decode a single category-grouped document (base or theme)
    ///
    /// # Errors
    /// Returns [`SourceError::Parse`] on syntax or shape errors.
    fn parse_document(&self, content: &str) -> Result<TokenDocument, SourceError>;

    /// Decode a bundle with `base` and `themes` sections
    ///
    /// # Errors
    /// Returns [`SourceError::Parse`] on syntax or shape errors.
    fn parse_bundle(&self, content: &str) -> Result<TokenBundle, SourceError>;

    /// Supported file extensions (without dot)
    fn extensions(&self) -> &[&str];

    /// Check if this parser can handle the given path
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Parser priority (higher = tried first when multiple parsers match)
    fn priority(&self) -> i32 {
        0
    }
}

/// Parsers keyed by file extension
pub struct ParserRegistry {
    parsers: Vec<Box<dyn DocumentParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parser_count", &self.parsers.len())
            .field("extensions", &self.all_extensions())
            .finish()
    }
}

impl ParserRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a parser
    pub fn register<P: DocumentParser>(&mut self, parser: P) {
        self.parsers.push(Box::new(parser));
        self.parsers
            .sort_by_key(|p| std::cmp::Reverse(p.priority()));
    }

    /// Find parser for path
    #[must_use]
    pub fn find_for_path(&self, path: &Path) -> Option<&dyn DocumentParser> {
        self.parsers.iter().find(|p| p.can_parse(path)).map(|p| &**p)
    }

    /// Find parser for path or fail with the offending extension
    ///
    /// # Errors
    /// Returns [`SourceError::NoParserForExtension`].
    pub fn require_for_path(&self, path: &Path) -> Result<&dyn DocumentParser, SourceError> {
        self.find_for_path(path).ok_or_else(|| {
            SourceError::NoParserForExtension(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default()
                    .to_string(),
            )
        })
    }

    /// Get all registered extensions
    #[must_use]
    pub fn all_extensions(&self) -> Vec<&str> {
        self.parsers
            .iter()
            .flat_map(|p| p.extensions())
            .copied()
            .collect()
    }
}

/// Create default parser registry with built-in parsers
#[inline]
#[must_use]
pub fn default_parsers() -> ParserRegistry {
    let mut registry = ParserRegistry::new();
    registry.register(JsonParser);
    registry.register(YamlParser);
    registry.register(TomlParser);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedParser;

    impl DocumentParser for FixedParser {
        fn parse_document(&self, _content: &str) -> Result<TokenDocument, SourceError> {
            Ok(TokenDocument::new())
        }

        fn parse_bundle(&self, _content: &str) -> Result<TokenBundle, SourceError> {
            Ok(TokenBundle::default())
        }

        fn extensions(&self) -> &[&str] {
            &["json"]
        }

        fn priority(&self) -> i32 {
            10
        }
    }

    #[test]
    fn parser_can_parse_by_extension() {
        assert!(JsonParser.can_parse(Path::new("tokens.json")));
        assert!(YamlParser.can_parse(Path::new("/path/to/themes/dark.yml")));
        assert!(!TomlParser.can_parse(Path::new("tokens.txt")));
        assert!(!TomlParser.can_parse(Path::new("toml")));
    }

    #[test]
    fn registry_finds_by_extension() {
        let registry = default_parsers();
        assert!(registry.find_for_path(Path::new("a.yaml")).is_some());
        assert!(registry.find_for_path(Path::new("a.toml")).is_some());
        assert!(registry.find_for_path(Path::new("a.css")).is_none());
        assert_eq!(registry.all_extensions(), vec!["json", "yaml", "yml", "toml"]);
    }

    #[test]
    fn missing_parser_names_extension() {
        let err = default_parsers().require_for_path(Path::new("tokens.css")).err().unwrap();
        assert_eq!(err.to_string(), "no parser registered for extension: 'css'");
    }

    #[test]
    fn higher_priority_wins() {
        let mut registry = default_parsers();
        registry.register(FixedParser);
        let parser = registry.find_for_path(Path::new("tokens.json")).unwrap();
        // FixedParser ignores content entirely
        assert!(parser.parse_document("not json").unwrap().is_empty());
    }
}
