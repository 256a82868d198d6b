//! YAML document parser

use crate::document::{TokenBundle, TokenDocument};
use crate::error::SourceError;
use crate::parsers::DocumentParser;
use serde::de::DeserializeOwned;

/// YAML parser using serde_yaml
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl YamlParser {
    fn decode<T: DeserializeOwned>(content: &str) -> Result<T, SourceError> {
        serde_yaml::from_str(content).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

impl DocumentParser for YamlParser {
    fn parse_document(&self, content: &str) -> Result<TokenDocument, SourceError> {
        // An empty theme file is an empty override set
        if content.trim().is_empty() {
            return Ok(TokenDocument::new());
        }
        Self::decode(content)
    }

    fn parse_bundle(&self, content: &str) -> Result<TokenBundle, SourceError> {
        Self::decode(content)
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
