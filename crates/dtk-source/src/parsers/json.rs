//! JSON document parser

use crate::document::{TokenBundle, TokenDocument};
use crate::error::SourceError;
use crate::parsers::DocumentParser;
use serde::de::DeserializeOwned;

/// JSON parser using serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl JsonParser {
    fn decode<T: DeserializeOwned>(content: &str) -> Result<T, SourceError> {
        serde_json::from_str(content).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

impl DocumentParser for JsonParser {
    fn parse_document(&self, content: &str) -> Result<TokenDocument, SourceError> {
        Self::decode(content)
    }

    fn parse_bundle(&self, content: &str) -> Result<TokenBundle, SourceError> {
        Self::decode(content)
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }
}
