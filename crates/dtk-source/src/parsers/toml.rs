//! TOML document parser

use crate::document::{TokenBundle, TokenDocument};
use crate::error::SourceError;
use crate::parsers::DocumentParser;
use serde::de::DeserializeOwned;

/// TOML parser using the toml crate
///
/// Token names contain dots, so keys must be quoted: `"spacing.md" = "1rem"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl TomlParser {
    fn decode<T: DeserializeOwned>(content: &str) -> Result<T, SourceError> {
        toml::from_str(content).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

impl DocumentParser for TomlParser {
    fn parse_document(&self, content: &str) -> Result<TokenDocument, SourceError> {
        Self::decode(content)
    }

    fn parse_bundle(&self, content: &str) -> Result<TokenBundle, SourceError> {
        Self::decode(content)
    }

    fn extensions(&self) -> &[&str] {
        &["toml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtk_token::RawValue;

    #[test]
    fn parses_inline_tables() {
        let doc = TomlParser
            .parse_document(
                "[radius]\n\"radius.md\" = { value = 6, unit = \"px\" }\n\"radius.lg\" = { ref = \"radius.md\" }\n",
            )
            .unwrap();
        let values: Vec<&RawValue> = doc.entries().map(|(_, _, e)| &e.value).collect();
        assert_eq!(
            values,
            vec![&RawValue::measured(6.0, "px"), &RawValue::reference("radius.md")]
        );
    }

    #[test]
    fn unquoted_dotted_key_is_not_a_token() {
        // `spacing.md = ...` is a nested table in TOML, not a token named spacing.md
        assert!(TomlParser.parse_document("[spacing]\nspacing.md = \"1rem\"\n").is_err());
    }
}
