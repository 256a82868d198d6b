//! Declarative token documents
//!
//! A document groups tokens by category, then maps full token names to
//! entries. Declaration order is kept.
//!
//! ```yaml
//! color:
//!   color.primary.500: "#3b82f6"
//!   color.button.bg: "{color.primary.500}"
//! spacing:
//!   spacing.md: 1rem
//!   spacing.lg: { ref: spacing.md }
//! radius:
//!   radius.md: { value: 6, unit: px, description: Default corner }
//! ```

use dtk_registry::{RegistryBuilder, RegistryConfig};
use dtk_token::{Category, RawValue};
use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt::{self, Display};
use std::hash::Hash;
use std::marker::PhantomData;

/// Single token definition with optional documentation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "EntryRepr")]
pub struct DocumentEntry {
    /// Raw definition
    pub value: RawValue,
    /// Documentation string
    pub description: Option<String>,
}

impl DocumentEntry {
    /// Entry without description
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<RawValue>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(f64),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DetailedRepr {
    value: Option<Scalar>,
    #[serde(rename = "ref")]
    reference: Option<String>,
    unit: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    Plain(Scalar),
    Detailed(DetailedRepr),
}

impl TryFrom<EntryRepr> for DocumentEntry {
    type Error = String;

    fn try_from(repr: EntryRepr) -> Result<Self, Self::Error> {
        let detailed = match repr {
            EntryRepr::Plain(Scalar::Text(text)) => return Ok(Self::new(text)),
            EntryRepr::Plain(Scalar::Number(n)) => return Ok(Self::new(n)),
            EntryRepr::Detailed(detailed) => detailed,
        };

        let value = match (detailed.value, detailed.reference, detailed.unit) {
            (Some(_), Some(_), _) => return Err("entry has both 'value' and 'ref'".to_string()),
            (None, None, _) => return Err("entry needs 'value' or 'ref'".to_string()),
            (None, Some(_), Some(_)) => return Err("'unit' cannot be combined with 'ref'".to_string()),
            (None, Some(target), None) => RawValue::reference(target),
            (Some(Scalar::Number(n)), None, Some(unit)) => RawValue::measured(n, unit),
            (Some(Scalar::Number(n)), None, None) => RawValue::Number(n),
            (Some(Scalar::Text(_)), None, Some(_)) => {
                return Err("'unit' only applies to numeric values".to_string())
            }
            (Some(Scalar::Text(text)), None, None) => RawValue::Text(text),
        };
        Ok(Self {
            value,
            description: detailed.description,
        })
    }
}

/// Map visitor that fails on a repeated key instead of keeping the last value
struct UniqueKeys<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for UniqueKeys<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Display,
    V: Deserialize<'de>,
{
    type Value = IndexMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with unique keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<K, V>()? {
            if map.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key '{key}'")));
            }
            map.insert(key, value);
        }
        Ok(map)
    }
}

fn unique_keys<'de, D, K, V>(deserializer: D) -> Result<IndexMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Eq + Hash + Display,
    V: Deserialize<'de>,
{
    deserializer.deserialize_map(UniqueKeys(PhantomData))
}

/// Entries of one category group, keyed by full token name
#[derive(Debug, Clone, Default, PartialEq)]
struct Group(IndexMap<String, DocumentEntry>);

impl<'de> Deserialize<'de> for Group {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        unique_keys(deserializer).map(Group)
    }
}

/// Tokens grouped by category
///
/// Repeated categories or repeated names within a group are decode errors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TokenDocument {
    #[serde(deserialize_with = "unique_keys")]
    groups: IndexMap<Category, Group>,
}

/// Theme override document; same shape as the base document
///
/// Grouping must agree with the base category of each overridden token.
pub type ThemeDocument = TokenDocument;

impl TokenDocument {
    /// Empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry under a category
    pub fn insert(&mut self, category: Category, name: impl Into<String>, entry: DocumentEntry) {
        self.groups.entry(category).or_default().0.insert(name.into(), entry);
    }

    /// Entries in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (Category, &str, &DocumentEntry)> {
        self.groups.iter().flat_map(|(category, entries)| {
            entries
                .0
                .iter()
                .map(move |(name, entry)| (*category, name.as_str(), entry))
        })
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(|group| group.0.len()).sum()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Define every entry as a base token
    pub fn apply_base(&self, builder: &mut RegistryBuilder) {
        for (category, name, entry) in self.entries() {
            builder.token(name, category, entry.value.clone());
            if let Some(text) = &entry.description {
                builder.describe(text.clone());
            }
        }
    }

    /// Declare `theme` and add every entry as a category-checked override
    pub fn apply_theme(&self, theme: &str, builder: &mut RegistryBuilder) {
        builder.theme(theme);
        for (category, name, entry) in self.entries() {
            builder.override_token_in(theme, name, category, entry.value.clone());
        }
    }
}

/// Base document plus named theme documents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenBundle {
    /// Base layer
    pub base: TokenDocument,
    /// Override layers by theme name
    #[serde(default, deserialize_with = "unique_keys")]
    pub themes: IndexMap<String, ThemeDocument>,
}

impl TokenBundle {
    /// Bundle with no themes
    #[must_use]
    pub fn new(base: TokenDocument) -> Self {
        Self {
            base,
            themes: IndexMap::new(),
        }
    }

    /// Builder holding every definition in this bundle
    #[must_use]
    pub fn to_builder(&self, config: RegistryConfig) -> RegistryBuilder {
        let mut builder = RegistryBuilder::with_config(config);
        self.base.apply_base(&mut builder);
        for (theme, document) in &self.themes {
            document.apply_theme(theme, &mut builder);
        }
        builder
    }

    /// Consume into a builder
    #[must_use]
    pub fn into_builder(self, config: RegistryConfig) -> RegistryBuilder {
        self.to_builder(config)
    }

    /// Total entries across base and themes
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.base.len() + self.themes.values().map(TokenDocument::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtk_registry::BuildError;
    use pretty_assertions::assert_eq;

    fn entry(json: &str) -> Result<DocumentEntry, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn entry_shapes() {
        assert_eq!(entry("\"1rem\"").unwrap(), DocumentEntry::new("1rem"));
        assert_eq!(entry("700").unwrap(), DocumentEntry::new(700.0));
        assert_eq!(
            entry(r#"{"ref": "spacing.md"}"#).unwrap(),
            DocumentEntry::new(RawValue::reference("spacing.md"))
        );
        assert_eq!(
            entry(r#"{"value": 6, "unit": "px", "description": "Corner"}"#).unwrap(),
            DocumentEntry {
                value: RawValue::measured(6.0, "px"),
                description: Some("Corner".into()),
            }
        );
    }

    #[test]
    fn entry_shape_errors() {
        assert!(entry(r##"{"value": "#fff", "ref": "color.a"}"##).is_err());
        assert!(entry(r#"{"description": "nothing"}"#).is_err());
        assert!(entry(r#"{"value": "1rem", "unit": "px"}"#).is_err());
        assert!(entry(r#"{"value": 1, "colour": "red"}"#).is_err());
        assert!(entry("true").is_err());
    }

    #[test]
    fn keeps_declaration_order() {
        let doc: TokenDocument = serde_json::from_str(
            r##"{"spacing": {"spacing.xl": "2rem", "spacing.md": "1rem"}, "color": {"color.a": "#000"}}"##,
        )
        .unwrap();
        let names: Vec<&str> = doc.entries().map(|(_, name, _)| name).collect();
        assert_eq!(names, vec!["spacing.xl", "spacing.md", "color.a"]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn repeated_names_rejected() {
        let err = serde_json::from_str::<TokenDocument>(
            r##"{"color": {"color.a": "#111111", "color.a": "#222222"}}"##,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate key 'color.a'"));

        let repeated_group: Result<TokenDocument, _> =
            serde_json::from_str(r##"{"color": {"color.a": "#111"}, "color": {"color.b": "#222"}}"##);
        assert!(repeated_group.is_err());

        let repeated_theme: Result<TokenBundle, _> =
            serde_json::from_str(r#"{"base": {}, "themes": {"dark": {}, "dark": {}}}"#);
        assert!(repeated_theme.is_err());
    }

    #[test]
    fn unknown_category_rejected() {
        let result: Result<TokenDocument, _> = serde_json::from_str(r##"{"colour": {"a": "#000"}}"##);
        assert!(result.is_err());
    }

    #[test]
    fn bundle_builds_registry() {
        let mut base = TokenDocument::new();
        base.insert(Category::Color, "color.primary.500", DocumentEntry::new("#3b82f6"));
        base.insert(Category::Color, "color.button.bg", DocumentEntry::new("{color.primary.500}"));
        let mut dark = TokenDocument::new();
        dark.insert(Category::Color, "color.primary.500", DocumentEntry::new("#60a5fa"));

        let mut bundle = TokenBundle::new(base);
        bundle.themes.insert("dark".into(), dark);
        assert_eq!(bundle.entry_count(), 3);

        let registry = bundle.into_builder(RegistryConfig::default()).build().unwrap();
        assert_eq!(registry.resolve("color.button.bg", "dark").unwrap().to_string(), "#60a5fa");
    }

    #[test]
    fn theme_grouping_checked_against_base() {
        let mut base = TokenDocument::new();
        base.insert(Category::Spacing, "spacing.md", DocumentEntry::new("1rem"));
        let mut dense = TokenDocument::new();
        dense.insert(Category::Radius, "spacing.md", DocumentEntry::new("0.5rem"));

        let mut bundle = TokenBundle::new(base);
        bundle.themes.insert("dense".into(), dense);
        assert!(matches!(
            bundle.to_builder(RegistryConfig::default()).build().unwrap_err(),
            BuildError::OverrideCategoryMismatch { .. }
        ));
    }
}
