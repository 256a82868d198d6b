//! Token names
//!
//! Provides [`TokenName`], the dot-separated identifier every design token
//! is registered under (`category.subcategory.step`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Namespaced, case-sensitive token identifier
///
/// Names are stored in their dotted string form so that ordering and hashing
/// follow the exact text the author wrote.
///
/// # Examples
/// - `color.primary.500`
/// - `typography.size.body-lg`
/// - `z-index.modal`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenName(String);

impl TokenName {
    /// Parse and validate a dotted token name
    ///
    /// # Errors
    /// Returns [`NameError`] if the name is empty, has an empty segment, or a
    /// segment contains characters other than ASCII alphanumerics, `_` or `-`.
    pub fn parse(s: &str) -> Result<Self, NameError> {
        if s.is_empty() {
            return Err(NameError::Empty);
        }

        for segment in s.split('.') {
            if segment.is_empty() {
                return Err(NameError::EmptySegment(s.to_string()));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(NameError::InvalidSegment {
                    name: s.to_string(),
                    segment: segment.to_string(),
                });
            }
        }

        Ok(Self(s.to_string()))
    }

    /// Full dotted form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterator over segments from namespace to leaf
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// First segment (`color` in `color.primary.500`)
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Last segment (`500` in `color.primary.500`)
    #[inline]
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Parent name, `None` for single-segment names
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.rfind('.').map(|idx| Self(self.0[..idx].to_string()))
    }

    /// Check if this name is a strict dotted prefix of another
    #[must_use]
    pub fn is_ancestor_of(&self, other: &TokenName) -> bool {
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0.as_bytes()[self.0.len()] == b'.'
    }

    /// CSS custom property name (`--ds-color-primary-500` for prefix `ds`)
    #[must_use]
    pub fn to_css_var(&self, prefix: Option<&str>) -> String {
        let body = self.0.replace(&['.', '_'][..], "-");
        match prefix {
            Some(p) if !p.is_empty() => format!("--{p}-{body}"),
            _ => format!("--{body}"),
        }
    }
}

impl Display for TokenName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TokenName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for TokenName {
    type Error = NameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for TokenName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for TokenName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for TokenName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Errors related to token names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Name is the empty string
    #[error("token name cannot be empty")]
    Empty,

    /// Empty segment (`color..500`, leading or trailing dot)
    #[error("token name '{0}' contains an empty segment")]
    EmptySegment(String),

    /// Segment with disallowed characters
    #[error("invalid segment '{segment}' in token name '{name}' (must be alphanumeric, '_' or '-')")]
    InvalidSegment { name: String, segment: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> TokenName {
        TokenName::parse(s).unwrap()
    }

    #[test]
    fn name_parse_valid() {
        let n = name("color.primary.500");
        assert_eq!(n.as_str(), "color.primary.500");
        assert_eq!(n.segments().collect::<Vec<_>>(), vec!["color", "primary", "500"]);
        assert_eq!(n.depth(), 3);
    }

    #[test]
    fn name_allows_dashes_and_underscores() {
        assert!(TokenName::parse("z-index.modal").is_ok());
        assert!(TokenName::parse("typography.size.body_lg").is_ok());
    }

    #[test]
    fn name_rejects_empty() {
        assert_eq!(TokenName::parse(""), Err(NameError::Empty));
    }

    #[test]
    fn name_rejects_empty_segment() {
        assert!(matches!(TokenName::parse("color..500"), Err(NameError::EmptySegment(_))));
        assert!(matches!(TokenName::parse(".color"), Err(NameError::EmptySegment(_))));
        assert!(matches!(TokenName::parse("color."), Err(NameError::EmptySegment(_))));
    }

    #[test]
    fn name_rejects_invalid_chars() {
        let result = TokenName::parse("color.primary 500");
        assert!(matches!(result, Err(NameError::InvalidSegment { .. })));
        assert!(TokenName::parse("{color.primary}").is_err());
    }

    #[test]
    fn name_is_case_sensitive() {
        assert_ne!(name("color.Primary"), name("color.primary"));
    }

    #[test]
    fn name_namespace_and_leaf() {
        let n = name("color.primary.500");
        assert_eq!(n.namespace(), "color");
        assert_eq!(n.leaf(), "500");

        let single = name("gutter");
        assert_eq!(single.namespace(), "gutter");
        assert_eq!(single.leaf(), "gutter");
    }

    #[test]
    fn name_parent() {
        assert_eq!(name("color.primary.500").parent(), Some(name("color.primary")));
        assert_eq!(name("color").parent(), None);
    }

    #[test]
    fn name_ancestor_detection() {
        let parent = name("color.primary");
        assert!(parent.is_ancestor_of(&name("color.primary.500")));
        assert!(!parent.is_ancestor_of(&name("color.primary")));
        assert!(!parent.is_ancestor_of(&name("color.primary-dark.500")));
    }

    #[test]
    fn name_css_var() {
        let n = name("color.primary.500");
        assert_eq!(n.to_css_var(None), "--color-primary-500");
        assert_eq!(n.to_css_var(Some("ds")), "--ds-color-primary-500");
        assert_eq!(name("font.body_lg").to_css_var(Some("")), "--font-body-lg");
    }

    #[test]
    fn name_orders_lexicographically() {
        let mut names = vec![name("spacing.md"), name("color.primary.500"), name("color.button.bg")];
        names.sort();
        let sorted: Vec<_> = names.iter().map(TokenName::as_str).collect();
        assert_eq!(sorted, vec!["color.button.bg", "color.primary.500", "spacing.md"]);
    }

    #[test]
    fn name_serde_as_string() {
        let n = name("spacing.md");
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"spacing.md\"");

        let back: TokenName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);

        let bad: Result<TokenName, _> = serde_json::from_str("\"a..b\"");
        assert!(bad.is_err());
    }
}
