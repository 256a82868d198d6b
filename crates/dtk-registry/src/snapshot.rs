//! Resolved values and flattened theme snapshots
//!
//! A [`ThemeSnapshot`] is the hand-off format for styling: every base token
//! mapped to its concrete value under one theme, rendered as JSON or as a
//! block of CSS custom properties.

use crate::theme::ThemeName;
use dtk_token::{Category, Literal, TokenName};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter, Write as _};

/// Concrete value tagged with its category
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteValue {
    category: Category,
    literal: Literal,
}

impl ConcreteValue {
    /// Create tagged value
    #[inline]
    #[must_use]
    pub fn new(category: Category, literal: Literal) -> Self {
        Self { category, literal }
    }

    /// Category of the token that produced this value
    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Underlying literal
    #[inline]
    #[must_use]
    pub fn literal(&self) -> &Literal {
        &self.literal
    }
}

impl Display for ConcreteValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.literal.fmt(f)
    }
}

impl Serialize for ConcreteValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.literal)
    }
}

/// Every base token resolved under one theme
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSnapshot {
    theme: ThemeName,
    values: BTreeMap<TokenName, ConcreteValue>,
}

impl ThemeSnapshot {
    pub(crate) fn new(theme: ThemeName, values: BTreeMap<TokenName, ConcreteValue>) -> Self {
        Self { theme, values }
    }

    /// Theme this snapshot was resolved under
    #[inline]
    #[must_use]
    pub fn theme(&self) -> &ThemeName {
        &self.theme
    }

    /// Resolved value for a token
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConcreteValue> {
        self.values.get(name)
    }

    /// Number of tokens
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in name order
    pub fn iter(&self) -> impl Iterator<Item = (&TokenName, &ConcreteValue)> {
        self.values.iter()
    }

    /// Names whose value differs from `other` (or is absent there), sorted
    #[must_use]
    pub fn diff<'a>(&'a self, other: &ThemeSnapshot) -> Vec<&'a TokenName> {
        self.values
            .iter()
            .filter(|(name, value)| other.values.get(*name) != Some(*value))
            .map(|(name, _)| name)
            .collect()
    }

    /// Render all values as a CSS custom-property block
    ///
    /// ```text
    /// :root {
    ///   --color-primary-500: #3b82f6;
    /// }
    /// ```
    #[must_use]
    pub fn to_css(&self, selector: &str, prefix: Option<&str>) -> String {
        render_css(selector, prefix, self.values.iter())
    }

    /// Render only the values that differ from `base`
    #[must_use]
    pub fn to_css_overrides(&self, base: &ThemeSnapshot, selector: &str, prefix: Option<&str>) -> String {
        let changed = self
            .values
            .iter()
            .filter(|(name, value)| base.values.get(*name) != Some(*value));
        render_css(selector, prefix, changed)
    }
}

impl Serialize for ThemeSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.theme, &self.values)?;
        map.end()
    }
}

impl<'a> IntoIterator for &'a ThemeSnapshot {
    type Item = (&'a TokenName, &'a ConcreteValue);
    type IntoIter = std::collections::btree_map::Iter<'a, TokenName, ConcreteValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn render_css<'a>(
    selector: &str,
    prefix: Option<&str>,
    values: impl Iterator<Item = (&'a TokenName, &'a ConcreteValue)>,
) -> String {
    let mut css = format!("{selector} {{\n");
    for (name, value) in values {
        // Writing to a String cannot fail
        let _ = writeln!(css, "  {}: {};", name.to_css_var(prefix), value);
    }
    css.push_str("}\n");
    css
}
