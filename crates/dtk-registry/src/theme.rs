//! Theme layer names

use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Name of a theme layer
///
/// [`ThemeName::DEFAULT`] names the base layer; every other theme is a
/// partial override set applied on top of it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ThemeName(String);

impl ThemeName {
    /// Sentinel naming the base layer
    pub const DEFAULT: &'static str = "default";

    /// Validate a theme name for a declared override layer
    ///
    /// # Errors
    /// Returns a human-readable reason when the name is empty, contains
    /// characters outside `[A-Za-z0-9_-]`, or is the reserved base name.
    pub fn parse(name: &str) -> Result<Self, String> {
        if name.is_empty() {
            return Err("theme name is empty".to_string());
        }
        if name == Self::DEFAULT {
            return Err(format!("'{}' names the base layer", Self::DEFAULT));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(format!("character '{c}' not allowed"));
        }
        Ok(Self(name.to_string()))
    }

    /// The base layer
    #[inline]
    #[must_use]
    pub fn base() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    /// Get as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this names the base layer
    #[inline]
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Display for ThemeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ThemeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ThemeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
