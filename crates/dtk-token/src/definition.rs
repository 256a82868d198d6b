//! Raw and typed token definitions
//!
//! [`RawValue`] is what a declarative source provides; [`TokenValue`] is the
//! validated form the registry stores: either a literal or a reference to
//! another token by name.

use crate::category::Category;
use crate::error::ValueError;
use crate::name::TokenName;
use crate::value::Literal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Unvalidated definition as written in a source document
///
/// Strings wrapped in braces (`"{color.primary.500}"`) are references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Literal text or `{alias}` reference
    Text(String),
    /// Bare number
    Number(f64),
    /// Explicit reference: `{ ref = "spacing.md" }`
    Reference {
        #[serde(rename = "ref")]
        target: String,
    },
    /// Number with explicit unit/kind: `{ value = 4, unit = "px" }`
    Measured {
        value: f64,
        #[serde(default)]
        unit: String,
    },
}

impl RawValue {
    /// Explicit reference to another token
    #[inline]
    #[must_use]
    pub fn reference(target: impl Into<String>) -> Self {
        Self::Reference {
            target: target.into(),
        }
    }

    /// Number with unit
    #[inline]
    #[must_use]
    pub fn measured(value: f64, unit: impl Into<String>) -> Self {
        Self::Measured {
            value,
            unit: unit.into(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for RawValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

/// Validated token value
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Concrete value
    Literal(Literal),
    /// Substitute the resolved value of another token
    Reference(TokenName),
}

impl TokenValue {
    /// Validate a raw definition against the owning token's category
    ///
    /// References are only checked for name syntax here; whether the target
    /// exists and shares the category is a registry-level check.
    ///
    /// # Errors
    /// Returns [`ValueError`] when the literal is malformed or not accepted by
    /// `category`, or when a reference names an invalid token.
    pub fn parse(raw: &RawValue, category: Category) -> Result<Self, ValueError> {
        match raw {
            RawValue::Text(text) => {
                let text = text.trim();
                match alias_target(text) {
                    Some(target) => Ok(Self::Reference(TokenName::parse(target)?)),
                    None => Ok(Self::Literal(Literal::parse(category, text)?)),
                }
            }
            RawValue::Number(n) => Ok(Self::Literal(Literal::from_number(category, *n)?)),
            RawValue::Reference { target } => {
                Ok(Self::Reference(TokenName::parse(target.trim())?))
            }
            RawValue::Measured { value, unit } => {
                Ok(Self::Literal(Literal::with_unit(category, *value, unit.trim())?))
            }
        }
    }

    /// Reference target, if this is a reference
    #[inline]
    #[must_use]
    pub fn reference(&self) -> Option<&TokenName> {
        match self {
            Self::Reference(target) => Some(target),
            Self::Literal(_) => None,
        }
    }

    /// Literal, if this is one
    #[inline]
    #[must_use]
    pub fn literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            Self::Reference(_) => None,
        }
    }

    /// Check if value is a reference
    #[inline]
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => lit.fmt(f),
            Self::Reference(target) => write!(f, "{{{target}}}"),
        }
    }
}

/// `{name}` → `name`
fn alias_target(text: &str) -> Option<&str> {
    text.strip_prefix('{')?.strip_suffix('}').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::NameError;
    use crate::value::{Color, Length};

    #[test]
    fn text_literal() {
        let value = TokenValue::parse(&"#3b82f6".into(), Category::Color).unwrap();
        assert_eq!(value, TokenValue::Literal(Literal::Color(Color::rgb(0x3b, 0x82, 0xf6))));
        assert!(!value.is_reference());
    }

    #[test]
    fn brace_alias_is_reference() {
        let value = TokenValue::parse(&"{color.primary.500}".into(), Category::Color).unwrap();
        assert_eq!(value.reference().unwrap().as_str(), "color.primary.500");
        assert_eq!(value.to_string(), "{color.primary.500}");
    }

    #[test]
    fn explicit_reference() {
        let value = TokenValue::parse(&RawValue::reference("spacing.md"), Category::Spacing).unwrap();
        assert!(value.is_reference());
        assert!(value.literal().is_none());
    }

    #[test]
    fn invalid_reference_name() {
        let err = TokenValue::parse(&"{color..500}".into(), Category::Color).unwrap_err();
        assert!(matches!(err, ValueError::InvalidReference(NameError::EmptySegment(_))));

        let err = TokenValue::parse(&RawValue::reference(""), Category::Color).unwrap_err();
        assert!(matches!(err, ValueError::InvalidReference(NameError::Empty)));
    }

    #[test]
    fn measured_value() {
        let value = TokenValue::parse(&RawValue::measured(8.0, "px"), Category::Radius).unwrap();
        assert_eq!(value.literal(), Some(&Literal::Length(Length::px(8.0))));
    }

    #[test]
    fn number_value() {
        let value = TokenValue::parse(&RawValue::from(400_i64), Category::TypographyWeight).unwrap();
        assert_eq!(value.literal(), Some(&Literal::Number(400.0)));
    }

    #[test]
    fn raw_value_deserializes_all_shapes() {
        let text: RawValue = serde_json::from_str("\"1rem\"").unwrap();
        assert_eq!(text, RawValue::Text("1rem".into()));

        let number: RawValue = serde_json::from_str("700").unwrap();
        assert_eq!(number, RawValue::Number(700.0));

        let reference: RawValue = serde_json::from_str(r#"{"ref": "spacing.md"}"#).unwrap();
        assert_eq!(reference, RawValue::reference("spacing.md"));

        let measured: RawValue = serde_json::from_str(r#"{"value": 4, "unit": "px"}"#).unwrap();
        assert_eq!(measured, RawValue::measured(4.0, "px"));

        let unitless: RawValue = serde_json::from_str(r#"{"value": 1.5}"#).unwrap();
        assert_eq!(unitless, RawValue::measured(1.5, ""));
    }
}
