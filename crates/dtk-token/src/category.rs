//! Token categories
//!
//! Every token belongs to exactly one [`Category`], fixed at creation. The
//! category decides which literal kinds are valid and which tokens a
//! reference may point at.

use crate::value::Literal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Value kind a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Colors (`#3b82f6`, `rgba(...)`)
    Color,
    /// Spacing scale
    Spacing,
    /// Font sizes
    TypographySize,
    /// Font weights
    TypographyWeight,
    /// Line heights
    TypographyLineHeight,
    /// Letter spacing
    TypographyLetterSpacing,
    /// Border radii
    Radius,
    /// Box shadows
    Shadow,
    /// Animation / transition durations
    Duration,
    /// Timing functions
    Easing,
    /// Responsive breakpoints
    Breakpoint,
    /// Stacking order
    ZIndex,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 12] = [
        Category::Color,
        Category::Spacing,
        Category::TypographySize,
        Category::TypographyWeight,
        Category::TypographyLineHeight,
        Category::TypographyLetterSpacing,
        Category::Radius,
        Category::Shadow,
        Category::Duration,
        Category::Easing,
        Category::Breakpoint,
        Category::ZIndex,
    ];

    /// Kebab-case name used in documents
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Spacing => "spacing",
            Category::TypographySize => "typography-size",
            Category::TypographyWeight => "typography-weight",
            Category::TypographyLineHeight => "typography-line-height",
            Category::TypographyLetterSpacing => "typography-letter-spacing",
            Category::Radius => "radius",
            Category::Shadow => "shadow",
            Category::Duration => "duration",
            Category::Easing => "easing",
            Category::Breakpoint => "breakpoint",
            Category::ZIndex => "z-index",
        }
    }

    /// Keywords accepted as literal values for this category
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::TypographyWeight => &["normal", "bold", "lighter", "bolder"],
            Category::TypographyLineHeight | Category::TypographyLetterSpacing => &["normal"],
            Category::Shadow => &["none"],
            Category::Easing => &[
                "linear",
                "ease",
                "ease-in",
                "ease-out",
                "ease-in-out",
                "step-start",
                "step-end",
            ],
            Category::ZIndex => &["auto"],
            _ => &[],
        }
    }

    /// Check whether a literal is a valid value for this category
    #[must_use]
    pub fn accepts(self, literal: &Literal) -> bool {
        match (self, literal) {
            (_, Literal::Keyword(k)) => self.keywords().contains(&k.as_str()),
            (Category::Color, Literal::Color(_)) => true,
            (
                Category::Spacing
                | Category::Radius
                | Category::Breakpoint
                | Category::TypographySize
                | Category::TypographyLetterSpacing
                | Category::TypographyLineHeight,
                Literal::Length(_),
            ) => true,
            (Category::TypographyLineHeight, Literal::Number(n)) => *n >= 0.0,
            (Category::TypographyWeight, Literal::Number(n)) => (1.0..=1000.0).contains(n),
            (Category::ZIndex, Literal::Number(n)) => n.fract() == 0.0,
            (Category::Shadow, Literal::Shadow(_)) => true,
            (Category::Duration, Literal::Duration(_)) => true,
            (Category::Easing, Literal::CubicBezier(_)) => true,
            _ => false,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Category name not in the fixed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token category: '{0}'")]
pub struct UnknownCategory(pub String);
