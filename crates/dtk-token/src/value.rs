//! Literal value kinds
//!
//! Concrete, render-ready values a token can hold directly:
//! - [`Color`] (RGBA8)
//! - [`Length`] with its [`LengthUnit`]
//! - [`Duration`] in milliseconds
//! - unitless numbers and category keywords
//! - box shadows ([`ShadowLayer`]) and cubic-bezier easing curves
//!
//! Every kind displays as CSS text, which is the form handed to styling.

use crate::category::Category;
use crate::error::ValueError;
use serde::{Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// Concrete literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// RGBA color
    Color(Color),
    /// Length with unit
    Length(Length),
    /// Time span
    Duration(Duration),
    /// Unitless number (weights, line heights, z-index)
    Number(f64),
    /// Category keyword (`normal`, `auto`, `ease-in-out`, ...)
    Keyword(String),
    /// One or more shadow layers
    Shadow(Vec<ShadowLayer>),
    /// `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier([f64; 4]),
}

impl Literal {
    /// Parse literal text for a category
    ///
    /// # Errors
    /// Returns [`ValueError`] when the text is malformed or the resulting
    /// literal is not accepted by `category`.
    pub fn parse(category: Category, text: &str) -> Result<Self, ValueError> {
        let text = text.trim();

        let literal = if category.keywords().contains(&text) {
            Literal::Keyword(text.to_string())
        } else {
            match category {
                Category::Color => Literal::Color(Color::parse(text)?),
                Category::Spacing
                | Category::Radius
                | Category::Breakpoint
                | Category::TypographySize
                | Category::TypographyLetterSpacing => Literal::Length(Length::parse(text)?),
                Category::TypographyLineHeight => match text.parse::<f64>() {
                    Ok(n) => Literal::Number(n),
                    Err(_) => Literal::Length(Length::parse(text)?),
                },
                Category::TypographyWeight | Category::ZIndex => Literal::Number(
                    text.parse::<f64>()
                        .map_err(|_| ValueError::InvalidNumber(text.to_string()))?,
                ),
                Category::Shadow => Literal::Shadow(ShadowLayer::parse_list(text)?),
                Category::Duration => Literal::Duration(Duration::parse(text)?),
                Category::Easing => Literal::CubicBezier(parse_cubic_bezier(text)?),
            }
        };

        literal.check(category)
    }

    /// Build a literal from a bare number
    ///
    /// Only categories whose values are unitless take bare numbers. Lengths
    /// accept `0`; anything else needs an explicit unit.
    ///
    /// # Errors
    /// Returns [`ValueError::MissingUnit`] for non-zero lengths and durations.
    pub fn from_number(category: Category, n: f64) -> Result<Self, ValueError> {
        let literal = match category {
            Category::TypographyWeight | Category::TypographyLineHeight | Category::ZIndex => {
                Literal::Number(n)
            }
            Category::Spacing
            | Category::Radius
            | Category::Breakpoint
            | Category::TypographySize
            | Category::TypographyLetterSpacing
                if n == 0.0 =>
            {
                Literal::Length(Length::px(0.0))
            }
            _ => {
                return Err(ValueError::MissingUnit {
                    category,
                    value: n.to_string(),
                })
            }
        };

        literal.check(category)
    }

    /// Build a literal from a number with an explicit unit
    ///
    /// # Errors
    /// Returns [`ValueError::UnknownUnit`] for unrecognized units and
    /// [`ValueError::NotAccepted`] when the kind does not fit the category.
    pub fn with_unit(category: Category, value: f64, unit: &str) -> Result<Self, ValueError> {
        let literal = match unit {
            "" => Literal::Number(value),
            "ms" => Literal::Duration(Duration::from_millis(value)),
            "s" => Literal::Duration(Duration::from_millis(value * 1000.0)),
            other => Literal::Length(Length::new(value, LengthUnit::parse(other)?)),
        };

        literal.check(category)
    }

    /// Short name of the literal kind, for diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Color(_) => "color",
            Literal::Length(_) => "length",
            Literal::Duration(_) => "duration",
            Literal::Number(_) => "number",
            Literal::Keyword(_) => "keyword",
            Literal::Shadow(_) => "shadow",
            Literal::CubicBezier(_) => "cubic-bezier",
        }
    }

    /// Every numeric component is finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Literal::Color(_) | Literal::Keyword(_) => true,
            Literal::Length(l) => l.value.is_finite(),
            Literal::Duration(d) => d.as_millis().is_finite(),
            Literal::Number(n) => n.is_finite(),
            Literal::Shadow(layers) => layers.iter().all(ShadowLayer::is_finite),
            Literal::CubicBezier(points) => points.iter().all(|p| p.is_finite()),
        }
    }

    fn check(self, category: Category) -> Result<Self, ValueError> {
        if !self.is_finite() {
            return Err(ValueError::InvalidNumber(self.to_string()));
        }
        if category.accepts(&self) {
            Ok(self)
        } else {
            Err(ValueError::NotAccepted {
                category,
                kind: self.kind(),
                value: self.to_string(),
            })
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Color(c) => c.fmt(f),
            Literal::Length(l) => l.fmt(f),
            Literal::Duration(d) => d.fmt(f),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Keyword(k) => f.write_str(k),
            Literal::Shadow(layers) => {
                for (i, layer) in layers.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    layer.fmt(f)?;
                }
                Ok(())
            }
            Literal::CubicBezier([x1, y1, x2, y2]) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with alpha
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a 0.0..=1.0 fraction
    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()` or a
    /// basic keyword
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidColor`] for anything else.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let text = text.trim();
        let invalid = || ValueError::InvalidColor(text.to_string());

        match text.to_ascii_lowercase().as_str() {
            "transparent" => return Ok(Self::rgba(0, 0, 0, 0)),
            "black" => return Ok(Self::rgb(0, 0, 0)),
            "white" => return Ok(Self::rgb(255, 255, 255)),
            _ => {}
        }

        if let Some(hex) = text.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(invalid);
        }

        if let Some(args) = strip_function(text, "rgba").or_else(|| strip_function(text, "rgb")) {
            return Self::parse_rgb_args(args).ok_or_else(invalid);
        }

        Err(invalid())
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    fn parse_rgb_args(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }

        let channel = |s: &str| s.parse::<u8>().ok();
        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;

        let a = match parts.get(3) {
            None => 255,
            Some(alpha) => {
                let fraction = match alpha.strip_suffix('%') {
                    Some(pct) => pct.parse::<f64>().ok()? / 100.0,
                    None => alpha.parse::<f64>().ok()?,
                };
                if !(0.0..=1.0).contains(&fraction) {
                    return None;
                }
                // fraction is in 0..=1, so the product fits a u8
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let a = (fraction * 255.0).round() as u8;
                a
            }
        };

        Some(Self::rgba(r, g, b, a))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Length units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Px,
    Rem,
    Em,
    Percent,
    Vw,
    Vh,
    Pt,
}

impl LengthUnit {
    /// Parse a unit suffix
    ///
    /// # Errors
    /// Returns [`ValueError::UnknownUnit`] for unsupported suffixes.
    pub fn parse(unit: &str) -> Result<Self, ValueError> {
        match unit {
            "px" => Ok(LengthUnit::Px),
            "rem" => Ok(LengthUnit::Rem),
            "em" => Ok(LengthUnit::Em),
            "%" => Ok(LengthUnit::Percent),
            "vw" => Ok(LengthUnit::Vw),
            "vh" => Ok(LengthUnit::Vh),
            "pt" => Ok(LengthUnit::Pt),
            other => Err(ValueError::UnknownUnit(other.to_string())),
        }
    }

    /// CSS suffix
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Rem => "rem",
            LengthUnit::Em => "em",
            LengthUnit::Percent => "%",
            LengthUnit::Vw => "vw",
            LengthUnit::Vh => "vh",
            LengthUnit::Pt => "pt",
        }
    }
}

impl Display for LengthUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length with unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    /// Create length
    #[inline]
    #[must_use]
    pub const fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Pixel length
    #[inline]
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    /// Root-em length
    #[inline]
    #[must_use]
    pub const fn rem(value: f64) -> Self {
        Self::new(value, LengthUnit::Rem)
    }

    /// Parse `<number><unit>`; a bare `0` is `0px`
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidLength`] for malformed text and
    /// [`ValueError::UnknownUnit`] for unsupported units.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let text = text.trim();
        let (number, unit) = split_number(text);

        let value: f64 = number
            .parse()
            .map_err(|_| ValueError::InvalidLength(text.to_string()))?;

        if unit.is_empty() {
            return if value == 0.0 {
                Ok(Self::px(0.0))
            } else {
                Err(ValueError::InvalidLength(text.to_string()))
            };
        }

        Ok(Self::new(value, LengthUnit::parse(unit)?))
    }
}

impl Display for Length {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Time span in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    millis: f64,
}

impl Duration {
    /// Create from milliseconds
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: f64) -> Self {
        Self { millis }
    }

    /// Milliseconds
    #[inline]
    #[must_use]
    pub const fn as_millis(&self) -> f64 {
        self.millis
    }

    /// Parse `150ms` or `0.25s`
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidDuration`] for anything else.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let text = text.trim();
        let invalid = || ValueError::InvalidDuration(text.to_string());
        let (number, unit) = split_number(text);
        let value: f64 = number.parse().map_err(|_| invalid())?;

        match unit {
            "ms" => Ok(Self::from_millis(value)),
            "s" => Ok(Self::from_millis(value * 1000.0)),
            _ => Err(invalid()),
        }
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}

/// Single `box-shadow` layer
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLayer {
    pub inset: bool,
    pub offset_x: Length,
    pub offset_y: Length,
    pub blur: Option<Length>,
    pub spread: Option<Length>,
    pub color: Option<Color>,
}

impl ShadowLayer {
    fn is_finite(&self) -> bool {
        [Some(self.offset_x), Some(self.offset_y), self.blur, self.spread]
            .into_iter()
            .flatten()
            .all(|len| len.value.is_finite())
    }

    /// Parse a comma-separated list of layers
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidShadow`] if any layer is malformed.
    pub fn parse_list(text: &str) -> Result<Vec<Self>, ValueError> {
        let layers = split_top_level(text, ',')
            .into_iter()
            .map(Self::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if layers.is_empty() {
            return Err(ValueError::InvalidShadow(text.to_string()));
        }
        Ok(layers)
    }

    /// Parse `[inset] <x> <y> [blur] [spread]` with an optional color at
    /// either end of the lengths
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidShadow`] on malformed input.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidShadow(text.trim().to_string());

        let mut inset = false;
        let mut lengths = Vec::new();
        let mut color = None;
        let mut color_leads = false;

        for part in split_top_level(text, ' ') {
            if part == "inset" {
                inset = true;
            } else if let Ok(len) = Length::parse(part) {
                if (color.is_some() && !color_leads) || lengths.len() == 4 {
                    return Err(invalid());
                }
                lengths.push(len);
            } else if let Ok(c) = Color::parse(part) {
                if color.replace(c).is_some() {
                    return Err(invalid());
                }
                color_leads = lengths.is_empty();
            } else {
                return Err(invalid());
            }
        }

        if lengths.len() < 2 {
            return Err(invalid());
        }

        Ok(Self {
            inset,
            offset_x: lengths[0],
            offset_y: lengths[1],
            blur: lengths.get(2).copied(),
            spread: lengths.get(3).copied(),
            color,
        })
    }
}

impl Display for ShadowLayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.inset {
            f.write_str("inset ")?;
        }
        write!(f, "{} {}", self.offset_x, self.offset_y)?;
        if let Some(blur) = &self.blur {
            write!(f, " {blur}")?;
        }
        if let Some(spread) = &self.spread {
            write!(f, " {spread}")?;
        }
        if let Some(color) = &self.color {
            write!(f, " {color}")?;
        }
        Ok(())
    }
}

fn parse_cubic_bezier(text: &str) -> Result<[f64; 4], ValueError> {
    let invalid = || ValueError::InvalidEasing(text.to_string());
    let args = strip_function(text, "cubic-bezier").ok_or_else(invalid)?;

    let points = args
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    match points.as_slice() {
        [x1, y1, x2, y2] if (0.0..=1.0).contains(x1) && (0.0..=1.0).contains(x2) => {
            Ok([*x1, *y1, *x2, *y2])
        }
        _ => Err(invalid()),
    }
}

/// `name(args)` → `args`
fn strip_function<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Split leading numeric part from unit suffix (`1.5rem` → `("1.5", "rem")`)
fn split_number(text: &str) -> (&str, &str) {
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(text.len(), |(i, _)| i);
    text.split_at(end)
}

/// Split on `sep` outside parentheses, dropping empty pieces
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());

    parts.retain(|p| !p.is_empty());
    parts
}
