//! Testing utilities for DTK workspace
//!
//! Shared fixtures: ready-made builders, registries, and source documents.

#![allow(missing_docs)]

use dtk_registry::{RegistryBuilder, TokenRegistry};
use dtk_token::{Category, RawValue, TokenName};

/// Base palette with a `dark` theme
///
/// - `color.primary.500 = #3b82f6`, dark `#60a5fa`
/// - `color.button.bg -> color.primary.500`
/// - `spacing.md = 1rem`, `spacing.lg -> spacing.md`
pub fn palette_builder() -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();
    builder
        .token("color.primary.500", Category::Color, "#3b82f6")
        .describe("Brand blue")
        .token("color.button.bg", Category::Color, RawValue::reference("color.primary.500"))
        .token("color.surface", Category::Color, "#ffffff")
        .token("spacing.md", Category::Spacing, "1rem")
        .token("spacing.lg", Category::Spacing, RawValue::reference("spacing.md"))
        .token("radius.md", Category::Radius, RawValue::measured(6.0, "px"))
        .token("typography.weight.bold", Category::TypographyWeight, 700_i64)
        .token("duration.fast", Category::Duration, "150ms")
        .token("easing.standard", Category::Easing, "cubic-bezier(0.4, 0, 0.2, 1)")
        .token("shadow.sm", Category::Shadow, "0 1px 2px rgba(0, 0, 0, 0.05)")
        .token("z-index.modal", Category::ZIndex, 1000_i64)
        .override_token("dark", "color.primary.500", "#60a5fa")
        .override_token("dark", "color.surface", "#111827");
    builder
}

pub fn palette_registry() -> TokenRegistry {
    palette_builder().build().unwrap()
}

/// `spacing.chain.0 -> spacing.chain.1 -> ... -> spacing.chain.{len}` (literal `4px`)
pub fn chain_builder(len: usize) -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();
    for i in 0..len {
        builder.token(
            format!("spacing.chain.{i}"),
            Category::Spacing,
            format!("{{spacing.chain.{}}}", i + 1),
        );
    }
    builder.token(format!("spacing.chain.{len}"), Category::Spacing, "4px");
    builder
}

pub fn token_name(s: &str) -> TokenName {
    TokenName::parse(s).unwrap()
}

/// Base document grouped by category
pub const TOKENS_YAML: &str = r##"
color:
  color.primary.500: "#3b82f6"
  color.button.bg: "{color.primary.500}"
  color.text:
    value: "#111827"
    description: Body text
spacing:
  spacing.md: 1rem
  spacing.lg:
    ref: spacing.md
radius:
  radius.md:
    value: 6
    unit: px
typography-weight:
  typography.weight.bold: 700
"##;

/// `dark` theme overrides for [`TOKENS_YAML`]
pub const DARK_YAML: &str = r##"
color:
  color.primary.500: "#60a5fa"
  color.text: "#f9fafb"
"##;

/// Single-file bundle with base and themes
pub const BUNDLE_JSON: &str = r##"{
  "base": {
    "color": {
      "color.primary.500": "#3b82f6",
      "color.button.bg": "{color.primary.500}"
    },
    "spacing": {
      "spacing.md": "1rem",
      "spacing.lg": { "ref": "spacing.md" }
    }
  },
  "themes": {
    "dark": {
      "color": { "color.primary.500": "#60a5fa" }
    }
  }
}"##;

/// Same bundle as [`BUNDLE_JSON`] in TOML
pub const BUNDLE_TOML: &str = r##"
[base.color]
"color.primary.500" = "#3b82f6"
"color.button.bg" = "{color.primary.500}"

[base.spacing]
"spacing.md" = "1rem"
"spacing.lg" = { ref = "spacing.md" }

[themes.dark.color]
"color.primary.500" = "#60a5fa"
"##;
