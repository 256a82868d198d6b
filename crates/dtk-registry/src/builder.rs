//! Registry construction
//!
//! [`RegistryBuilder`] collects raw definitions (the *Unvalidated* state)
//! and [`RegistryBuilder::build`] validates everything eagerly before
//! producing an immutable [`TokenRegistry`]. Validation order:
//!
//! 1. configuration
//! 2. token names and duplicates
//! 3. theme names
//! 4. base values
//! 5. theme overrides (target exists, no duplicates, category agrees, value)
//! 6. reference targets and category compatibility
//! 7. reference cycles, base first then each theme in name order
//! 8. chain depth against `max_depth`
//!
//! Each step walks its inputs in sorted order, so the first error reported
//! for a given input is always the same.

use crate::config::RegistryConfig;
use crate::error::BuildError;
use crate::registry::{ThemeLayer, TokenEntry, TokenRegistry};
use crate::theme::ThemeName;
use dtk_token::{Category, RawValue, TokenName, TokenValue};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct PendingToken {
    name: String,
    category: Category,
    raw: RawValue,
    description: Option<String>,
}

#[derive(Debug, Clone)]
struct PendingOverride {
    name: String,
    category: Option<Category>,
    raw: RawValue,
}

#[derive(Debug, Clone)]
struct PendingTheme {
    name: String,
    overrides: Vec<PendingOverride>,
}

/// Builder for [`TokenRegistry`]
///
/// ```rust
/// use dtk_registry::RegistryBuilder;
/// use dtk_token::Category;
///
/// let mut builder = RegistryBuilder::new();
/// builder
///     .token("color.primary.500", Category::Color, "#3b82f6")
///     .token("color.button.bg", Category::Color, "{color.primary.500}")
///     .override_token("dark", "color.primary.500", "#60a5fa");
///
/// let registry = builder.build().unwrap();
/// assert_eq!(registry.resolve("color.button.bg", "dark").unwrap().to_string(), "#60a5fa");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    tokens: Vec<PendingToken>,
    themes: Vec<PendingTheme>,
}

impl RegistryBuilder {
    /// Create an empty builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with custom configuration
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace configuration
    pub fn config(&mut self, config: RegistryConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Define a base-layer token
    pub fn token(
        &mut self,
        name: impl Into<String>,
        category: Category,
        raw: impl Into<RawValue>,
    ) -> &mut Self {
        self.tokens.push(PendingToken {
            name: name.into(),
            category,
            raw: raw.into(),
            description: None,
        });
        self
    }

    /// Document the most recently defined token
    pub fn describe(&mut self, text: impl Into<String>) -> &mut Self {
        match self.tokens.last_mut() {
            Some(token) => token.description = Some(text.into()),
            None => warn!("description given before any token; ignored"),
        }
        self
    }

    /// Declare a theme layer, possibly without overrides
    ///
    /// Declaring the same theme twice is reported by [`build`](Self::build).
    pub fn theme(&mut self, name: impl Into<String>) -> &mut Self {
        self.themes.push(PendingTheme {
            name: name.into(),
            overrides: Vec::new(),
        });
        self
    }

    /// Override a base token within a theme, declaring the theme if needed
    pub fn override_token(
        &mut self,
        theme: &str,
        name: impl Into<String>,
        raw: impl Into<RawValue>,
    ) -> &mut Self {
        self.push_override(theme, name.into(), None, raw.into())
    }

    /// Override a base token, asserting its category
    ///
    /// Used by declarative sources that group overrides by category; the
    /// declared category must match the base token's.
    pub fn override_token_in(
        &mut self,
        theme: &str,
        name: impl Into<String>,
        category: Category,
        raw: impl Into<RawValue>,
    ) -> &mut Self {
        self.push_override(theme, name.into(), Some(category), raw.into())
    }

    /// Number of base tokens defined so far
    #[inline]
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Number of theme layers declared so far
    #[inline]
    #[must_use]
    pub fn theme_count(&self) -> usize {
        self.themes.len()
    }

    fn push_override(
        &mut self,
        theme: &str,
        name: String,
        category: Option<Category>,
        raw: RawValue,
    ) -> &mut Self {
        let pending = PendingOverride { name, category, raw };
        match self.themes.iter_mut().rev().find(|t| t.name == theme) {
            Some(layer) => layer.overrides.push(pending),
            None => self.themes.push(PendingTheme {
                name: theme.to_string(),
                overrides: vec![pending],
            }),
        }
        self
    }

    /// Validate and produce an immutable registry
    ///
    /// # Errors
    /// Returns the first [`BuildError`] found; no registry is produced.
    pub fn build(&self) -> Result<TokenRegistry, BuildError> {
        debug!(
            tokens = self.token_count(),
            themes = self.theme_count(),
            "validating token definitions"
        );
        self.config.validate()?;

        let tokens = self.validate_tokens()?;
        let index: HashMap<&str, usize> = tokens
            .iter()
            .enumerate()
            .map(|(id, (name, _))| (name.as_str(), id))
            .collect();

        let theme_names = self.validate_theme_names()?;

        let mut entries = Vec::with_capacity(tokens.len());
        for (name, pending) in &tokens {
            let value = TokenValue::parse(&pending.raw, pending.category).map_err(|source| {
                BuildError::InvalidValue {
                    token: name.clone(),
                    theme: ThemeName::DEFAULT.to_string(),
                    source,
                }
            })?;
            debug!(token = %name, category = %pending.category, "token defined");
            entries.push(TokenEntry {
                name: name.clone(),
                category: pending.category,
                value,
                description: pending.description.clone(),
            });
        }

        let mut layers = vec![ThemeLayer::new(ThemeName::base())];
        for (theme, pending) in theme_names {
            layers.push(validate_overrides(theme, pending, &entries, &index)?);
        }

        for layer in &layers {
            check_references(layer, &entries, &index)?;
        }

        let registry = TokenRegistry::assemble(self.config, entries, layers);
        registry.check_acyclic()?;
        registry.check_depth()?;

        info!(
            tokens = registry.len(),
            themes = registry.themes().len(),
            "token registry built"
        );
        Ok(registry)
    }

    /// Parse names, sort, reject duplicates
    fn validate_tokens(&self) -> Result<Vec<(TokenName, &PendingToken)>, BuildError> {
        let mut tokens = Vec::with_capacity(self.tokens.len());
        for pending in &self.tokens {
            tokens.push((TokenName::parse(&pending.name)?, pending));
        }
        tokens.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = tokens.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(BuildError::DuplicateToken(pair[0].0.clone()));
        }
        Ok(tokens)
    }

    /// Parse theme names, sort, reject duplicates
    fn validate_theme_names(&self) -> Result<Vec<(ThemeName, &PendingTheme)>, BuildError> {
        let mut seen = HashSet::new();
        let mut themes = Vec::with_capacity(self.themes.len());
        for pending in &self.themes {
            let theme = ThemeName::parse(&pending.name).map_err(|reason| BuildError::InvalidTheme {
                theme: pending.name.clone(),
                reason,
            })?;
            if !seen.insert(pending.name.as_str()) {
                return Err(BuildError::DuplicateTheme(pending.name.clone()));
            }
            themes.push((theme, pending));
        }
        themes.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(themes)
    }
}

fn validate_overrides(
    theme: ThemeName,
    pending: &PendingTheme,
    entries: &[TokenEntry],
    index: &HashMap<&str, usize>,
) -> Result<ThemeLayer, BuildError> {
    let mut sorted: Vec<&PendingOverride> = pending.overrides.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut layer = ThemeLayer::new(theme);
    for ov in sorted {
        let Some(&id) = index.get(ov.name.as_str()) else {
            return Err(BuildError::UnknownOverrideTarget {
                theme: layer.name.to_string(),
                token: ov.name.clone(),
            });
        };
        let entry = &entries[id];
        if layer.overrides.contains_key(&id) {
            return Err(BuildError::DuplicateOverride {
                theme: layer.name.to_string(),
                token: entry.name.clone(),
            });
        }
        if let Some(declared) = ov.category {
            if declared != entry.category {
                return Err(BuildError::OverrideCategoryMismatch {
                    theme: layer.name.to_string(),
                    token: entry.name.clone(),
                    declared,
                    expected: entry.category,
                });
            }
        }
        let value = TokenValue::parse(&ov.raw, entry.category).map_err(|source| {
            BuildError::InvalidValue {
                token: entry.name.clone(),
                theme: layer.name.to_string(),
                source,
            }
        })?;
        debug!(theme = %layer.name, token = %entry.name, "override defined");
        layer.overrides.insert(id, value);
    }
    Ok(layer)
}

/// Every reference a layer introduces must name a base token of the same category
///
/// The base layer checks base values; a theme layer checks only its overrides.
fn check_references(
    layer: &ThemeLayer,
    entries: &[TokenEntry],
    index: &HashMap<&str, usize>,
) -> Result<(), BuildError> {
    let values: Vec<(usize, &TokenValue)> = if layer.name.is_base() {
        entries.iter().map(|e| &e.value).enumerate().collect()
    } else {
        let mut overrides: Vec<(usize, &TokenValue)> =
            layer.overrides.iter().map(|(id, v)| (*id, v)).collect();
        overrides.sort_by_key(|(id, _)| *id);
        overrides
    };

    for (id, value) in values {
        let Some(target) = value.reference() else {
            continue;
        };
        let entry = &entries[id];
        let Some(&target_id) = index.get(target.as_str()) else {
            return Err(BuildError::UnknownReference {
                token: entry.name.clone(),
                target: target.clone(),
                theme: layer.name.to_string(),
            });
        };
        let target_category = entries[target_id].category;
        if target_category != entry.category {
            return Err(BuildError::CategoryMismatch {
                token: entry.name.clone(),
                category: entry.category,
                target: target.clone(),
                target_category,
                theme: layer.name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtk_token::NameError;

    fn palette() -> RegistryBuilder {
        let mut builder = RegistryBuilder::new();
        builder
            .token("color.primary.500", Category::Color, "#3b82f6")
            .token("color.button.bg", Category::Color, "{color.primary.500}")
            .token("spacing.md", Category::Spacing, "1rem")
            .token("spacing.lg", Category::Spacing, RawValue::reference("spacing.md"));
        builder
    }

    #[test]
    fn builds_valid_registry() {
        let mut builder = palette();
        builder.override_token("dark", "color.primary.500", "#60a5fa");
        let registry = builder.build().unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.themes().len(), 2);
    }

    #[test]
    fn duplicate_token() {
        let mut builder = palette();
        builder.token("spacing.md", Category::Spacing, "2rem");
        let err = builder.build().unwrap_err();
        assert_eq!(err, BuildError::DuplicateToken(TokenName::parse("spacing.md").unwrap()));
    }

    #[test]
    fn invalid_token_name() {
        let mut builder = palette();
        builder.token("spacing..xl", Category::Spacing, "2rem");
        let err = builder.build().unwrap_err();
        assert!(matches!(err, BuildError::InvalidName(NameError::EmptySegment(_))));
    }

    #[test]
    fn reserved_theme_name() {
        let mut builder = palette();
        builder.theme("default");
        assert!(matches!(builder.build().unwrap_err(), BuildError::InvalidTheme { .. }));
    }

    #[test]
    fn duplicate_theme() {
        let mut builder = palette();
        builder.theme("dark").theme("dark");
        assert_eq!(builder.build().unwrap_err(), BuildError::DuplicateTheme("dark".into()));
    }

    #[test]
    fn override_joins_existing_theme() {
        let mut builder = palette();
        builder
            .theme("dark")
            .override_token("dark", "spacing.md", "2rem")
            .override_token("dark", "color.primary.500", "#60a5fa");
        assert_eq!(builder.theme_count(), 1);
        assert_eq!(builder.token_count(), palette().token_count());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn duplicate_override() {
        let mut builder = palette();
        builder
            .override_token("dark", "spacing.md", "2rem")
            .override_token("dark", "spacing.md", "3rem");
        assert!(matches!(
            builder.build().unwrap_err(),
            BuildError::DuplicateOverride { theme, .. } if theme == "dark"
        ));
    }

    #[test]
    fn override_category_mismatch() {
        let mut builder = palette();
        builder.override_token_in("dark", "spacing.md", Category::Radius, "2rem");
        assert!(matches!(
            builder.build().unwrap_err(),
            BuildError::OverrideCategoryMismatch { declared: Category::Radius, expected: Category::Spacing, .. }
        ));
    }

    #[test]
    fn invalid_value_names_token_and_theme() {
        let mut builder = palette();
        builder.override_token("dark", "spacing.md", "#ffffff");
        match builder.build().unwrap_err() {
            BuildError::InvalidValue { token, theme, .. } => {
                assert_eq!(token.as_str(), "spacing.md");
                assert_eq!(theme, "dark");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_reference() {
        let mut builder = palette();
        builder.token("color.link", Category::Color, "{color.accent}");
        assert!(matches!(
            builder.build().unwrap_err(),
            BuildError::UnknownReference { target, .. } if target.as_str() == "color.accent"
        ));
    }

    #[test]
    fn config_checked_first() {
        let mut builder = palette();
        builder
            .config(RegistryConfig::default().with_max_depth(0))
            .token("spacing.md", Category::Spacing, "2rem");
        assert!(matches!(builder.build().unwrap_err(), BuildError::InvalidConfig(_)));
    }

    #[test]
    fn chain_deeper_than_limit() {
        let mut builder = RegistryBuilder::with_config(RegistryConfig::default().with_max_depth(2));
        builder
            .token("spacing.a", Category::Spacing, "{spacing.b}")
            .token("spacing.b", Category::Spacing, "{spacing.c}")
            .token("spacing.c", Category::Spacing, "{spacing.d}")
            .token("spacing.d", Category::Spacing, "4px");
        match builder.build().unwrap_err() {
            BuildError::ChainTooDeep { token, depth, max_depth, .. } => {
                assert_eq!(token.as_str(), "spacing.a");
                assert_eq!(depth, 3);
                assert_eq!(max_depth, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn descriptions_attach_to_last_token() {
        let mut builder = palette();
        builder
            .token("radius.md", Category::Radius, "6px")
            .describe("Default corner radius");
        let registry = builder.build().unwrap();
        assert_eq!(registry.description("radius.md"), Some("Default corner radius"));
        assert_eq!(registry.description("spacing.md"), None);
    }
}
