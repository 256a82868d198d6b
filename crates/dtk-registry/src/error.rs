//! Error types for the token registry
//!
//! Two families:
//! - [`BuildError`]: structural problems found while constructing a registry.
//!   Construction fails atomically; a broken registry is never published.
//! - [`ResolveError`]: caller mistakes at query time (unknown token or
//!   theme), plus defensive checks that a validated registry never hits.

use dtk_token::{Category, NameError, TokenName, ValueError};

/// Errors during registry construction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// Configuration rejected
    #[error("invalid registry config: {0}")]
    InvalidConfig(String),

    /// Token name failed syntax validation
    #[error("invalid token name: {0}")]
    InvalidName(#[from] NameError),

    /// Base layer defines the same name twice
    #[error("duplicate token: '{0}'")]
    DuplicateToken(TokenName),

    /// Theme name reserved or malformed
    #[error("invalid theme '{theme}': {reason}")]
    InvalidTheme { theme: String, reason: String },

    /// Theme layer declared twice
    #[error("duplicate theme: '{0}'")]
    DuplicateTheme(String),

    /// Theme overrides the same token twice
    #[error("theme '{theme}' overrides '{token}' more than once")]
    DuplicateOverride { theme: String, token: TokenName },

    /// Raw definition could not be parsed for the token's category
    #[error("invalid value for '{token}' in theme '{theme}': {source}")]
    InvalidValue {
        token: TokenName,
        theme: String,
        #[source]
        source: ValueError,
    },

    /// Theme overrides a name the base layer does not define
    #[error("theme '{theme}' overrides unknown token '{token}'")]
    UnknownOverrideTarget { theme: String, token: String },

    /// Reference to a name the base layer does not define
    #[error("'{token}' references unknown token '{target}' in theme '{theme}'")]
    UnknownReference {
        token: TokenName,
        target: TokenName,
        theme: String,
    },

    /// Reference crosses categories
    #[error(
        "'{token}' ({category}) cannot reference '{target}' ({target_category}) in theme '{theme}'"
    )]
    CategoryMismatch {
        token: TokenName,
        category: Category,
        target: TokenName,
        target_category: Category,
        theme: String,
    },

    /// Theme document files an override under a different category than the base
    #[error("theme '{theme}' declares '{token}' as {declared}, but the base defines it as {expected}")]
    OverrideCategoryMismatch {
        theme: String,
        token: TokenName,
        declared: Category,
        expected: Category,
    },

    /// Reference graph contains a cycle
    #[error("reference cycle in theme '{theme}': {}", format_cycle(.cycle))]
    CycleDetected { theme: String, cycle: Vec<TokenName> },

    /// Reference chain longer than the configured depth bound
    #[error("reference chain from '{token}' in theme '{theme}' is {depth} deep (max {max_depth})")]
    ChainTooDeep {
        token: TokenName,
        theme: String,
        depth: usize,
        max_depth: usize,
    },
}

impl BuildError {
    /// Names of all tokens this error points at
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Self::DuplicateToken(token)
            | Self::DuplicateOverride { token, .. }
            | Self::InvalidValue { token, .. }
            | Self::OverrideCategoryMismatch { token, .. }
            | Self::ChainTooDeep { token, .. } => vec![token.as_str()],
            Self::UnknownOverrideTarget { token, .. } => vec![token.as_str()],
            Self::UnknownReference { token, target, .. }
            | Self::CategoryMismatch { token, target, .. } => vec![token.as_str(), target.as_str()],
            Self::CycleDetected { cycle, .. } => {
                let mut names: Vec<&str> = cycle.iter().map(TokenName::as_str).collect();
                names.dedup();
                if names.len() > 1 && names.first() == names.last() {
                    names.pop();
                }
                names
            }
            Self::InvalidConfig(_)
            | Self::InvalidName(_)
            | Self::InvalidTheme { .. }
            | Self::DuplicateTheme(_) => Vec::new(),
        }
    }
}

/// Errors during resolution
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// Token name not in the base layer
    #[error("unknown token: '{0}'")]
    UnknownToken(String),

    /// Theme not declared
    #[error("unknown theme: '{0}'")]
    UnknownTheme(String),

    /// Cycle reached while following references
    #[error("reference cycle in theme '{theme}': {}", format_cycle(.cycle))]
    CycleDetected { theme: String, cycle: Vec<TokenName> },

    /// Reference chain changed category
    #[error("'{token}' ({category}) resolved through '{target}' ({target_category})")]
    CategoryMismatch {
        token: TokenName,
        category: Category,
        target: TokenName,
        target_category: Category,
    },

    /// Defensive depth bound hit
    #[error("resolving '{token}' in theme '{theme}' exceeded max depth {max_depth}")]
    MaxDepthExceeded {
        token: TokenName,
        theme: String,
        max_depth: usize,
    },
}

impl ResolveError {
    /// Whether this error indicates a caller mistake rather than a registry defect
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::UnknownToken(_) | Self::UnknownTheme(_))
    }
}

/// Render `a -> b -> a`
fn format_cycle(cycle: &[TokenName]) -> String {
    cycle
        .iter()
        .map(TokenName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> TokenName {
        TokenName::parse(s).unwrap()
    }

    #[test]
    fn cycle_display_lists_full_path() {
        let err = BuildError::CycleDetected {
            theme: "dark".to_string(),
            cycle: vec![name("color.a"), name("color.b"), name("color.a")],
        };
        assert_eq!(
            err.to_string(),
            "reference cycle in theme 'dark': color.a -> color.b -> color.a"
        );
        assert_eq!(err.tokens(), vec!["color.a", "color.b"]);
    }

    #[test]
    fn self_cycle_names_single_token() {
        let err = BuildError::CycleDetected {
            theme: "default".to_string(),
            cycle: vec![name("color.a"), name("color.a")],
        };
        assert_eq!(err.tokens(), vec!["color.a"]);
    }

    #[test]
    fn category_mismatch_display() {
        let err = BuildError::CategoryMismatch {
            token: name("spacing.gap"),
            category: Category::Spacing,
            target: name("color.primary"),
            target_category: Category::Color,
            theme: "default".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'spacing.gap' (spacing) cannot reference 'color.primary' (color) in theme 'default'"
        );
        assert_eq!(err.tokens(), vec!["spacing.gap", "color.primary"]);
    }

    #[test]
    fn unknown_override_display() {
        let err = BuildError::UnknownOverrideTarget {
            theme: "dark".to_string(),
            token: "color.accent".to_string(),
        };
        assert_eq!(err.to_string(), "theme 'dark' overrides unknown token 'color.accent'");
    }

    #[test]
    fn resolve_error_caller_classification() {
        assert!(ResolveError::UnknownToken("x".into()).is_caller_error());
        assert!(ResolveError::UnknownTheme("x".into()).is_caller_error());
        assert!(!ResolveError::MaxDepthExceeded {
            token: name("a"),
            theme: "default".into(),
            max_depth: 64,
        }
        .is_caller_error());
    }
}
