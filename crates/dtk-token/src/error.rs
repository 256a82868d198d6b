//! Error types for token values

use crate::category::Category;
use crate::name::NameError;

/// Errors while turning a raw definition into a typed value
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// Malformed color
    #[error("invalid color: '{0}'")]
    InvalidColor(String),

    /// Malformed length
    #[error("invalid length: '{0}'")]
    InvalidLength(String),

    /// Malformed duration
    #[error("invalid duration: '{0}' (expected ms or s suffix)")]
    InvalidDuration(String),

    /// Malformed number
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    /// Malformed shadow
    #[error("invalid shadow: '{0}'")]
    InvalidShadow(String),

    /// Malformed easing curve
    #[error("invalid easing: '{0}'")]
    InvalidEasing(String),

    /// Unit suffix not supported
    #[error("unknown unit: '{0}'")]
    UnknownUnit(String),

    /// Bare number where the category needs an explicit unit
    #[error("{category} value '{value}' needs an explicit unit")]
    MissingUnit { category: Category, value: String },

    /// Well-formed literal of the wrong kind for the category
    #[error("{category} token cannot hold {kind} '{value}'")]
    NotAccepted {
        category: Category,
        kind: &'static str,
        value: String,
    },

    /// Reference with an invalid target name
    #[error("invalid reference: {0}")]
    InvalidReference(#[from] NameError),

    /// Raw definition shape not understood
    #[error("unsupported definition: {0}")]
    Unsupported(String),
}
