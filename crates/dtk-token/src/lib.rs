//! DTK Token Model
//!
//! Named, typed design primitives.
//!
//! # Overview
//!
//! - **TokenName**: dot-separated, case-sensitive identifier (`color.primary.500`)
//! - **Category**: the value kind a token belongs to, fixed at creation
//! - **Literal**: concrete values (colors, lengths, durations, shadows, ...)
//! - **TokenValue**: a literal or a reference to another token
//!
//! # Example
//!
//! ```rust
//! use dtk_token::{Category, RawValue, TokenValue};
//!
//! let literal = TokenValue::parse(&RawValue::from("#3b82f6"), Category::Color).unwrap();
//! assert_eq!(literal.to_string(), "#3b82f6");
//!
//! let alias = TokenValue::parse(&RawValue::from("{color.primary.500}"), Category::Color).unwrap();
//! assert_eq!(alias.reference().unwrap().as_str(), "color.primary.500");
//! ```

#![warn(missing_docs)]

pub mod category;
pub mod definition;
pub mod error;
pub mod name;
pub mod value;

// Re-exports
pub use category::{Category, UnknownCategory};
pub use definition::{RawValue, TokenValue};
pub use error::ValueError;
pub use name::{NameError, TokenName};
pub use value::{Color, Duration, Length, LengthUnit, Literal, ShadowLayer};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for token model operations
    pub use crate::{Category, Literal, RawValue, TokenName, TokenValue, ValueError};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
