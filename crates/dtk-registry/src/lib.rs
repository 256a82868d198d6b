//! DTK Token Registry
//!
//! Validated token registry with layered theme resolution.
//!
//! # Overview
//!
//! - **RegistryBuilder**: collects base tokens and theme overrides, validates eagerly
//! - **TokenRegistry**: immutable, `Send + Sync`, resolves `(token, theme)` to a concrete value
//! - **ThemeSnapshot**: every token resolved under one theme, exportable as CSS or JSON
//! - **RegistryHandle**: wait-free reads with atomic hot reload
//!
//! # Example
//!
//! ```rust
//! use dtk_registry::RegistryBuilder;
//! use dtk_token::{Category, RawValue};
//!
//! let mut builder = RegistryBuilder::new();
//! builder
//!     .token("spacing.md", Category::Spacing, "1rem")
//!     .token("spacing.lg", Category::Spacing, RawValue::reference("spacing.md"));
//! let registry = builder.build().unwrap();
//!
//! let snapshot = registry.resolve_all("default").unwrap();
//! assert_eq!(snapshot.get("spacing.lg").unwrap().to_string(), "1rem");
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
mod graph;
pub mod handle;
pub mod registry;
pub mod snapshot;
pub mod theme;

// Re-exports
pub use builder::RegistryBuilder;
pub use cache::CacheStats;
pub use config::RegistryConfig;
pub use error::{BuildError, ResolveError};
pub use handle::RegistryHandle;
pub use registry::TokenRegistry;
pub use snapshot::{ConcreteValue, ThemeSnapshot};
pub use theme::ThemeName;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for registry operations
    pub use crate::{
        BuildError, ConcreteValue, RegistryBuilder, RegistryConfig, RegistryHandle, ResolveError,
        ThemeSnapshot, TokenRegistry,
    };
    pub use dtk_token::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
