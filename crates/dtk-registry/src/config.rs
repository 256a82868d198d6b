//! Registry configuration

use crate::error::BuildError;
use serde::{Deserialize, Serialize};

/// Default bound on reference chain length
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default resolution cache capacity (entries)
pub const DEFAULT_CACHE_CAPACITY: u64 = 4096;

/// Registry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum number of reference hops followed during resolution
    pub max_depth: usize,
    /// Maximum memoized (token, theme) results
    pub cache_capacity: u64,
    /// Memoize resolution results
    pub cache_enabled: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_enabled: true,
        }
    }
}

impl RegistryConfig {
    /// Set maximum reference depth
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Enable or disable the resolution cache
    #[inline]
    #[must_use]
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Validate configuration values
    ///
    /// # Errors
    /// Returns [`BuildError::InvalidConfig`] when `max_depth` is zero, or the
    /// cache is enabled with zero capacity.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_depth == 0 {
            return Err(BuildError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.cache_enabled && self.cache_capacity == 0 {
            return Err(BuildError::InvalidConfig(
                "cache_capacity must be positive when the cache is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
