//! Resolution cache using moka
//!
//! Memoizes resolved values per (token, theme) pair. The cache belongs to a
//! single immutable registry, so it never needs invalidation: a reload
//! publishes a new registry with a fresh cache.

use crate::snapshot::ConcreteValue;
use moka::sync::Cache;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
    /// Whether caching is enabled
    pub enabled: bool,
}

/// Concurrent bounded cache keyed by (token id, theme id)
#[derive(Debug, Clone)]
pub(crate) struct ResolutionCache {
    inner: Option<Cache<(usize, usize), ConcreteValue>>,
}

impl ResolutionCache {
    /// Cache with max capacity
    pub(crate) fn new(max_capacity: u64) -> Self {
        Self {
            inner: Some(Cache::new(max_capacity)),
        }
    }

    /// Cache that stores nothing
    pub(crate) fn disabled() -> Self {
        Self { inner: None }
    }

    #[inline]
    pub(crate) fn get(&self, token: usize, theme: usize) -> Option<ConcreteValue> {
        self.inner.as_ref()?.get(&(token, theme))
    }

    #[inline]
    pub(crate) fn insert(&self, token: usize, theme: usize, value: ConcreteValue) {
        if let Some(inner) = &self.inner {
            inner.insert((token, theme), value);
        }
    }

    pub(crate) fn stats(&self) -> CacheStats {
        match &self.inner {
            Some(inner) => {
                inner.run_pending_tasks();
                CacheStats {
                    entry_count: inner.entry_count(),
                    enabled: true,
                }
            }
            None => CacheStats::default(),
        }
    }
}
