//! Atomically replaceable registry
//!
//! # Concurrency
//!
//! * Readers are wait-free: [`RegistryHandle::load`] returns the current
//!   `Arc<TokenRegistry>` from an `ArcSwap`.
//! * A reload builds and validates the new registry off to the side, then
//!   publishes it with a single swap. A failed build publishes nothing.
//! * Readers holding an older `Arc` keep a consistent view of that registry;
//!   one `resolve_all` never mixes values from two generations.
//! * Reloads are serialized and each published registry carries its own
//!   generation, so generations increase by exactly one per swap.

use crate::builder::RegistryBuilder;
use crate::error::{BuildError, ResolveError};
use crate::registry::TokenRegistry;
use crate::snapshot::ConcreteValue;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Registry together with the generation it was published as
#[derive(Debug)]
struct Published {
    registry: Arc<TokenRegistry>,
    generation: u64,
}

/// Shared, hot-reloadable handle to the current registry
pub struct RegistryHandle {
    current: ArcSwap<Published>,
    reload_lock: Mutex<()>,
}

impl RegistryHandle {
    /// Publish an initial registry (generation 0)
    #[must_use]
    pub fn new(registry: TokenRegistry) -> Self {
        Self {
            current: ArcSwap::from_pointee(Published {
                registry: Arc::new(registry),
                generation: 0,
            }),
            reload_lock: Mutex::new(()),
        }
    }

    /// Current registry
    #[inline]
    #[must_use]
    pub fn load(&self) -> Arc<TokenRegistry> {
        Arc::clone(&self.current.load().registry)
    }

    /// Current registry and its generation, read as one unit
    #[must_use]
    pub fn load_with_generation(&self) -> (Arc<TokenRegistry>, u64) {
        let published = self.current.load();
        (Arc::clone(&published.registry), published.generation)
    }

    /// Number of successful swaps so far
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }

    /// Publish a prebuilt registry, returning the one it replaced
    pub fn replace(&self, registry: TokenRegistry) -> Arc<TokenRegistry> {
        self.publish(registry).0
    }

    /// Build from `builder` and publish on success
    ///
    /// Returns the new generation. On failure the current registry stays
    /// published and untouched.
    ///
    /// # Errors
    /// Returns the [`BuildError`] from validation.
    pub fn reload(&self, builder: &RegistryBuilder) -> Result<u64, BuildError> {
        let registry = builder.build().map_err(|err| {
            warn!(error = %err, "token registry reload rejected; keeping current registry");
            err
        })?;
        Ok(self.publish(registry).1)
    }

    /// Swap in `registry` under the writer lock; the generation travels with it
    fn publish(&self, registry: TokenRegistry) -> (Arc<TokenRegistry>, u64) {
        let _guard = self.reload_lock.lock();
        let generation = self.current.load().generation + 1;
        let tokens = registry.len();
        let previous = self.current.swap(Arc::new(Published {
            registry: Arc::new(registry),
            generation,
        }));
        info!(generation, tokens, "token registry swapped");
        (Arc::clone(&previous.registry), generation)
    }

    /// Resolve against the current registry
    ///
    /// # Errors
    /// See [`TokenRegistry::resolve`].
    pub fn resolve(&self, token: &str, theme: &str) -> Result<ConcreteValue, ResolveError> {
        self.current.load().registry.resolve(token, theme)
    }
}

impl fmt::Debug for RegistryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryHandle")
            .field("generation", &self.generation())
            .field("tokens", &self.current.load().registry.len())
            .finish_non_exhaustive()
    }
}
