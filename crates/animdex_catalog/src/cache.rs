//! Shared catalog cache
//!
//! A single slot holding the current value behind an `Arc`. Readers clone the
//! `Arc` and keep using it for as long as they like; a rebuild produces a new
//! value and swaps the slot, so a reader sees either the old or the new
//! value, never a half-built one.
//!
//! # Example
//!
//! ```rust
//! use animdex_catalog::CatalogCache;
//! use std::sync::Arc;
//!
//! let cache: CatalogCache<Vec<u32>> = CatalogCache::new();
//!
//! let first = cache.get_or_try_init(|| Ok::<_, ()>(vec![1, 2, 3])).unwrap();
//! let again = cache.get_or_try_init(|| Ok::<_, ()>(vec![9])).unwrap();
//! assert!(Arc::ptr_eq(&first, &again));
//!
//! let rebuilt = cache.replace_with(|| Ok::<_, ()>(vec![1, 2, 3])).unwrap();
//! assert!(!Arc::ptr_eq(&first, &rebuilt));
//! assert_eq!(cache.generation(), 2);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Atomically replaceable, lazily built value
pub struct CatalogCache<T> {
    slot: RwLock<Option<Arc<T>>>,
    /// Bumped every time a new value is stored
    generation: AtomicU64,
}

impl<T> CatalogCache<T> {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Current value, if one has been built
    pub fn current(&self) -> Option<Arc<T>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Return the cached value, building it on first use
    ///
    /// Concurrent first callers serialize on the write lock; only one build
    /// runs.
    pub fn get_or_try_init<E, F>(&self, build: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.current() {
            return Ok(value);
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }

        let value = Arc::new(build()?);
        *slot = Some(Arc::clone(&value));
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(value)
    }

    /// Build a fresh value and swap it in
    ///
    /// The build runs outside the lock, readers keep getting the previous
    /// value until the swap. A failed build leaves the cache untouched.
    pub fn replace_with<E, F>(&self, build: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let value = Arc::new(build()?);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&value));
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(value)
    }

    /// Drop the cached value; the next `get_or_try_init` rebuilds
    pub fn invalidate(&self) {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Number of values stored so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_initialized(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<T> Default for CatalogCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for CatalogCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCache")
            .field("initialized", &self.is_initialized())
            .field("generation", &self.generation())
            .finish()
    }
}
