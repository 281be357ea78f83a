//! Catalog data service
//!
//! Owns the registry, the shared [`CatalogCache`] and any animations added at
//! runtime. Construct one per process and hand out references; it is
//! `Send + Sync`.

use crate::builder::build_catalog;
use crate::cache::CatalogCache;
use crate::error::{CatalogBuildError, CatalogError, Result};
use crate::model::{Animation, Catalog};
use crate::registry::Registry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An animation to add at runtime; the service assigns its id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAnimation {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub group_id: String,
    pub tags: Vec<String>,
    pub disable_replay: bool,
}

impl NewAnimation {
    pub fn new(
        category_id: impl Into<String>,
        group_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category_id: category_id.into(),
            group_id: group_id.into(),
            tags: Vec::new(),
            disable_replay: false,
        }
    }
}

/// Builds, caches and refreshes the catalog
pub struct CatalogService {
    registry: Registry,
    cache: CatalogCache<Catalog>,
    extras: Mutex<Vec<Animation>>,
    next_extra: AtomicU64,
}

impl CatalogService {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            cache: CatalogCache::new(),
            extras: Mutex::new(Vec::new()),
            next_extra: AtomicU64::new(1),
        }
    }

    /// Service over the built-in showcase registry
    pub fn builtin() -> Self {
        Self::new(Registry::builtin())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The catalog, built on first call
    ///
    /// Repeated calls return the same `Arc` until [`refresh_catalog`](Self::refresh_catalog)
    /// or [`add_animation`](Self::add_animation) replaces it.
    pub fn load_animations(&self) -> std::result::Result<Arc<Catalog>, CatalogBuildError> {
        if let Some(catalog) = self.cache.current() {
            return Ok(catalog);
        }

        // Lock order is always extras, then cache.
        let extras = self.lock_extras();
        self.cache.get_or_try_init(|| {
            tracing::info!("building animation catalog");
            build_catalog(&self.registry, &extras)
        })
    }

    /// Rebuild from the registry and replace the cached catalog
    pub fn refresh_catalog(&self) -> std::result::Result<Arc<Catalog>, CatalogBuildError> {
        let extras = self.lock_extras();
        let catalog = self
            .cache
            .replace_with(|| build_catalog(&self.registry, &extras))?;
        tracing::info!(
            generation = self.cache.generation(),
            groups = catalog.group_count(),
            "catalog refreshed"
        );
        Ok(catalog)
    }

    /// Whether a catalog has been built yet
    pub fn is_loaded(&self) -> bool {
        self.cache.is_initialized()
    }

    /// Add an animation to an existing group
    ///
    /// The animation survives later refreshes. The returned id has the form
    /// `<group id>__extra-<n>`.
    pub fn add_animation(&self, new: NewAnimation) -> Result<Animation> {
        let catalog = self.load_animations()?;
        let category = catalog
            .category(&new.category_id)
            .ok_or_else(|| CatalogError::CategoryNotFound(new.category_id.clone()))?;
        if !category.contains_group(&new.group_id) {
            return Err(CatalogError::GroupNotFound(new.group_id));
        }

        let id = loop {
            let n = self.next_extra.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{}__extra-{n}", new.group_id);
            if catalog.animation(&candidate).is_none() {
                break candidate;
            }
        };

        let animation = Animation {
            id,
            title: new.title,
            description: new.description,
            category_id: new.category_id,
            group_id: new.group_id,
            tags: new.tags,
            disable_replay: new.disable_replay,
        };

        let mut extras = self.lock_extras();
        extras.push(animation.clone());
        if let Err(err) = self.cache.replace_with(|| build_catalog(&self.registry, &extras)) {
            extras.pop();
            return Err(err.into());
        }

        tracing::debug!(animation = %animation.id, "added animation");
        Ok(animation)
    }

    /// Copy of a group's animations; empty when the category or group is unknown
    pub fn animations_by_group(&self, category_id: &str, group_id: &str) -> Result<Vec<Animation>> {
        let catalog = self.load_animations()?;
        Ok(catalog
            .category(category_id)
            .and_then(|c| c.groups.iter().find(|g| g.id == group_id))
            .map(|g| g.animations.clone())
            .unwrap_or_default())
    }

    fn lock_extras(&self) -> MutexGuard<'_, Vec<Animation>> {
        self.extras.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("categories", &self.registry.categories().len())
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{AnimationMeta, CategoryDef, GroupDef};
    use rustc_hash::FxHashSet;

    fn small_registry() -> Registry {
        Registry::new().category(
            CategoryDef::new("rewards", "Rewards").group(
                GroupDef::new("lights", "Lights")
                    .framer(AnimationMeta::new("lights__chase", "Chase", "Bulbs chase"))
                    .css(AnimationMeta::new("lights__chase", "Chase", "Bulbs chase")),
            ),
        )
    }

    #[test]
    fn test_load_returns_cached_reference() {
        let service = CatalogService::new(small_registry());
        assert!(!service.is_loaded());

        let a = service.load_animations().unwrap();
        let b = service.load_animations().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(service.is_loaded());
    }

    #[test]
    fn test_refresh_returns_equal_new_instance() {
        let service = CatalogService::builtin();
        let before = service.load_animations().unwrap();
        let after = service.refresh_catalog().unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
        assert!(Arc::ptr_eq(&after, &service.load_animations().unwrap()));
    }

    #[test]
    fn test_builtin_ids_unique() {
        let catalog = CatalogService::builtin().load_animations().unwrap();
        let mut seen = FxHashSet::default();
        assert!(catalog.animations().all(|a| seen.insert(a.id.clone())));
    }

    #[test]
    fn test_add_animation_validates_target() {
        let service = CatalogService::new(small_registry());

        let err = service
            .add_animation(NewAnimation::new("missing", "lights-css", "X", "x"))
            .unwrap_err();
        assert_eq!(err, CatalogError::CategoryNotFound("missing".into()));
        assert_eq!(err.to_string(), "Category not found: missing");

        let err = service
            .add_animation(NewAnimation::new("rewards", "missing", "X", "x"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Group not found: missing");
    }

    #[test]
    fn test_added_animation_survives_refresh() {
        let service = CatalogService::new(small_registry());
        let added = service
            .add_animation(NewAnimation::new("rewards", "lights-css", "Extra", "Added"))
            .unwrap();
        assert_eq!(added.id, "lights-css__extra-1");

        let group = service.animations_by_group("rewards", "lights-css").unwrap();
        assert_eq!(group.len(), 2);

        let refreshed = service.refresh_catalog().unwrap();
        assert!(refreshed.animation("lights-css__extra-1").is_some());
    }

    #[test]
    fn test_animations_by_group_unknown_is_empty() {
        let service = CatalogService::new(small_registry());
        assert!(service.animations_by_group("rewards", "nope").unwrap().is_empty());
        assert!(service.animations_by_group("nope", "lights-css").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_registry_fails_load() {
        let registry = small_registry().category(
            CategoryDef::new("rewards", "Again").group(
                GroupDef::new("coins", "Coins").css(AnimationMeta::new("coins__a", "A", "a")),
            ),
        );
        let service = CatalogService::new(registry);
        assert_eq!(
            service.load_animations().unwrap_err(),
            CatalogBuildError::DuplicateCategory("rewards".into())
        );
        assert!(!service.is_loaded());
    }
}
