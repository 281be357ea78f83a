//! Headless harness
//!
//! Wires a [`CatalogService`], an in-memory host and a started
//! [`NavigationController`] together, with helpers to drive frames, timers
//! and keys the way a browser would.

use animdex_catalog::{Catalog, CatalogService, Registry};
use animdex_nav::{Effects, NavConfig, NavEvent, NavigationController};
use animdex_platform::{Document, Key, KeyboardEvent, MemoryHost, NavigationRecord, Router};
use anyhow::{Context, Result};
use std::sync::{Arc, Once};
use std::time::Duration;

static TRACING: Once = Once::new();

/// Install a `tracing` subscriber once per process
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. Safe to call from
/// every test.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    TRACING.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

/// Pixels between consecutive group sections placed by [`NavHarness::place_sections`]
pub const SECTION_SPACING: f64 = 800.0;

/// Height of the app bar placed by the harness
pub const APP_BAR_HEIGHT: f64 = 64.0;

/// A started navigation controller over an in-memory host
pub struct NavHarness {
    pub service: Arc<CatalogService>,
    pub host: MemoryHost,
    pub nav: NavigationController,
}

impl NavHarness {
    /// Harness over the built-in registry, router at `location`
    pub fn new(location: &str) -> Self {
        Self::with_registry(Registry::builtin(), location, NavConfig::default())
    }

    pub fn with_registry(registry: Registry, location: &str, config: NavConfig) -> Self {
        init_tracing();

        let host = MemoryHost::new(location);
        let app_bar = config.app_bar_selector.clone();
        host.document.set_element_height(app_bar, APP_BAR_HEIGHT);

        let mut nav = NavigationController::new(host.host(), config);
        nav.start();

        Self {
            service: Arc::new(CatalogService::new(registry)),
            host,
            nav,
        }
    }

    /// Cached catalog
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        self.service
            .load_animations()
            .context("failed to build the animation catalog")
    }

    /// Load the catalog and sync the controller with it and the route
    pub fn sync(&mut self) -> Result<bool> {
        let catalog = self.catalog()?;
        Ok(self.nav.sync(&catalog))
    }

    /// Rebuild the catalog and sync with the new instance
    pub fn refresh(&mut self) -> Result<bool> {
        let catalog = self
            .service
            .refresh_catalog()
            .context("failed to rebuild the animation catalog")?;
        Ok(self.nav.sync(&catalog))
    }

    /// Change the URL as a user would, then sync
    pub fn visit(&mut self, path: &str) -> Result<bool> {
        self.host.router.set_location(path);
        self.sync()
    }

    pub fn send(&mut self, event: NavEvent) -> Effects {
        self.nav.send(event)
    }

    pub fn press(&mut self, key: Key) -> bool {
        self.nav.handle_key(&KeyboardEvent::pressed(key))
    }

    /// Render one section per group, [`SECTION_SPACING`] apart
    pub fn place_sections(&self) -> Result<()> {
        let catalog = self.catalog()?;
        for (i, group) in catalog.groups().enumerate() {
            let id = self.nav.config().group_element_id(&group.id);
            self.host.document.insert_element(id, i as f64 * SECTION_SPACING);
        }
        Ok(())
    }

    /// Page offset of a group's section as placed by [`place_sections`](Self::place_sections)
    pub fn section_top(&self, group_id: &str) -> Result<f64> {
        let catalog = self.catalog()?;
        let index = catalog
            .groups()
            .position(|g| g.id == group_id)
            .with_context(|| format!("no group {group_id}"))?;
        Ok(index as f64 * SECTION_SPACING)
    }

    /// Scroll offset that puts `group_id` under the app bar
    pub fn expected_scroll(&self, group_id: &str) -> Result<f64> {
        let top = self.section_top(group_id)?;
        Ok((top - APP_BAR_HEIGHT - self.nav.config().scroll_extra_offset).max(0.0))
    }

    pub fn run_frame(&self) -> usize {
        self.host.scheduler.run_frame()
    }

    pub fn advance(&self, millis: u64) -> usize {
        self.host.scheduler.advance(Duration::from_millis(millis))
    }

    pub fn location(&self) -> String {
        self.host.router.location()
    }

    pub fn navigations(&self) -> Vec<NavigationRecord> {
        self.host.router.navigations()
    }

    pub fn scroll_y(&self) -> f64 {
        self.host.document.scroll_y()
    }
}

impl std::fmt::Debug for NavHarness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavHarness")
            .field("location", &self.location())
            .field("nav", &self.nav)
            .finish()
    }
}
