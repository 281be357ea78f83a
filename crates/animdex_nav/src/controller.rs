//! Navigation controller
//!
//! Binds a [`NavigationMachine`] to its host: re-initializes from the catalog
//! and the route, runs effects against the router and document, handles the
//! Escape key while the drawer is open and keeps the current group scrolled
//! into view.
//!
//! The controller is inert until [`start`](NavigationController::start) and
//! releases everything it scheduled on [`stop`](NavigationController::stop)
//! or drop.
//!
//! ```rust
//! use animdex_catalog::CatalogService;
//! use animdex_nav::{NavConfig, NavEvent, NavigationController};
//! use animdex_platform::{MemoryHost, Router};
//!
//! let memory = MemoryHost::new("/lights-css");
//! let catalog = CatalogService::builtin().load_animations().unwrap();
//!
//! let mut nav = NavigationController::new(memory.host(), NavConfig::default());
//! nav.start();
//! nav.sync(&catalog);
//! assert_eq!(nav.current_group_id(), "lights-css");
//!
//! nav.send(NavEvent::SwipeNext);
//! assert_eq!(memory.router.location(), "/modal-celebrations-framer");
//! ```

use crate::config::NavConfig;
use crate::machine::{Effect, Effects, NavContext, NavEvent, NavState, NavigationMachine};
use crate::scroll::ScrollSync;
use animdex_catalog::{counterpart_for_mode, Catalog, CodeMode};
use animdex_platform::{Host, Key, KeyboardEvent, NavigateOptions};
use std::rc::Rc;
use std::sync::Arc;

/// Inputs of the last `INITIALIZE`, used to skip redundant ones
#[derive(Debug)]
struct Seeded {
    catalog: Arc<Catalog>,
    group_param: Option<String>,
}

/// Runs the navigation machine against a host
pub struct NavigationController {
    machine: NavigationMachine,
    host: Host,
    config: Rc<NavConfig>,
    scroll: ScrollSync,
    seeded: Option<Seeded>,
    mode: CodeMode,
    started: bool,
    /// Escape listener, attached only while the drawer is open
    key_listener: bool,
}

impl NavigationController {
    pub fn new(host: Host, config: NavConfig) -> Self {
        let config = Rc::new(config);
        let scroll = ScrollSync::new(
            Rc::clone(&host.document),
            Rc::clone(&host.scheduler),
            Rc::clone(&config),
        );
        Self {
            machine: NavigationMachine::new(),
            mode: config.default_code_mode,
            host,
            config,
            scroll,
            seeded: None,
            started: false,
            key_listener: false,
        }
    }

    /// Begin handling events
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        tracing::debug!(state = self.machine.state_value(), "navigation controller started");

        self.update_key_listener();
        if self.machine.state().is_drawer_open() {
            self.host.document.set_body_scroll_locked(true);
        }
        if self.machine.state().is_ready() {
            self.scroll.schedule(&self.machine.context().current_group_id);
        }
    }

    /// Stop handling events, cancel pending work and release the body lock
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        self.scroll.cancel();
        self.update_key_listener();
        if self.machine.state().is_drawer_open() {
            self.host.document.set_body_scroll_locked(false);
        }
        tracing::debug!("navigation controller stopped");
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Re-seed the machine when the catalog or the route parameter changed
    ///
    /// A catalog counts as changed when it is a different instance, so a
    /// refreshed catalog re-initializes even if it is structurally equal.
    /// Empty catalogs are skipped. Returns true if `INITIALIZE` was sent.
    pub fn sync(&mut self, catalog: &Arc<Catalog>) -> bool {
        if !self.started {
            tracing::debug!("ignoring sync before start");
            return false;
        }
        if catalog.groups().next().is_none() {
            tracing::debug!("waiting for a non-empty catalog");
            return false;
        }

        let group_param = self.host.router.group_param();
        let unchanged = self.seeded.as_ref().is_some_and(|seeded| {
            Arc::ptr_eq(&seeded.catalog, catalog) && seeded.group_param == group_param
        });
        if unchanged {
            return false;
        }

        let event = NavEvent::initialize(group_param.as_deref(), catalog);
        self.seeded = Some(Seeded {
            catalog: Arc::clone(catalog),
            group_param,
        });
        self.dispatch(event);
        true
    }

    /// Send an event and run its effects
    ///
    /// Returns the effects that ran; empty when the event was ignored.
    pub fn send(&mut self, event: NavEvent) -> Effects {
        if !self.started {
            tracing::debug!(event = event.name(), "ignoring event before start");
            return Effects::new();
        }
        self.dispatch(event)
    }

    /// Forward a keyboard event from the host
    ///
    /// Returns true if the event was consumed.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        if !self.key_listener || !event.is_press_of(&Key::Escape) {
            return false;
        }
        !self.dispatch(NavEvent::CloseDrawer).is_empty()
    }

    /// Switch code mode and follow the current group to its counterpart
    ///
    /// Returns true if a navigation happened.
    pub fn select_mode(&mut self, mode: CodeMode) -> bool {
        if mode != self.mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "code mode changed");
        }
        self.mode = mode;

        let context = self.machine.context();
        let Some(target) =
            counterpart_for_mode(&context.current_group_id, &context.all_groups, mode)
        else {
            return false;
        };
        let event = NavEvent::navigate_to_group(target);
        !self.send(event).is_empty()
    }

    pub fn code_mode(&self) -> CodeMode {
        self.mode
    }

    pub fn state(&self) -> NavState {
        self.machine.state()
    }

    /// Dotted state value, e.g. `ready.drawer.closed`
    pub fn state_value(&self) -> &'static str {
        self.machine.state_value()
    }

    pub fn context(&self) -> &NavContext {
        self.machine.context()
    }

    pub fn current_group_id(&self) -> &str {
        &self.machine.context().current_group_id
    }

    pub fn is_drawer_open(&self) -> bool {
        self.machine.state().is_drawer_open()
    }

    pub fn is_initializing(&self) -> bool {
        self.machine.matches("initializing")
    }

    pub fn is_ready(&self) -> bool {
        self.machine.matches("ready")
    }

    /// Category holding the current group, for sidebar highlighting
    pub fn active_category_id(&self) -> Option<&str> {
        self.machine
            .context()
            .active_category()
            .map(|c| c.id.as_str())
    }

    /// Whether the Escape listener is attached
    pub fn is_listening_for_keys(&self) -> bool {
        self.key_listener
    }

    /// Whether a scroll attempt is still scheduled
    pub fn is_scroll_pending(&self) -> bool {
        self.scroll.is_pending()
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    fn dispatch(&mut self, event: NavEvent) -> Effects {
        let previous = self.machine.context().current_group_id.clone();
        let effects = self.machine.send(event);

        for effect in &effects {
            self.run_effect(effect);
        }

        let current = &self.machine.context().current_group_id;
        if *current != previous {
            self.scroll.schedule(current);
        }
        self.update_key_listener();
        effects
    }

    fn run_effect(&self, effect: &Effect) {
        match effect {
            Effect::Navigate { path, replace } => {
                let options = if *replace {
                    NavigateOptions::replace()
                } else {
                    NavigateOptions::push()
                };
                if let Err(err) = self.host.router.navigate(path, options) {
                    tracing::warn!(%path, error = %err, "route update failed");
                }
            }
            Effect::LockBodyScroll => self.host.document.set_body_scroll_locked(true),
            Effect::UnlockBodyScroll => self.host.document.set_body_scroll_locked(false),
        }
    }

    fn update_key_listener(&mut self) {
        let wanted = self.started && self.machine.state().is_drawer_open();
        if wanted != self.key_listener {
            self.key_listener = wanted;
            tracing::trace!(attached = wanted, "escape listener");
        }
    }
}

impl Drop for NavigationController {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("state", &self.machine.state_value())
            .field("current_group_id", &self.current_group_id())
            .field("mode", &self.mode)
            .field("started", &self.started)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animdex_catalog::{Category, Group, Tech};
    use animdex_platform::{Document, MemoryHost, NavigationRecord, Router};
    use std::time::Duration;

    fn catalog() -> Arc<Catalog> {
        let group = |id: &str, tech: Tech| Group::new(id, id).with_tech(tech);
        Arc::new(Catalog::new(vec![
            Category::new("base", "Base")
                .with_group(group("button-effects-framer", Tech::Framer))
                .with_group(group("button-effects-css", Tech::Css)),
            Category::new("rewards", "Rewards")
                .with_group(group("lights-framer", Tech::Framer))
                .with_group(group("lights-css", Tech::Css)),
        ]))
    }

    fn started(location: &str) -> (MemoryHost, NavigationController) {
        let memory = MemoryHost::new(location);
        let mut nav = NavigationController::new(memory.host(), NavConfig::default());
        nav.start();
        (memory, nav)
    }

    #[test]
    fn test_inert_before_start() {
        let memory = MemoryHost::new("/lights-css");
        let mut nav = NavigationController::new(memory.host(), NavConfig::default());

        assert!(!nav.sync(&catalog()));
        assert!(nav.send(NavEvent::SwipeNext).is_empty());
        assert!(nav.is_initializing());
    }

    #[test]
    fn test_sync_initializes_from_route() {
        let (memory, mut nav) = started("/lights-css");
        assert!(nav.sync(&catalog()));

        assert!(nav.is_ready());
        assert_eq!(nav.state_value(), "ready.drawer.closed");
        assert_eq!(nav.current_group_id(), "lights-css");
        assert_eq!(nav.active_category_id(), Some("rewards"));
        assert!(memory.router.navigations().is_empty());
    }

    #[test]
    fn test_sync_canonicalizes_route() {
        let (memory, mut nav) = started("/unknown");
        nav.sync(&catalog());

        assert_eq!(nav.current_group_id(), "button-effects-framer");
        assert_eq!(
            memory.router.navigations(),
            [NavigationRecord {
                path: "/button-effects-framer".into(),
                replace: true,
            }]
        );
        assert_eq!(memory.router.history(), ["/button-effects-framer"]);
    }

    #[test]
    fn test_sync_skips_unchanged_inputs() {
        let (memory, mut nav) = started("/lights-css");
        let catalog = catalog();
        assert!(nav.sync(&catalog));
        assert!(!nav.sync(&catalog));

        memory.router.set_location("/lights-framer");
        assert!(nav.sync(&catalog));
        assert_eq!(nav.current_group_id(), "lights-framer");

        let rebuilt = Arc::new((*catalog).clone());
        assert!(nav.sync(&rebuilt));
        assert_eq!(nav.current_group_id(), "lights-framer");
    }

    #[test]
    fn test_sync_waits_for_catalog() {
        let (_memory, mut nav) = started("/");
        assert!(!nav.sync(&Arc::new(Catalog::new(Vec::new()))));
        assert!(nav.is_initializing());
    }

    #[test]
    fn test_navigation_pushes_route() {
        let (memory, mut nav) = started("/button-effects-framer");
        nav.sync(&catalog());

        nav.send(NavEvent::navigate_to_category("rewards"));
        assert_eq!(memory.router.location(), "/lights-framer");

        nav.send(NavEvent::navigate_to_group("ghost"));
        assert_eq!(memory.router.location(), "/lights-framer");
        assert_eq!(memory.router.navigations().len(), 1);
    }

    #[test]
    fn test_refused_navigation_keeps_machine_moving() {
        let (memory, mut nav) = started("/button-effects-framer");
        nav.sync(&catalog());
        memory.router.block("guarded");

        let effects = nav.send(NavEvent::SwipeNext);
        assert_eq!(effects.len(), 1);
        assert_eq!(nav.current_group_id(), "button-effects-css");
        assert_eq!(memory.router.location(), "/button-effects-framer");
        assert!(memory.router.navigations().is_empty());
        assert!(nav.is_scroll_pending());

        memory.router.unblock();
        nav.send(NavEvent::SwipeNext);
        assert_eq!(memory.router.location(), "/lights-framer");
    }

    #[test]
    fn test_escape_closes_open_drawer_only() {
        let (memory, mut nav) = started("/lights-css");
        nav.sync(&catalog());
        let escape = KeyboardEvent::pressed(Key::Escape);

        assert!(!nav.is_listening_for_keys());
        assert!(!nav.handle_key(&escape));

        nav.send(NavEvent::OpenDrawer);
        assert!(nav.is_listening_for_keys());
        assert!(memory.document.is_body_scroll_locked());
        assert!(!nav.handle_key(&KeyboardEvent::pressed(Key::Enter)));
        assert!(!nav.handle_key(&KeyboardEvent::released(Key::Escape)));

        assert!(nav.handle_key(&escape));
        assert!(!nav.is_drawer_open());
        assert!(!nav.is_listening_for_keys());
        assert!(!memory.document.is_body_scroll_locked());
    }

    #[test]
    fn test_stop_detaches_and_cancels() {
        let (memory, mut nav) = started("/lights-css");
        nav.sync(&catalog());
        nav.send(NavEvent::OpenDrawer);
        assert!(nav.is_scroll_pending());

        nav.stop();
        assert!(!nav.is_listening_for_keys());
        assert!(!nav.is_scroll_pending());
        assert!(memory.scheduler.is_idle());
        assert!(!nav.handle_key(&KeyboardEvent::pressed(Key::Escape)));
    }

    #[test]
    fn test_stop_releases_body_lock() {
        let (memory, mut nav) = started("/lights-css");
        nav.sync(&catalog());
        nav.send(NavEvent::OpenDrawer);
        assert!(memory.document.is_body_scroll_locked());

        nav.stop();
        assert!(!memory.document.is_body_scroll_locked());
        assert!(nav.is_drawer_open());

        nav.start();
        assert!(memory.document.is_body_scroll_locked());
        assert!(nav.is_listening_for_keys());
    }

    #[test]
    fn test_drop_releases_body_lock() {
        let (memory, mut nav) = started("/lights-css");
        nav.sync(&catalog());
        nav.send(NavEvent::OpenDrawer);

        drop(nav);
        assert!(!memory.document.is_body_scroll_locked());
        assert!(memory.scheduler.is_idle());
    }

    #[test]
    fn test_stop_with_closed_drawer_leaves_lock_alone() {
        let (memory, mut nav) = started("/lights-css");
        nav.sync(&catalog());
        memory.document.set_body_scroll_locked(true);

        nav.stop();
        assert!(memory.document.is_body_scroll_locked());
    }

    #[test]
    fn test_scrolls_to_current_group() {
        let (memory, mut nav) = started("/lights-css");
        memory
            .document
            .set_element_height(r#"[data-app-shell="bar"]"#, 56.0);
        memory.document.insert_element("group-lights-css", 1200.0);
        memory.document.insert_element("group-lights-framer", 600.0);

        nav.sync(&catalog());
        memory.scheduler.run_frame();
        assert_eq!(memory.document.scroll_y(), 1128.0);

        nav.send(NavEvent::SwipePrev);
        memory.scheduler.run_frame();
        assert_eq!(memory.document.scroll_y(), 528.0);
    }

    #[test]
    fn test_last_navigation_wins_scroll() {
        let (memory, mut nav) = started("/button-effects-framer");
        nav.sync(&catalog());
        memory.scheduler.run_frame();
        memory.scheduler.advance(Duration::from_secs(1));

        memory.document.insert_element("group-lights-css", 3000.0);
        nav.send(NavEvent::SwipeNext);
        nav.send(NavEvent::navigate_to_group("lights-css"));
        assert_eq!(memory.scheduler.pending_frames(), 1);

        memory.scheduler.run_frame();
        memory.scheduler.advance(Duration::from_secs(1));
        assert_eq!(memory.document.scroll_calls(), [2984.0]);
    }

    #[test]
    fn test_select_mode_follows_counterpart() {
        let (memory, mut nav) = started("/lights-framer");
        nav.sync(&catalog());

        assert!(nav.select_mode(CodeMode::Css));
        assert_eq!(nav.code_mode(), CodeMode::Css);
        assert_eq!(memory.router.location(), "/lights-css");

        assert!(!nav.select_mode(CodeMode::Css));
        assert!(nav.select_mode(CodeMode::Framer));
        assert_eq!(nav.current_group_id(), "lights-framer");
    }

    #[test]
    fn test_start_scrolls_to_existing_group() {
        let (memory, mut nav) = started("/lights-css");
        nav.sync(&catalog());
        nav.stop();
        assert!(memory.scheduler.is_idle());

        nav.start();
        assert!(nav.is_scroll_pending());
    }
}
