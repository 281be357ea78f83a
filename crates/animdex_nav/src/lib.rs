//! Animdex Navigation
//!
//! Group-to-group navigation for the showcase:
//!
//! - **Machine**: a pure reducer over [`NavState`] and [`NavContext`] that turns
//!   [`NavEvent`]s into the next state plus [`Effect`]s
//! - **Controller**: runs the machine against a [`Host`](animdex_platform::Host),
//!   keeps it seeded from the catalog and the route, closes the drawer on Escape
//! - **Scroll sync**: brings the current group's section under the app bar
//! - **Config**: offsets, delays and selectors, overridable from TOML
//!
//! # Example
//!
//! ```rust
//! use animdex_catalog::CatalogService;
//! use animdex_nav::{NavEvent, NavigationMachine};
//!
//! let catalog = CatalogService::builtin().load_animations().unwrap();
//! let mut machine = NavigationMachine::new();
//!
//! machine.send(NavEvent::initialize(None, &catalog));
//! assert!(machine.matches("ready"));
//!
//! let effects = machine.send(NavEvent::navigate_to_category("rewards"));
//! assert_eq!(effects.len(), 1);
//! assert_eq!(machine.context().current_group_id, "lights-framer");
//! ```

pub mod config;
pub mod controller;
pub mod machine;
pub mod scroll;

pub use config::{ConfigError, NavConfig};
pub use controller::NavigationController;
pub use machine::{
    transition, Direction, DrawerState, Effect, Effects, NavContext, NavEvent, NavState,
    NavigationMachine, Transition,
};
pub use scroll::{scroll_into_view, ScrollOutcome, ScrollSync};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::NavConfig;
    pub use crate::controller::NavigationController;
    pub use crate::machine::{Direction, Effect, NavEvent, NavState, NavigationMachine};
}
