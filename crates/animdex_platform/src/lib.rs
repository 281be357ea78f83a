//! Animdex Platform Boundary
//!
//! Traits for everything the navigation layer needs from its host, plus
//! in-memory implementations for headless runs and tests.
//!
//! - [`Router`] - push/replace `/<group id>` routes and read the location
//! - [`Document`] - element geometry, window scroll, body scroll lock
//! - [`FrameScheduler`] - next-frame callbacks and timeouts with cancellation
//! - [`KeyboardEvent`] - keyboard input forwarded by the host
//!
//! # Example
//!
//! ```rust
//! use animdex_platform::*;
//!
//! let memory = MemoryHost::new("/lights-css");
//! let host = memory.host();
//!
//! assert_eq!(host.router.group_param().as_deref(), Some("lights-css"));
//! host.router.navigate("/modal-base-framer", NavigateOptions::push()).unwrap();
//! assert_eq!(memory.router.location(), "/modal-base-framer");
//! ```

mod document;
mod error;
mod input;
mod router;
mod scheduler;

use std::rc::Rc;

pub use document::{Document, MemoryDocument};
pub use error::{PlatformError, Result};
pub use input::{Key, KeyState, KeyboardEvent, Modifiers};
pub use router::{
    group_id_from_path, path_for_group, MemoryRouter, NavigateOptions, NavigationRecord, Router,
};
pub use scheduler::{FrameScheduler, ManualScheduler, Task, TaskId};

/// The host services a navigation controller runs against
#[derive(Clone)]
pub struct Host {
    pub router: Rc<dyn Router>,
    pub document: Rc<dyn Document>,
    pub scheduler: Rc<dyn FrameScheduler>,
}

impl Host {
    pub fn new(
        router: Rc<dyn Router>,
        document: Rc<dyn Document>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Self {
        Self {
            router,
            document,
            scheduler,
        }
    }
}

/// In-memory host; keeps concrete handles for inspection
#[derive(Clone, Debug)]
pub struct MemoryHost {
    pub router: MemoryRouter,
    pub document: MemoryDocument,
    pub scheduler: ManualScheduler,
}

impl MemoryHost {
    /// Host whose router starts at `location`
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            router: MemoryRouter::new(location),
            document: MemoryDocument::new(),
            scheduler: ManualScheduler::new(),
        }
    }

    /// Trait-object view sharing this host's state
    pub fn host(&self) -> Host {
        Host::new(
            Rc::new(self.router.clone()),
            Rc::new(self.document.clone()),
            Rc::new(self.scheduler.clone()),
        )
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new("/")
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::document::{Document, MemoryDocument};
    pub use crate::error::{PlatformError, Result};
    pub use crate::input::{Key, KeyState, KeyboardEvent, Modifiers};
    pub use crate::router::{MemoryRouter, NavigateOptions, Router};
    pub use crate::scheduler::{FrameScheduler, ManualScheduler, TaskId};
    pub use crate::{Host, MemoryHost};
}
