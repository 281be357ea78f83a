//! Router boundary
//!
//! Routes follow the `/<group id>` convention. The navigation layer only
//! needs two things from a router: push or replace a path, and read the
//! current location.

use crate::error::{PlatformError, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// How a navigation affects history
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current entry instead of pushing a new one
    pub replace: bool,
}

impl NavigateOptions {
    pub fn push() -> Self {
        Self { replace: false }
    }

    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// Host router
pub trait Router {
    /// Navigate to `path`
    fn navigate(&self, path: &str, options: NavigateOptions) -> Result<()>;

    /// Current location path
    fn location(&self) -> String;

    /// The `group_id` route parameter of the current location
    fn group_param(&self) -> Option<String> {
        group_id_from_path(&self.location()).map(str::to_owned)
    }
}

/// Route path for a group
pub fn path_for_group(group_id: &str) -> String {
    format!("/{group_id}")
}

/// Extract the `group_id` parameter from a `/<group id>` path
///
/// Query strings and fragments are ignored. The root path has no parameter.
pub fn group_id_from_path(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segment = path.strip_prefix('/')?.split('/').next()?;
    (!segment.is_empty()).then_some(segment)
}

/// A recorded navigation call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRecord {
    pub path: String,
    pub replace: bool,
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
    index: usize,
    log: Vec<NavigationRecord>,
    /// Reason navigations are refused, if any
    blocked: Option<String>,
}

/// In-memory router with a history stack
///
/// Clones share the same history, so a test can keep one handle while the
/// controller owns another.
#[derive(Clone, Debug)]
pub struct MemoryRouter {
    state: Rc<RefCell<HistoryState>>,
}

impl MemoryRouter {
    /// Router positioned at `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(HistoryState {
                entries: vec![initial.into()],
                index: 0,
                log: Vec::new(),
                blocked: None,
            })),
        }
    }

    /// Every navigate call so far, in order
    pub fn navigations(&self) -> Vec<NavigationRecord> {
        self.state.borrow().log.clone()
    }

    /// Drop the recorded navigate calls; history is kept
    pub fn clear_navigations(&self) {
        self.state.borrow_mut().log.clear();
    }

    /// History entries up to and including the current one
    pub fn history(&self) -> Vec<String> {
        let state = self.state.borrow();
        state.entries[..=state.index].to_vec()
    }

    /// Step back one entry, like the browser back button
    ///
    /// Returns false at the start of history.
    pub fn back(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.index == 0 {
            return false;
        }
        state.index -= 1;
        true
    }

    /// Refuse every navigate call until [`unblock`](Self::unblock)
    ///
    /// Models a navigation guard; refused calls are not recorded.
    pub fn block(&self, reason: impl Into<String>) {
        self.state.borrow_mut().blocked = Some(reason.into());
    }

    pub fn unblock(&self) {
        self.state.borrow_mut().blocked = None;
    }

    /// Set the location without recording a navigate call
    ///
    /// Models the user typing a URL or following an external link.
    pub fn set_location(&self, path: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        let index = state.index;
        state.entries.truncate(index + 1);
        state.entries.push(path.into());
        state.index += 1;
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router for MemoryRouter {
    fn navigate(&self, path: &str, options: NavigateOptions) -> Result<()> {
        if !path.starts_with('/') {
            return Err(PlatformError::InvalidPath(path.to_string()));
        }

        let mut state = self.state.borrow_mut();
        if let Some(reason) = &state.blocked {
            return Err(PlatformError::Navigation(reason.clone()));
        }
        let index = state.index;
        state.entries.truncate(index + 1);
        if options.replace {
            state.entries[index] = path.to_string();
        } else {
            state.entries.push(path.to_string());
            state.index += 1;
        }
        state.log.push(NavigationRecord {
            path: path.to_string(),
            replace: options.replace,
        });

        tracing::trace!(path, replace = options.replace, "router navigate");
        Ok(())
    }

    fn location(&self) -> String {
        let state = self.state.borrow();
        state.entries[state.index].clone()
    }
}
