//! Document boundary
//!
//! The scroll-sync side effect reads element geometry and writes the window
//! scroll position; the drawer locks body scrolling. Coordinates are CSS
//! pixels, `element_top` is viewport-relative like `getBoundingClientRect`.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Host document
pub trait Document {
    /// Viewport-relative top of the element with this id
    fn element_top(&self, id: &str) -> Option<f64>;

    /// Height of the first element matching `selector`
    fn element_height(&self, selector: &str) -> Option<f64>;

    /// Current vertical window scroll
    fn scroll_y(&self) -> f64;

    /// Jump the window to `y`
    fn scroll_to(&self, y: f64);

    /// Lock or restore body scrolling
    fn set_body_scroll_locked(&self, locked: bool);
}

#[derive(Debug, Default)]
struct DocumentState {
    /// Element id to page-relative top
    elements: FxHashMap<String, f64>,
    /// Selector to element height
    heights: FxHashMap<String, f64>,
    scroll_y: f64,
    max_scroll_y: Option<f64>,
    body_locked: bool,
    scrolls: Vec<f64>,
}

/// In-memory document for headless hosts and tests
///
/// Elements are placed at page offsets; `element_top` subtracts the current
/// scroll. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an element at a page offset
    pub fn insert_element(&self, id: impl Into<String>, page_top: f64) {
        self.state.borrow_mut().elements.insert(id.into(), page_top);
    }

    pub fn remove_element(&self, id: &str) {
        self.state.borrow_mut().elements.remove(id);
    }

    /// Register an element matched by `selector`
    pub fn set_element_height(&self, selector: impl Into<String>, height: f64) {
        self.state.borrow_mut().heights.insert(selector.into(), height);
    }

    /// Move the window without recording a scroll call
    pub fn set_scroll_y(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
    }

    /// Clamp scrolling to `[0, max]`
    pub fn set_max_scroll_y(&self, max: f64) {
        self.state.borrow_mut().max_scroll_y = Some(max);
    }

    pub fn is_body_scroll_locked(&self) -> bool {
        self.state.borrow().body_locked
    }

    /// Targets of every `scroll_to` call so far
    pub fn scroll_calls(&self) -> Vec<f64> {
        self.state.borrow().scrolls.clone()
    }
}

impl Document for MemoryDocument {
    fn element_top(&self, id: &str) -> Option<f64> {
        let state = self.state.borrow();
        state.elements.get(id).map(|top| top - state.scroll_y)
    }

    fn element_height(&self, selector: &str) -> Option<f64> {
        self.state.borrow().heights.get(selector).copied()
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn scroll_to(&self, y: f64) {
        let mut state = self.state.borrow_mut();
        let max = state.max_scroll_y.unwrap_or(f64::INFINITY);
        state.scroll_y = y.clamp(0.0, max);
        state.scrolls.push(y);
    }

    fn set_body_scroll_locked(&self, locked: bool) {
        self.state.borrow_mut().body_locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_top_is_viewport_relative() {
        let doc = MemoryDocument::new();
        doc.insert_element("group-lights-css", 900.0);
        assert_eq!(doc.element_top("group-lights-css"), Some(900.0));

        doc.scroll_to(400.0);
        assert_eq!(doc.element_top("group-lights-css"), Some(500.0));
        assert_eq!(doc.scroll_calls(), [400.0]);
    }

    #[test]
    fn test_missing_element() {
        let doc = MemoryDocument::new();
        doc.insert_element("a", 10.0);
        doc.remove_element("a");
        assert_eq!(doc.element_top("a"), None);
        assert_eq!(doc.element_height("[data-app-shell=\"bar\"]"), None);
    }

    #[test]
    fn test_scroll_clamps_to_bounds() {
        let doc = MemoryDocument::new();
        doc.set_max_scroll_y(1000.0);
        doc.scroll_to(5000.0);
        assert_eq!(doc.scroll_y(), 1000.0);
        doc.scroll_to(-20.0);
        assert_eq!(doc.scroll_y(), 0.0);
    }

    #[test]
    fn test_body_scroll_lock() {
        let doc = MemoryDocument::new();
        let handle = doc.clone();
        doc.set_body_scroll_locked(true);
        assert!(handle.is_body_scroll_locked());
        doc.set_body_scroll_locked(false);
        assert!(!handle.is_body_scroll_locked());
    }
}
