//! Scroll sync
//!
//! Brings the current group's section under the app bar. The attempt runs on
//! the next frame; if the section is not rendered yet it is retried once after
//! [`NavConfig::retry_delay`] and then given up. Scheduling again, or
//! cancelling, drops whatever is still pending, so only the latest group is
//! ever scrolled to.

use crate::config::NavConfig;
use animdex_platform::{Document, FrameScheduler, TaskId};
use std::cell::RefCell;
use std::rc::Rc;

/// Result of one scroll attempt
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollOutcome {
    /// The window was moved to this offset
    Scrolled(f64),
    /// Already within tolerance of the target
    InPlace,
    /// No element with the section id
    Missing,
}

/// Scroll the section with `element_id` under the app bar
///
/// Target is the section's page offset minus the app bar height and the
/// configured extra offset, clamped at zero.
pub fn scroll_into_view(
    document: &dyn Document,
    config: &NavConfig,
    element_id: &str,
) -> ScrollOutcome {
    let Some(top) = document.element_top(element_id) else {
        return ScrollOutcome::Missing;
    };

    let app_bar = document.element_height(&config.app_bar_selector).unwrap_or(0.0);
    let scroll_y = document.scroll_y();
    let target = (top + scroll_y - app_bar - config.scroll_extra_offset).max(0.0);

    if (scroll_y - target).abs() > config.scroll_tolerance {
        document.scroll_to(target);
        ScrollOutcome::Scrolled(target)
    } else {
        ScrollOutcome::InPlace
    }
}

#[derive(Debug, Default)]
struct Pending {
    frame: Option<TaskId>,
    retry: Option<TaskId>,
}

/// Schedules scroll attempts for the current group
pub struct ScrollSync {
    document: Rc<dyn Document>,
    scheduler: Rc<dyn FrameScheduler>,
    config: Rc<NavConfig>,
    pending: Rc<RefCell<Pending>>,
}

impl ScrollSync {
    pub fn new(
        document: Rc<dyn Document>,
        scheduler: Rc<dyn FrameScheduler>,
        config: Rc<NavConfig>,
    ) -> Self {
        Self {
            document,
            scheduler,
            config,
            pending: Rc::new(RefCell::new(Pending::default())),
        }
    }

    /// Scroll to `group_id` on the next frame, replacing any pending attempt
    pub fn schedule(&self, group_id: &str) {
        self.cancel();
        if group_id.is_empty() {
            return;
        }

        let element_id = self.config.group_element_id(group_id);
        let document = Rc::clone(&self.document);
        let scheduler = Rc::clone(&self.scheduler);
        let config = Rc::clone(&self.config);
        let pending = Rc::clone(&self.pending);

        let frame = self.scheduler.request_frame(Box::new(move || {
            pending.borrow_mut().frame = None;
            match scroll_into_view(&*document, &config, &element_id) {
                ScrollOutcome::Missing => {
                    tracing::trace!(element = %element_id, "section not rendered, retrying");
                    let retry = schedule_retry(
                        document,
                        &scheduler,
                        config,
                        element_id,
                        Rc::clone(&pending),
                    );
                    pending.borrow_mut().retry = Some(retry);
                }
                outcome => tracing::trace!(element = %element_id, ?outcome, "scroll sync"),
            }
        }));
        self.pending.borrow_mut().frame = Some(frame);
    }

    /// Drop any pending frame or retry
    ///
    /// Returns true if something was cancelled.
    pub fn cancel(&self) -> bool {
        let Pending { frame, retry } = std::mem::take(&mut *self.pending.borrow_mut());
        let mut cancelled = false;
        for id in frame.into_iter().chain(retry) {
            cancelled |= self.scheduler.cancel(id);
        }
        cancelled
    }

    /// Whether an attempt is still scheduled
    pub fn is_pending(&self) -> bool {
        let pending = self.pending.borrow();
        pending.frame.is_some() || pending.retry.is_some()
    }
}

fn schedule_retry(
    document: Rc<dyn Document>,
    scheduler: &Rc<dyn FrameScheduler>,
    config: Rc<NavConfig>,
    element_id: String,
    pending: Rc<RefCell<Pending>>,
) -> TaskId {
    let delay = config.retry_delay();
    scheduler.set_timeout(
        delay,
        Box::new(move || {
            pending.borrow_mut().retry = None;
            if scroll_into_view(&*document, &config, &element_id) == ScrollOutcome::Missing {
                tracing::debug!(element = %element_id, "section still missing, giving up");
            }
        }),
    )
}

impl Drop for ScrollSync {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ScrollSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSync")
            .field("pending", &*self.pending.borrow())
            .finish()
    }
}
