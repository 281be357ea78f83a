//! Frame and timer scheduling
//!
//! The host equivalent of `requestAnimationFrame` and `setTimeout`. Every
//! request returns a [`TaskId`] that can be cancelled until the task runs.
//!
//! [`ManualScheduler`] never runs anything on its own: the host (or a test)
//! calls [`ManualScheduler::run_frame`] and [`ManualScheduler::advance`].

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

new_key_type! {
    /// Handle to a pending frame callback or timer
    pub struct TaskId;
}

/// A scheduled callback
pub type Task = Box<dyn FnOnce()>;

/// Host scheduler
pub trait FrameScheduler {
    /// Run `task` before the next frame is painted
    fn request_frame(&self, task: Task) -> TaskId;

    /// Run `task` once `delay` has elapsed
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskId;

    /// Cancel a pending task
    ///
    /// Returns false if it already ran or was cancelled.
    fn cancel(&self, id: TaskId) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum When {
    Frame,
    At(Duration),
}

struct Pending {
    when: When,
    /// Submission order, breaks ties
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct SchedulerInner {
    tasks: SlotMap<TaskId, Pending>,
    now: Duration,
    next_seq: u64,
    frame: u64,
}

impl SchedulerInner {
    fn push(&mut self, when: When, task: Task) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert(Pending { when, seq, task })
    }

    /// Earliest timer due at or before `deadline`
    fn next_due(&self, deadline: Duration) -> Option<(TaskId, Duration)> {
        self.tasks
            .iter()
            .filter_map(|(id, p)| match p.when {
                When::At(at) if at <= deadline => Some((id, at, p.seq)),
                _ => None,
            })
            .min_by_key(|&(_, at, seq)| (at, seq))
            .map(|(id, at, _)| (id, at))
    }
}

/// Deterministic scheduler driven by explicit frame and clock steps
///
/// Tasks run with no internal borrow held, so a task may schedule or cancel
/// other tasks. Clones share the same queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the scheduler clock
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of frames run so far
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame
    }

    pub fn pending_frames(&self) -> usize {
        self.count(|w| w == When::Frame)
    }

    pub fn pending_timers(&self) -> usize {
        self.count(|w| matches!(w, When::At(_)))
    }

    /// Whether nothing is scheduled
    pub fn is_idle(&self) -> bool {
        self.inner.borrow().tasks.is_empty()
    }

    /// Run the frame callbacks requested before this call
    ///
    /// Callbacks requested while the frame runs wait for the next frame.
    /// Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let mut due: Vec<(u64, TaskId)> = {
            let mut inner = self.inner.borrow_mut();
            inner.frame += 1;
            inner
                .tasks
                .iter()
                .filter(|(_, p)| p.when == When::Frame)
                .map(|(id, p)| (p.seq, id))
                .collect()
        };
        due.sort_unstable();

        let mut ran = 0;
        for (_, id) in due {
            // An earlier callback may have cancelled this one
            let Some(pending) = self.inner.borrow_mut().tasks.remove(id) else {
                continue;
            };
            (pending.task)();
            ran += 1;
        }
        tracing::trace!(ran, "frame callbacks");
        ran
    }

    /// Move the clock forward, running timers as they come due
    ///
    /// Timers scheduled by a running timer also fire if they fall inside the
    /// window. Returns how many ran.
    pub fn advance(&self, by: Duration) -> usize {
        let deadline = self.inner.borrow().now + by;
        let mut ran = 0;

        loop {
            let pending = {
                let mut inner = self.inner.borrow_mut();
                let Some((id, at)) = inner.next_due(deadline) else {
                    break;
                };
                inner.now = at;
                inner.tasks.remove(id)
            };
            if let Some(pending) = pending {
                (pending.task)();
                ran += 1;
            }
        }

        self.inner.borrow_mut().now = deadline;
        ran
    }

    fn count(&self, pred: impl Fn(When) -> bool) -> usize {
        self.inner
            .borrow()
            .tasks
            .values()
            .filter(|p| pred(p.when))
            .count()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, task: Task) -> TaskId {
        self.inner.borrow_mut().push(When::Frame, task)
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> TaskId {
        let mut inner = self.inner.borrow_mut();
        let at = inner.now + delay;
        inner.push(When::At(at), task)
    }

    fn cancel(&self, id: TaskId) -> bool {
        self.inner.borrow_mut().tasks.remove(id).is_some()
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &inner.now)
            .field("frame", &inner.frame)
            .field("pending", &inner.tasks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Task) {
        let hits = Rc::new(Cell::new(0));
        let make = {
            let hits = Rc::clone(&hits);
            move || -> Task {
                let hits = Rc::clone(&hits);
                Box::new(move || hits.set(hits.get() + 1))
            }
        };
        (hits, make)
    }

    #[test]
    fn test_frame_callbacks_run_once() {
        let scheduler = ManualScheduler::new();
        let (hits, task) = counter();

        scheduler.request_frame(task());
        scheduler.request_frame(task());
        assert_eq!(scheduler.pending_frames(), 2);

        assert_eq!(scheduler.run_frame(), 2);
        assert_eq!(scheduler.run_frame(), 0);
        assert_eq!(hits.get(), 2);
        assert_eq!(scheduler.frame_count(), 2);
    }

    #[test]
    fn test_frame_requested_during_frame_waits() {
        let scheduler = ManualScheduler::new();
        let (hits, task) = counter();

        let inner = scheduler.clone();
        let next = task();
        scheduler.request_frame(Box::new(move || {
            inner.request_frame(next);
        }));

        scheduler.run_frame();
        assert_eq!(hits.get(), 0);
        scheduler.run_frame();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_timeout_fires_at_deadline() {
        let scheduler = ManualScheduler::new();
        let (hits, task) = counter();

        scheduler.set_timeout(Duration::from_millis(360), task());
        assert_eq!(scheduler.advance(Duration::from_millis(359)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.now(), Duration::from_millis(360));
    }

    #[test]
    fn test_timers_run_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (label, ms) in [("late", 300), ("early", 100), ("tie", 100)] {
            let order = Rc::clone(&order);
            scheduler.set_timeout(
                Duration::from_millis(ms),
                Box::new(move || order.borrow_mut().push(label)),
            );
        }

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(*order.borrow(), ["early", "tie", "late"]);
    }

    #[test]
    fn test_cancel() {
        let scheduler = ManualScheduler::new();
        let (hits, task) = counter();

        let frame = scheduler.request_frame(task());
        let timer = scheduler.set_timeout(Duration::from_millis(10), task());
        assert!(scheduler.cancel(frame));
        assert!(scheduler.cancel(timer));
        assert!(!scheduler.cancel(timer));

        scheduler.run_frame();
        scheduler.advance(Duration::from_millis(50));
        assert_eq!(hits.get(), 0);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_nested_timer_inside_window_fires() {
        let scheduler = ManualScheduler::new();
        let (hits, task) = counter();

        let inner = scheduler.clone();
        let next = task();
        scheduler.set_timeout(
            Duration::from_millis(10),
            Box::new(move || {
                inner.set_timeout(Duration::from_millis(10), next);
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(hits.get(), 1);
    }
}
