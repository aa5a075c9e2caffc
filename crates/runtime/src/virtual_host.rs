use std::cell::RefCell;
use std::rc::{Rc, Weak};

use foundation::time::Millis;

use crate::frame::Frame;
use crate::host::TimerHost;

/// Deterministic [`TimerHost`] driven by explicit calls instead of a browser.
///
/// Timers fire only inside [`VirtualHost::advance`], in `(due, registration)`
/// order. Frame callbacks run only inside [`VirtualHost::run_frame`]; callbacks
/// requested while a frame is running are queued for the next frame, exactly
/// like `requestAnimationFrame`.
#[derive(Clone, Default)]
pub struct VirtualHost {
    inner: Rc<RefCell<Timeline>>,
}

#[derive(Default)]
struct Timeline {
    now: Millis,
    next_id: u64,
    timers: Vec<PendingTimer>,
    frames: Vec<(u64, Box<dyn FnOnce()>)>,
    frame: Frame,
}

struct PendingTimer {
    id: u64,
    due: Millis,
    callback: Box<dyn FnOnce()>,
}

/// Cancels its callback when dropped.
pub struct VirtualHandle {
    id: u64,
    timeline: Weak<RefCell<Timeline>>,
}

impl Drop for VirtualHandle {
    fn drop(&mut self) {
        let Some(timeline) = self.timeline.upgrade() else {
            return;
        };
        // The removed callback is dropped after the borrow ends; it may own
        // handles of its own.
        let removed = timeline.borrow_mut().cancel(self.id);
        drop(removed);
    }
}

impl Timeline {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn cancel(&mut self, id: u64) -> Option<Box<dyn FnOnce()>> {
        if let Some(pos) = self.timers.iter().position(|t| t.id == id) {
            return Some(self.timers.remove(pos).callback);
        }
        if let Some(pos) = self.frames.iter().position(|(fid, _)| *fid == id) {
            return Some(self.frames.remove(pos).1);
        }
        None
    }

    fn pop_due(&mut self, until: Millis) -> Option<PendingTimer> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(_, a), (_, b)| a.due.cmp(&b.due).then_with(|| a.id.cmp(&b.id)))
            .map(|(pos, _)| pos)?;
        Some(self.timers.remove(pos))
    }
}

impl VirtualHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.inner.borrow().now
    }

    pub fn frame(&self) -> Frame {
        self.inner.borrow().frame
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    /// Moves the clock forward by `by`, firing every timer that falls due.
    ///
    /// The clock reads each timer's due time while its callback runs, so
    /// timers scheduled from inside a callback are relative to that instant.
    pub fn advance(&self, by: Millis) {
        let until = self.now() + by;
        loop {
            let next = self.inner.borrow_mut().pop_due(until);
            let Some(timer) = next else {
                break;
            };
            self.inner.borrow_mut().now = timer.due;
            (timer.callback)();
        }
        self.inner.borrow_mut().now = until;
    }

    /// Runs one animation frame. Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let callbacks = {
            let mut timeline = self.inner.borrow_mut();
            let now = timeline.now;
            timeline.frame = timeline.frame.next(now);
            std::mem::take(&mut timeline.frames)
        };
        let ran = callbacks.len();
        for (_, callback) in callbacks {
            callback();
        }
        ran
    }

    /// Runs frames until none are pending, up to `max_frames`.
    pub fn run_frames(&self, max_frames: usize) -> usize {
        let mut ran = 0;
        for _ in 0..max_frames {
            if self.pending_frames() == 0 {
                break;
            }
            ran += self.run_frame();
        }
        ran
    }

    fn handle(&self, id: u64) -> VirtualHandle {
        VirtualHandle {
            id,
            timeline: Rc::downgrade(&self.inner),
        }
    }
}

impl TimerHost for VirtualHost {
    type Handle = VirtualHandle;

    fn set_timeout(&self, delay: Millis, callback: Box<dyn FnOnce()>) -> Self::Handle {
        let id = {
            let mut timeline = self.inner.borrow_mut();
            let id = timeline.allocate_id();
            let due = timeline.now + delay;
            timeline.timers.push(PendingTimer { id, due, callback });
            id
        };
        self.handle(id)
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Self::Handle {
        let id = {
            let mut timeline = self.inner.borrow_mut();
            let id = timeline.allocate_id();
            timeline.frames.push((id, callback));
            id
        };
        self.handle(id)
    }
}
