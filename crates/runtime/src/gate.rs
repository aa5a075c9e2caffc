//! Timer-holding wrappers that decide *when* a handler runs.
//!
//! - [`Debounce`]: run once, `delay` after the last trigger.
//! - [`FrameGate`]: run at most once per animation frame.
//! - [`Suppression`]: a flag that stays raised for a fixed window.
//!
//! Each wrapper owns at most one pending handle. Storing a new handle drops
//! the previous one, which cancels it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use foundation::time::Millis;

use crate::host::TimerHost;

pub struct Debounce<H: TimerHost> {
    host: H,
    delay: Millis,
    armed: Rc<Cell<bool>>,
    pending: RefCell<Option<H::Handle>>,
}

impl<H: TimerHost> Debounce<H> {
    pub fn new(host: H, delay: Millis) -> Self {
        Self {
            host,
            delay,
            armed: Rc::new(Cell::new(false)),
            pending: RefCell::new(None),
        }
    }

    pub fn delay(&self) -> Millis {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.armed.get()
    }

    /// Restarts the window. Only the callback from the last trigger runs.
    pub fn trigger(&self, callback: impl FnOnce() + 'static) {
        let armed = Rc::clone(&self.armed);
        armed.set(true);
        let handle = self.host.set_timeout(
            self.delay,
            Box::new(move || {
                armed.set(false);
                callback();
            }),
        );
        let previous = self.pending.replace(Some(handle));
        drop(previous);
    }

    pub fn cancel(&self) {
        let previous = self.pending.take();
        self.armed.set(false);
        drop(previous);
    }
}

pub struct FrameGate<H: TimerHost> {
    host: H,
    in_flight: Rc<Cell<bool>>,
    pending: RefCell<Option<H::Handle>>,
}

impl<H: TimerHost> FrameGate<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            in_flight: Rc::new(Cell::new(false)),
            pending: RefCell::new(None),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Schedules `callback` for the next frame unless one is already queued.
    ///
    /// Returns `false` when the request was absorbed by the queued frame.
    /// The flag is cleared before `callback` runs, so the callback may
    /// re-request.
    pub fn request(&self, callback: impl FnOnce() + 'static) -> bool {
        if self.in_flight.replace(true) {
            return false;
        }
        let in_flight = Rc::clone(&self.in_flight);
        let handle = self.host.request_frame(Box::new(move || {
            in_flight.set(false);
            callback();
        }));
        let previous = self.pending.replace(Some(handle));
        drop(previous);
        true
    }
}

pub struct Suppression<H: TimerHost> {
    host: H,
    window: Millis,
    active: Rc<Cell<bool>>,
    pending: RefCell<Option<H::Handle>>,
}

impl<H: TimerHost> Suppression<H> {
    pub fn new(host: H, window: Millis) -> Self {
        Self {
            host,
            window,
            active: Rc::new(Cell::new(false)),
            pending: RefCell::new(None),
        }
    }

    pub fn window(&self) -> Millis {
        self.window
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Raises the flag for one window, replacing any running window.
    ///
    /// `on_expire` runs when the window closes; a replaced window's callback
    /// never runs.
    pub fn arm(&self, on_expire: impl FnOnce() + 'static) {
        let active = Rc::clone(&self.active);
        active.set(true);
        let handle = self.host.set_timeout(
            self.window,
            Box::new(move || {
                active.set(false);
                on_expire();
            }),
        );
        let previous = self.pending.replace(Some(handle));
        drop(previous);
    }
}
