use std::cell::{Cell, RefCell};
use std::rc::Rc;

use foundation::time::Millis;
use runtime::{Debounce, Dispatch, EventKind, FrameGate, TimerHost};

use crate::config::ConnectorConfig;
use crate::surface::ConnectorSurface;
use crate::sync::{GeometrySync, SyncOutcome};

/// Decides when [`GeometrySync`] passes run.
///
/// - resize: debounced
/// - hash change, section visibility, subtree mutation: next frame,
///   coalesced so a frame runs at most one pass
/// - unmeasurable SVG: retried on the following frame, through the same
///   coalescing gate as the triggers above
/// - initial load: first frame plus a settle delay
pub struct ConnectorController<H: TimerHost, S: ConnectorSurface> {
    host: H,
    surface: S,
    sync: RefCell<GeometrySync>,
    resize: Debounce<H>,
    frame: FrameGate<H>,
    settle: RefCell<Option<H::Handle>>,
    settle_delay: Millis,
    passes: Cell<u64>,
}

impl<H: TimerHost, S: ConnectorSurface + 'static> ConnectorController<H, S> {
    pub fn new(host: H, surface: S, config: &ConnectorConfig) -> Rc<Self> {
        Rc::new(Self {
            resize: Debounce::new(host.clone(), Millis(config.resize_debounce_ms)),
            frame: FrameGate::new(host.clone()),
            host,
            surface,
            sync: RefCell::new(GeometrySync::new(config)),
            settle: RefCell::new(None),
            settle_delay: Millis(config.settle_delay_ms),
            passes: Cell::new(0),
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Passes that wrote to the page.
    pub fn passes(&self) -> u64 {
        self.passes.get()
    }

    /// Runs a pass immediately, scheduling a frame retry if the SVG is not
    /// measurable yet.
    pub fn recompute_now(self: &Rc<Self>) -> SyncOutcome {
        let outcome = self.sync.borrow_mut().recompute_all(&self.surface);
        match &outcome {
            SyncOutcome::Applied(_) => self.passes.set(self.passes.get() + 1),
            SyncOutcome::Retry(_) => self.schedule_retry(),
            SyncOutcome::Inactive | SyncOutcome::GaveUp(_) => {}
        }
        outcome
    }

    fn schedule_retry(self: &Rc<Self>) {
        if !self.request_pass() {
            log::trace!("retry absorbed by the queued frame pass");
        }
    }

    pub fn on_resize(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.resize.trigger(move || {
            this.recompute_now();
        });
    }

    /// Queues a pass for the next frame. Returns `false` if one is already queued.
    pub fn request_pass(self: &Rc<Self>) -> bool {
        let this = Rc::clone(self);
        self.frame.request(move || {
            this.recompute_now();
        })
    }

    /// First pass once layout has settled: next frame, then the settle delay.
    pub fn on_initial_load(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let handle = self.host.request_frame(Box::new(move || {
            let again = Rc::clone(&this);
            let timer = this.host.set_timeout(
                this.settle_delay,
                Box::new(move || {
                    again.recompute_now();
                }),
            );
            let previous = this.settle.replace(Some(timer));
            drop(previous);
        }));
        let previous = self.settle.replace(Some(handle));
        drop(previous);
    }

    pub fn install(self: &Rc<Self>, dispatch: &mut Dispatch) {
        let this = Rc::clone(self);
        dispatch.on(EventKind::Resize, move || this.on_resize());
        for kind in [
            EventKind::HashChange,
            EventKind::SectionVisible,
            EventKind::Mutation,
        ] {
            let this = Rc::clone(self);
            dispatch.on(kind, move || {
                this.request_pass();
            });
        }
    }
}
