use std::cell::{Cell, RefCell};
use std::rc::Rc;

use foundation::time::Millis;
use runtime::TimerHost;

/// Share of the connector section that must be visible to start the reveal.
pub const REVEAL_THRESHOLD: f64 = 0.2;
pub const FALLBACK_LINE_LENGTH: f64 = 500.0;
pub const DRAW_LINE_ANIMATION: &str = "drawLine 1.5s ease-out forwards";
pub const MARKER_DELAY: Millis = Millis(300);
pub const DRAW_LINE_KEYFRAMES: &str = "@keyframes drawLine { to { stroke-dashoffset: 0; } }";

/// Inline style that hides a line behind its own dash and animates it in.
#[derive(Debug, Clone, PartialEq)]
pub struct LineReveal {
    pub dash: String,
    pub animation: &'static str,
}

impl LineReveal {
    /// `length` is the line's total length, when the element can report it.
    pub fn for_length(length: Option<f64>) -> Self {
        let length = length
            .filter(|l| l.is_finite() && *l > 0.0)
            .unwrap_or(FALLBACK_LINE_LENGTH);
        Self {
            dash: length.to_string(),
            animation: DRAW_LINE_ANIMATION,
        }
    }
}

pub trait RevealSurface {
    fn line_lengths(&self) -> Vec<Option<f64>>;

    /// Writes dash array, dash offset and animation for line `index`.
    fn style_line(&self, index: usize, reveal: &LineReveal);

    fn show_markers(&self);

    /// Stops watching the section; the reveal runs once.
    fn stop_observing(&self);
}

/// Draws the connector lines the first time their section scrolls into view.
pub struct ConnectorReveal<H: TimerHost, S: RevealSurface> {
    host: H,
    surface: S,
    revealed: Cell<bool>,
    markers: RefCell<Option<H::Handle>>,
}

impl<H: TimerHost, S: RevealSurface + 'static> ConnectorReveal<H, S> {
    pub fn new(host: H, surface: S) -> Rc<Self> {
        Rc::new(Self {
            host,
            surface,
            revealed: Cell::new(false),
            markers: RefCell::new(None),
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }

    /// Returns `false` if the reveal already ran.
    pub fn on_visible(self: &Rc<Self>) -> bool {
        if self.revealed.replace(true) {
            return false;
        }
        for (index, length) in self.surface.line_lengths().into_iter().enumerate() {
            self.surface.style_line(index, &LineReveal::for_length(length));
        }
        let this = Rc::clone(self);
        let handle = self.host.set_timeout(
            MARKER_DELAY,
            Box::new(move || this.surface.show_markers()),
        );
        let previous = self.markers.replace(Some(handle));
        drop(previous);
        self.surface.stop_observing();
        log::debug!("connector reveal started");
        true
    }
}
