use std::rc::Rc;

use foundation::time::Millis;
use runtime::{Debounce, TimerHost};

pub const FRAME_PADDING_X: f64 = 24.0;
pub const FRAME_PADDING_Y: f64 = 16.0;
/// Delay used to approximate `scrollend` where the browser lacks it.
pub const SCROLL_SETTLE: Millis = Millis(66);

/// Layout box of one logo inside the slider track (`offset*` properties).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LogoBox {
    pub offset_left: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

impl LogoBox {
    pub fn new(offset_left: f64, offset_width: f64, offset_height: f64) -> Self {
        Self {
            offset_left,
            offset_width,
            offset_height,
        }
    }

    pub fn center(&self) -> f64 {
        self.offset_left + self.offset_width / 2.0
    }
}

/// Index of the logo closest to the centre of the track's scrollport.
/// Ties go to the earlier logo.
pub fn centered_logo(scroll_left: f64, client_width: f64, logos: &[LogoBox]) -> Option<usize> {
    let scrollport_center = scroll_left + client_width / 2.0;
    let mut best: Option<(usize, f64)> = None;
    for (index, logo) in logos.iter().enumerate() {
        let distance = (logo.center() - scrollport_center).abs();
        match best {
            Some((_, min)) if distance >= min => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Size of the highlight frame drawn around the centred logo.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

impl FrameSize {
    pub const FALLBACK: FrameSize = FrameSize {
        width: 160.0,
        height: 100.0,
    };

    pub fn around(logo: &LogoBox) -> Self {
        Self {
            width: logo.offset_width + FRAME_PADDING_X,
            height: logo.offset_height + FRAME_PADDING_Y,
        }
    }

    pub fn width_css(&self) -> String {
        format!("{}px", self.width)
    }

    pub fn height_css(&self) -> String {
        format!("{}px", self.height)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SliderPlan {
    pub centered: Option<usize>,
    pub frame: FrameSize,
}

pub fn plan_slider(scroll_left: f64, client_width: f64, logos: &[LogoBox]) -> SliderPlan {
    let centered = centered_logo(scroll_left, client_width, logos);
    let frame = centered
        .and_then(|index| logos.get(index))
        .map_or(FrameSize::FALLBACK, FrameSize::around);
    SliderPlan { centered, frame }
}

pub trait SliderSurface {
    /// `(scrollLeft, clientWidth)` of the track.
    fn scrollport(&self) -> (f64, f64);

    fn logos(&self) -> Vec<LogoBox>;

    /// Moves `is-centered-logo` and writes the frame custom properties.
    fn apply(&self, plan: &SliderPlan);
}

/// Keeps the centred-logo highlight in step with the track's scroll position.
pub struct LogoSlider<H: TimerHost, S: SliderSurface> {
    surface: S,
    settle: Debounce<H>,
}

impl<H: TimerHost, S: SliderSurface + 'static> LogoSlider<H, S> {
    pub fn new(host: H, surface: S) -> Rc<Self> {
        Rc::new(Self {
            surface,
            settle: Debounce::new(host, SCROLL_SETTLE),
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn refresh(&self) -> SliderPlan {
        let (scroll_left, client_width) = self.surface.scrollport();
        let plan = plan_slider(scroll_left, client_width, &self.surface.logos());
        log::trace!("slider centred on {:?}", plan.centered);
        self.surface.apply(&plan);
        plan
    }

    /// Raw `scroll` events, used when `scrollend` is unavailable.
    pub fn on_scroll(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.settle.trigger(move || {
            this.refresh();
        });
    }

    pub fn on_scroll_end(&self) {
        self.settle.cancel();
        self.refresh();
    }
}
