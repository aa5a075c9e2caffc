use foundation::Rect;

/// Transition used when the indicator slides between links.
pub const INDICATOR_TRANSITION: &str = "transform 0.4s cubic-bezier(0.25, 0.1, 0.25, 1), \
     width 0.4s cubic-bezier(0.25, 0.1, 0.25, 1), \
     opacity 0.4s cubic-bezier(0.25, 0.1, 0.25, 1)";

/// Size and offset of the underline beneath the active nav item, relative to
/// the nav element.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IndicatorPlacement {
    pub width: f64,
    pub offset_x: f64,
    /// `false` places the indicator without a transition (resize, load).
    pub animate: bool,
}

impl IndicatorPlacement {
    pub fn under(target: Rect, nav: Rect, animate: bool) -> Self {
        Self {
            width: target.width,
            offset_x: target.left - nav.left,
            animate,
        }
    }

    pub fn width_css(&self) -> String {
        format!("{}px", self.width)
    }

    pub fn transform_css(&self) -> String {
        format!("translateX({}px)", self.offset_x)
    }

    pub fn transition_css(&self) -> &'static str {
        if self.animate {
            INDICATOR_TRANSITION
        } else {
            "none"
        }
    }
}
