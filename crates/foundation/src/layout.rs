/// Viewport width (CSS px) below which the page uses its mobile layout.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Layout {
    Mobile,
    Desktop,
}

impl Layout {
    /// Pure partition of viewport width at `breakpoint_px`: strictly narrower is mobile.
    pub fn for_width(viewport_width: f64, breakpoint_px: f64) -> Self {
        if viewport_width < breakpoint_px {
            Layout::Mobile
        } else {
            Layout::Desktop
        }
    }

    pub fn for_viewport(viewport_width: f64) -> Self {
        Self::for_width(viewport_width, MOBILE_BREAKPOINT_PX)
    }

    pub fn is_mobile(self) -> bool {
        self == Layout::Mobile
    }
}

#[cfg(test)]
mod tests {
    use super::Layout;

    #[test]
    fn partitions_at_768() {
        assert_eq!(Layout::for_viewport(320.0), Layout::Mobile);
        assert_eq!(Layout::for_viewport(767.9), Layout::Mobile);
        assert_eq!(Layout::for_viewport(768.0), Layout::Desktop);
        assert_eq!(Layout::for_viewport(1920.0), Layout::Desktop);
    }
}
