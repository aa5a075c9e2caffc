use foundation::math::{Affine2, Vec2};
use foundation::{Layout, Rect};
use thiserror::Error;

use crate::anchor::FeatureAnchor;

/// Raw measurements of the connector SVG, as read in one pass.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SvgViewport {
    /// `viewBox.baseVal`, if the element has one.
    pub view_box: Option<Rect>,
    /// `getBoundingClientRect()` of the SVG element.
    pub rendered: Rect,
    /// `getScreenCTM()`: user space to viewport pixels.
    pub screen_ctm: Option<Affine2>,
}

/// Why the SVG cannot be measured yet. The pass should be retried on a later
/// frame.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum NotReady {
    #[error("svg viewBox is not established")]
    ViewBox,
    #[error("svg has no rendered size")]
    ZeroSize,
    #[error("svg screen transform is unavailable")]
    ScreenTransform,
    #[error("svg screen transform is not invertible")]
    SingularTransform,
}

/// Screen transform of the SVG and its inverse, valid for a single pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SvgSpace {
    screen: Affine2,
    inverse: Affine2,
}

impl SvgSpace {
    pub fn resolve(svg: &SvgViewport) -> Result<Self, NotReady> {
        if !svg.view_box.is_some_and(|vb| !vb.is_empty()) {
            return Err(NotReady::ViewBox);
        }
        if svg.rendered.is_empty() {
            return Err(NotReady::ZeroSize);
        }
        let screen = svg.screen_ctm.ok_or(NotReady::ScreenTransform)?;
        let inverse = screen.inverse().ok_or(NotReady::SingularTransform)?;
        Ok(Self { screen, inverse })
    }

    pub fn screen(&self) -> Affine2 {
        self.screen
    }

    /// Viewport pixels to SVG user units.
    pub fn to_user(&self, viewport_point: Vec2) -> Vec2 {
        self.inverse.apply(viewport_point)
    }
}

/// Everything one anchor needs from the live layout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportGeometry {
    pub label: Rect,
    pub space: SvgSpace,
}

impl ViewportGeometry {
    pub fn new(label: Rect, space: SvgSpace) -> Self {
        Self { label, space }
    }

    /// Line start in SVG user units.
    pub fn start_point(&self, anchor: &FeatureAnchor, layout: Layout) -> Vec2 {
        self.space.to_user(anchor.label_anchor(self.label, layout))
    }
}

#[cfg(test)]
mod tests {
    use super::{NotReady, SvgSpace, SvgViewport, ViewportGeometry};
    use crate::anchor::{AnchorSide, FeatureAnchor, TargetPoint};
    use foundation::math::{Affine2, Vec2};
    use foundation::{Layout, Rect};

    fn ready_svg() -> SvgViewport {
        SvgViewport {
            view_box: Some(Rect::new(0.0, 0.0, 1000.0, 800.0)),
            rendered: Rect::new(100.0, 50.0, 500.0, 400.0),
            screen_ctm: Some(Affine2::new(0.5, 0.0, 0.0, 0.5, 100.0, 50.0)),
        }
    }

    #[test]
    fn resolve_reports_first_missing_precondition() {
        let mut svg = ready_svg();
        svg.view_box = None;
        assert_eq!(SvgSpace::resolve(&svg), Err(NotReady::ViewBox));

        let mut svg = ready_svg();
        svg.rendered = Rect::new(100.0, 50.0, 0.0, 400.0);
        assert_eq!(SvgSpace::resolve(&svg), Err(NotReady::ZeroSize));

        let mut svg = ready_svg();
        svg.screen_ctm = None;
        assert_eq!(SvgSpace::resolve(&svg), Err(NotReady::ScreenTransform));

        let mut svg = ready_svg();
        svg.screen_ctm = Some(Affine2::scale(0.0, 0.0));
        assert_eq!(SvgSpace::resolve(&svg), Err(NotReady::SingularTransform));
    }

    #[test]
    fn maps_viewport_points_into_user_space() {
        let space = SvgSpace::resolve(&ready_svg()).unwrap();
        assert_eq!(space.to_user(Vec2::new(300.0, 150.0)), Vec2::new(400.0, 200.0));
        assert_eq!(space.screen().apply(Vec2::new(400.0, 200.0)), Vec2::new(300.0, 150.0));
    }

    #[test]
    fn start_point_transforms_label_edge() {
        let space = SvgSpace::resolve(&ready_svg()).unwrap();
        let anchor = FeatureAnchor::named(
            "x",
            AnchorSide::Right,
            TargetPoint::at(0.0, 0.0),
            TargetPoint::at(0.0, 0.0),
        );
        let geometry = ViewportGeometry::new(Rect::new(20.0, 90.0, 80.0, 20.0), space);
        // Right edge (100, 100) in viewport -> (0, 100) in user space.
        assert_eq!(
            geometry.start_point(&anchor, Layout::Desktop),
            Vec2::new(0.0, 100.0)
        );
    }
}
