use foundation::math::Vec2;
use foundation::{Layout, Rect};
use serde::{Deserialize, Serialize};

/// Which edge of its label a connector leaves from on desktop.
///
/// Labels left of the product image connect from their right edge and
/// vice versa.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Left,
    Right,
}

/// Line end point and marker centre, authored in SVG user units.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub x2: f64,
    pub y2: f64,
    pub cx: f64,
    pub cy: f64,
}

impl TargetPoint {
    pub fn new(x2: f64, y2: f64, cx: f64, cy: f64) -> Self {
        Self { x2, y2, cx, cy }
    }

    /// Marker sitting exactly on the line end.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }

    pub fn marker(&self) -> Vec2 {
        Vec2::new(self.cx, self.cy)
    }
}

/// One visual callout: a label, its connector line, and the line's marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAnchor {
    pub label_selector: String,
    pub line_id: String,
    pub marker_id: String,
    pub side: AnchorSide,
    pub desktop: TargetPoint,
    pub mobile: TargetPoint,
}

impl FeatureAnchor {
    /// Anchor following the page's naming convention for feature `name`:
    /// `.feature-label.<name>`, `#line-<name>`, `#marker-<name>`.
    pub fn named(name: &str, side: AnchorSide, desktop: TargetPoint, mobile: TargetPoint) -> Self {
        Self {
            label_selector: format!(".feature-label.{name}"),
            line_id: format!("line-{name}"),
            marker_id: format!("marker-{name}"),
            side,
            desktop,
            mobile,
        }
    }

    pub fn target_for(&self, layout: Layout) -> TargetPoint {
        match layout {
            Layout::Mobile => self.mobile,
            Layout::Desktop => self.desktop,
        }
    }

    /// Connector start in viewport coordinates.
    ///
    /// Mobile stacks labels above the image, so lines leave from the top
    /// centre of the label. Desktop uses the inner edge at mid-height.
    pub fn label_anchor(&self, label: Rect, layout: Layout) -> Vec2 {
        match layout {
            Layout::Mobile => Vec2::new(label.center_x(), label.top),
            Layout::Desktop => {
                let x = match self.side {
                    AnchorSide::Right => label.right(),
                    AnchorSide::Left => label.left,
                };
                Vec2::new(x, label.center_y())
            }
        }
    }
}

/// The four product callouts shipped with the landing page.
pub fn default_anchors() -> Vec<FeatureAnchor> {
    vec![
        FeatureAnchor::named(
            "high-res",
            AnchorSide::Right,
            TargetPoint::at(452.0, 168.0),
            TargetPoint::at(500.0, 236.0),
        ),
        FeatureAnchor::named(
            "forged-metal",
            AnchorSide::Right,
            TargetPoint::at(418.0, 372.0),
            TargetPoint::at(430.0, 420.0),
        ),
        FeatureAnchor::named(
            "providers",
            AnchorSide::Right,
            TargetPoint::at(470.0, 520.0),
            TargetPoint::at(500.0, 560.0),
        ),
        FeatureAnchor::named(
            "buttons",
            AnchorSide::Left,
            TargetPoint::at(566.0, 612.0),
            TargetPoint::at(540.0, 650.0),
        ),
    ]
}
