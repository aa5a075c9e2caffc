use foundation::Layout;
use foundation::math::Vec2;

use crate::anchor::FeatureAnchor;
use crate::geometry::{NotReady, SvgSpace, ViewportGeometry};
use crate::surface::ConnectorSurface;

/// Attribute writes for one connector.
#[derive(Debug, Clone, PartialEq)]
pub struct LineUpdate {
    pub line_id: String,
    pub marker_id: String,
    pub start: Vec2,
    pub end: Vec2,
    pub marker: Vec2,
}

impl LineUpdate {
    pub fn line_attributes(&self) -> [(&'static str, f64); 4] {
        [
            ("x1", self.start.x),
            ("y1", self.start.y),
            ("x2", self.end.x),
            ("y2", self.end.y),
        ]
    }

    pub fn marker_attributes(&self) -> [(&'static str, f64); 2] {
        [("cx", self.marker.x), ("cy", self.marker.y)]
    }
}

/// Result of one pass: what to write, and which anchors were left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorPlan {
    /// Layout every update in this plan was computed for.
    pub layout: Layout,
    pub updates: Vec<LineUpdate>,
    /// Label selectors of anchors skipped because an element was missing.
    pub skipped: Vec<String>,
}

/// Computes a full pass against the current page.
///
/// Fails only when the SVG itself is not measurable; a missing label, line
/// or marker just skips that anchor.
pub fn plan_connectors<S: ConnectorSurface + ?Sized>(
    anchors: &[FeatureAnchor],
    breakpoint_px: f64,
    surface: &S,
) -> Result<ConnectorPlan, NotReady> {
    let space = SvgSpace::resolve(&surface.svg_viewport())?;
    let layout = Layout::for_width(surface.viewport_width(), breakpoint_px);

    let mut updates = Vec::with_capacity(anchors.len());
    let mut skipped = Vec::new();
    for anchor in anchors {
        let Some(label) = surface.label_rect(&anchor.label_selector) else {
            log::warn!("connector label {} not found", anchor.label_selector);
            skipped.push(anchor.label_selector.clone());
            continue;
        };
        if !surface.has_element(&anchor.line_id) {
            log::warn!("connector line #{} not found", anchor.line_id);
            skipped.push(anchor.label_selector.clone());
            continue;
        }
        if !surface.has_element(&anchor.marker_id) {
            log::warn!("connector marker #{} not found", anchor.marker_id);
            skipped.push(anchor.label_selector.clone());
            continue;
        }

        let target = anchor.target_for(layout);
        updates.push(LineUpdate {
            line_id: anchor.line_id.clone(),
            marker_id: anchor.marker_id.clone(),
            start: ViewportGeometry::new(label, space).start_point(anchor, layout),
            end: target.end(),
            marker: target.marker(),
        });
    }

    Ok(ConnectorPlan {
        layout,
        updates,
        skipped,
    })
}
