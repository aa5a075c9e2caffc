use foundation::Rect;

use crate::geometry::SvgViewport;
use crate::plan::ConnectorPlan;
use crate::presence::SectionPresence;

/// Live page as seen by the connector engine.
///
/// Measurement methods are called fresh on every pass; `apply` is the only
/// method that writes.
pub trait ConnectorSurface {
    fn viewport_width(&self) -> f64;

    fn presence(&self) -> SectionPresence;

    fn svg_viewport(&self) -> SvgViewport;

    /// Viewport rect of the first element matching `selector`.
    fn label_rect(&self, selector: &str) -> Option<Rect>;

    /// Whether the SVG contains an element with this id.
    fn has_element(&self, id: &str) -> bool;

    fn apply(&self, plan: &ConnectorPlan);
}
