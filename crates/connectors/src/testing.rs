use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use foundation::Rect;
use foundation::math::Affine2;

use crate::anchor::FeatureAnchor;
use crate::geometry::SvgViewport;
use crate::plan::ConnectorPlan;
use crate::presence::SectionPresence;
use crate::surface::ConnectorSurface;

/// In-memory page: labels stacked down the left edge, SVG at the origin with
/// an identity screen transform.
pub(crate) struct FakeSurface {
    pub width: Cell<f64>,
    pub presence: Cell<SectionPresence>,
    pub svg: Cell<SvgViewport>,
    labels: RefCell<BTreeMap<String, Rect>>,
    elements: RefCell<BTreeSet<String>>,
    pub applied: RefCell<Vec<ConnectorPlan>>,
}

impl FakeSurface {
    pub fn ready(anchors: &[FeatureAnchor]) -> Self {
        let mut labels = BTreeMap::new();
        let mut elements = BTreeSet::new();
        for (i, anchor) in anchors.iter().enumerate() {
            labels.insert(
                anchor.label_selector.clone(),
                Rect::new(0.0, 100.0 + i as f64 * 60.0, 120.0, 40.0),
            );
            elements.insert(anchor.line_id.clone());
            elements.insert(anchor.marker_id.clone());
        }
        Self {
            width: Cell::new(1280.0),
            presence: Cell::new(SectionPresence {
                has_layout_box: true,
                ..SectionPresence::default()
            }),
            svg: Cell::new(SvgViewport {
                view_box: Some(Rect::new(0.0, 0.0, 1000.0, 800.0)),
                rendered: Rect::new(0.0, 0.0, 1000.0, 800.0),
                screen_ctm: Some(Affine2::IDENTITY),
            }),
            labels: RefCell::new(labels),
            elements: RefCell::new(elements),
            applied: RefCell::new(Vec::new()),
        }
    }

    pub fn remove_label(&self, selector: &str) {
        self.labels.borrow_mut().remove(selector);
    }

    pub fn remove_element(&self, id: &str) {
        self.elements.borrow_mut().remove(id);
    }

    pub fn move_label(&self, selector: &str, rect: Rect) {
        self.labels.borrow_mut().insert(selector.to_string(), rect);
    }

    pub fn hide_svg(&self) {
        let mut svg = self.svg.get();
        svg.rendered = Rect::new(0.0, 0.0, 0.0, 0.0);
        self.svg.set(svg);
    }

    pub fn show_svg(&self) {
        let mut svg = self.svg.get();
        svg.rendered = Rect::new(0.0, 0.0, 1000.0, 800.0);
        self.svg.set(svg);
    }

    pub fn apply_count(&self) -> usize {
        self.applied.borrow().len()
    }
}

impl ConnectorSurface for FakeSurface {
    fn viewport_width(&self) -> f64 {
        self.width.get()
    }

    fn presence(&self) -> SectionPresence {
        self.presence.get()
    }

    fn svg_viewport(&self) -> SvgViewport {
        self.svg.get()
    }

    fn label_rect(&self, selector: &str) -> Option<Rect> {
        self.labels.borrow().get(selector).copied()
    }

    fn has_element(&self, id: &str) -> bool {
        self.elements.borrow().contains(id)
    }

    fn apply(&self, plan: &ConnectorPlan) {
        self.applied.borrow_mut().push(plan.clone());
    }
}
