use std::rc::Rc;

use connectors::{ConnectorConfig, ConnectorController, ConnectorPlan, ConnectorSurface, SectionPresence, SvgViewport};
use foundation::Rect;
use foundation::math::Affine2;
use js_sys::Array;
use runtime::{Dispatch, EventKind};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MutationObserver, MutationObserverInit, MutationRecord,
    SvgsvgElement, Window,
};

use crate::dom;
use crate::error::{Error, Result};
use crate::host::BrowserHost;

/// Visibility ratios at which the section counts as freshly shown.
const VISIBILITY_THRESHOLDS: [f64; 2] = [0.01, 0.5];

/// Attributes written by connector passes; mutations to them are our own.
const OWN_ATTRIBUTES: [&str; 6] = ["x1", "y1", "x2", "y2", "cx", "cy"];

pub struct DomConnectorSurface {
    window: Window,
    document: Document,
    section: Element,
    svg: SvgsvgElement,
}

impl DomConnectorSurface {
    pub fn new(window: Window, document: Document, config: &ConnectorConfig) -> Result<Self> {
        let section = dom::by_id(&document, &config.section_id)?;
        let svg = dom::query(&document, &config.svg_selector)
            .ok_or_else(|| Error::MissingElement(config.svg_selector.clone()))?
            .dyn_into::<SvgsvgElement>()
            .map_err(|_| Error::MissingElement(format!("{} (not an <svg>)", config.svg_selector)))?;
        Ok(Self {
            window,
            document,
            section,
            svg,
        })
    }

    /// Element `#id` inside the connector SVG; same-id nodes elsewhere on the
    /// page are not ours to move.
    fn svg_element(&self, id: &str) -> Option<Element> {
        self.svg.query_selector(&format!("#{id}")).ok().flatten()
    }
}

impl ConnectorSurface for DomConnectorSurface {
    fn viewport_width(&self) -> f64 {
        dom::viewport_size(&self.window).0
    }

    fn presence(&self) -> SectionPresence {
        let hash = self.window.location().hash().unwrap_or_default();
        SectionPresence {
            has_layout_box: self
                .section
                .dyn_ref::<HtmlElement>()
                .and_then(HtmlElement::offset_parent)
                .is_some(),
            fragment_matches: hash.strip_prefix('#') == Some(self.section.id().as_str()),
            marked_active: self.section.class_list().contains("active"),
        }
    }

    fn svg_viewport(&self) -> SvgViewport {
        let view_box = self.svg.view_box().base_val().map(|vb| {
            Rect::new(
                f64::from(vb.x()),
                f64::from(vb.y()),
                f64::from(vb.width()),
                f64::from(vb.height()),
            )
        });
        let screen_ctm = self.svg.get_screen_ctm().map(|m| {
            Affine2::new(
                f64::from(m.a()),
                f64::from(m.b()),
                f64::from(m.c()),
                f64::from(m.d()),
                f64::from(m.e()),
                f64::from(m.f()),
            )
        });
        SvgViewport {
            view_box,
            rendered: dom::client_rect(&self.svg),
            screen_ctm,
        }
    }

    fn label_rect(&self, selector: &str) -> Option<Rect> {
        dom::query(&self.document, selector).map(|label| dom::client_rect(&label))
    }

    fn has_element(&self, id: &str) -> bool {
        self.svg_element(id).is_some()
    }

    fn apply(&self, plan: &ConnectorPlan) {
        for update in &plan.updates {
            if let Some(line) = self.svg_element(&update.line_id) {
                for (name, value) in update.line_attributes() {
                    dom::set_attr(&line, name, &value.to_string());
                }
            }
            if let Some(marker) = self.svg_element(&update.marker_id) {
                for (name, value) in update.marker_attributes() {
                    dom::set_attr(&marker, name, &value.to_string());
                }
            }
        }
    }
}

/// Observers that turn section visibility and subtree edits into dispatch
/// events. Disconnected on drop.
pub struct SectionObservers {
    intersection: IntersectionObserver,
    mutation: MutationObserver,
    _on_intersect: Closure<dyn FnMut(Array, IntersectionObserver)>,
    _on_mutate: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl Drop for SectionObservers {
    fn drop(&mut self) {
        self.intersection.disconnect();
        self.mutation.disconnect();
    }
}

impl SectionObservers {
    fn observe(section: &Element) -> Result<Self> {
        let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            |entries: Array, _observer: IntersectionObserver| {
                let visible = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .any(|entry| entry.is_intersecting());
                if visible {
                    crate::emit(EventKind::SectionVisible);
                }
            },
        );
        let thresholds: Array = VISIBILITY_THRESHOLDS.iter().map(|t| JsValue::from_f64(*t)).collect();
        let init = IntersectionObserverInit::new();
        init.set_threshold(&thresholds);
        let intersection =
            IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;
        intersection.observe(section);

        let on_mutate = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            |records: Array, _observer: MutationObserver| {
                let relevant = records
                    .iter()
                    .filter_map(|record| record.dyn_into::<MutationRecord>().ok())
                    .any(|record| {
                        let attribute = record.attribute_name();
                        is_layout_mutation(&record.type_(), attribute.as_deref())
                    });
                if relevant {
                    crate::emit(EventKind::Mutation);
                }
            },
        );
        let mutation = MutationObserver::new(on_mutate.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_attributes(true);
        options.set_child_list(true);
        options.set_subtree(true);
        options.set_character_data(true);
        mutation.observe_with_options(section, &options)?;

        Ok(Self {
            intersection,
            mutation,
            _on_intersect: on_intersect,
            _on_mutate: on_mutate,
        })
    }
}

/// Whether a mutation record of `kind` can move a label or resize the SVG.
/// Writes to the connector's own coordinate attributes do not count.
pub fn is_layout_mutation(kind: &str, attribute: Option<&str>) -> bool {
    match kind {
        "childList" | "characterData" => true,
        "attributes" => !attribute.is_some_and(|name| OWN_ATTRIBUTES.contains(&name)),
        _ => false,
    }
}

pub struct ConnectorBindings {
    pub controller: Rc<ConnectorController<BrowserHost, DomConnectorSurface>>,
    _observers: SectionObservers,
}

/// Wires the connector engine to the page and schedules its first pass.
pub fn install(
    window: &Window,
    document: &Document,
    config: &ConnectorConfig,
    dispatch: &mut Dispatch,
) -> Result<ConnectorBindings> {
    let surface = DomConnectorSurface::new(window.clone(), document.clone(), config)?;
    let observers = SectionObservers::observe(&surface.section)?;
    let controller = ConnectorController::new(BrowserHost, surface, config);
    controller.install(dispatch);
    controller.on_initial_load();
    log::debug!("connectors installed for {} anchors", config.anchors.len());
    Ok(ConnectorBindings {
        controller,
        _observers: observers,
    })
}
