use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use js_sys::{Array, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, SvgGeometryElement, Window,
};
use widgets::{
    ConnectorReveal, DRAW_LINE_KEYFRAMES, DrawerState, HOVER_TRANSITION, Hover, LOGOS_OPEN_CLASS,
    LineReveal, LogoBox, LogoSlider, LogosDrawer, REVEAL_THRESHOLD, RevealSurface, SliderPlan,
    SliderSurface, feature_info,
};

use crate::config::WidgetConfig;
use crate::dom;
use crate::error::{Error, Result};
use crate::host::BrowserHost;

const CENTERED_LOGO_CLASS: &str = "is-centered-logo";

pub struct DomSliderSurface {
    container: HtmlElement,
    track: HtmlElement,
    logos: Vec<HtmlElement>,
}

impl DomSliderSurface {
    fn new(document: &Document, config: &WidgetConfig) -> Result<Self> {
        let html = |selector: &str| {
            dom::query(document, selector)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .ok_or_else(|| Error::MissingElement(selector.to_string()))
        };
        let container = html(&config.slider_container_selector)?;
        let track = html(&config.slider_track_selector)?;
        let logos: Vec<HtmlElement> = dom::query_all_in(&track, &config.slider_logo_selector)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        if logos.is_empty() {
            return Err(Error::MissingElement(config.slider_logo_selector.clone()));
        }
        Ok(Self {
            container,
            track,
            logos,
        })
    }

    /// Resolves once every logo image has loaded or failed.
    fn images_settled(&self) -> Promise {
        let pending: Array = self
            .logos
            .iter()
            .filter_map(|logo| logo.dyn_ref::<HtmlImageElement>())
            .filter(|img| !img.complete())
            .map(|img| {
                Promise::new(&mut |resolve, _reject| {
                    img.set_onload(Some(&resolve));
                    img.set_onerror(Some(&resolve));
                })
            })
            .collect();
        Promise::all(&pending)
    }
}

impl SliderSurface for DomSliderSurface {
    fn scrollport(&self) -> (f64, f64) {
        (
            f64::from(self.track.scroll_left()),
            f64::from(self.track.client_width()),
        )
    }

    fn logos(&self) -> Vec<LogoBox> {
        self.logos
            .iter()
            .map(|logo| {
                LogoBox::new(
                    f64::from(logo.offset_left()),
                    f64::from(logo.offset_width()),
                    f64::from(logo.offset_height()),
                )
            })
            .collect()
    }

    fn apply(&self, plan: &SliderPlan) {
        for (index, logo) in self.logos.iter().enumerate() {
            dom::set_class(logo, CENTERED_LOGO_CLASS, plan.centered == Some(index));
        }
        dom::set_style(&self.container, "--frame-width", &plan.frame.width_css());
        dom::set_style(&self.container, "--frame-height", &plan.frame.height_css());
    }
}

fn install_slider(
    document: &Document,
    config: &WidgetConfig,
    listeners: &mut Vec<EventListener>,
) -> Result<Rc<LogoSlider<BrowserHost, DomSliderSurface>>> {
    let surface = DomSliderSurface::new(document, config)?;
    let track = surface.track.clone();
    let settled = surface.images_settled();
    let slider = LogoSlider::new(BrowserHost, surface);

    let supports_scrollend = js_sys::Reflect::has(&track, &JsValue::from_str("onscrollend")).unwrap_or(false);
    let handler = Rc::clone(&slider);
    let listener = if supports_scrollend {
        EventListener::new(&track, "scrollend", move |_| handler.on_scroll_end())
    } else {
        EventListener::new_with_options(
            &track,
            "scroll",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: true,
            },
            move |_| handler.on_scroll(),
        )
    };
    listeners.push(listener);

    let initial = Rc::clone(&slider);
    spawn_local(async move {
        if let Err(err) = JsFuture::from(settled).await {
            log::debug!("logo images settled with error: {err:?}");
        }
        initial.refresh();
    });
    Ok(slider)
}

fn install_drawer(
    document: &Document,
    config: &WidgetConfig,
    listeners: &mut Vec<EventListener>,
) -> Result<()> {
    let button = dom::by_id(document, &config.drawer_toggle_id)?;
    let body = document.body().ok_or(Error::NoDocument)?;
    let drawer = RefCell::new(LogosDrawer::with_state(
        body.class_list().contains(LOGOS_OPEN_CLASS),
    ));
    let target = button.clone();
    listeners.push(EventListener::new(&button, "click", move |_| {
        let state: DrawerState = drawer.borrow_mut().toggle();
        dom::set_class(&body, LOGOS_OPEN_CLASS, state.open);
        dom::set_attr(&target, "aria-expanded", state.aria_expanded());
        dom::set_attr(&target, "aria-label", state.aria_label());
    }));
    Ok(())
}

fn install_feature_labels(
    window: &Window,
    document: &Document,
    config: &WidgetConfig,
    listeners: &mut Vec<EventListener>,
) {
    for label in dom::query_all(document, &config.feature_label_selector) {
        for (event, hover) in [("mouseenter", Hover::Enter), ("mouseleave", Hover::Leave)] {
            let target = label.clone();
            listeners.push(EventListener::new(&label, event, move |_| {
                dom::set_style(&target, "transform", hover.transform());
                if hover == Hover::Enter {
                    dom::set_style(&target, "transition", HOVER_TRANSITION);
                }
            }));
        }

        let target = label.clone();
        let window = window.clone();
        let text_selector = config.label_text_selector.clone();
        listeners.push(EventListener::new(&label, "click", move |_| {
            let text = target
                .query_selector(&text_selector)
                .ok()
                .flatten()
                .and_then(|el| el.text_content())
                .unwrap_or_default();
            if let Err(err) = window.alert_with_message(feature_info(&text)) {
                log::warn!("feature info alert failed: {err:?}");
            }
        }));
    }
}

pub struct DomRevealSurface {
    section: Element,
    lines: Vec<Element>,
    markers: Vec<Element>,
    observer: RefCell<Option<IntersectionObserver>>,
}

impl RevealSurface for DomRevealSurface {
    fn line_lengths(&self) -> Vec<Option<f64>> {
        self.lines
            .iter()
            .map(|line| {
                line.dyn_ref::<SvgGeometryElement>()
                    .map(|geometry| f64::from(geometry.get_total_length()))
            })
            .collect()
    }

    fn style_line(&self, index: usize, reveal: &LineReveal) {
        let Some(line) = self.lines.get(index) else {
            return;
        };
        dom::set_style(line, "stroke-dasharray", &reveal.dash);
        dom::set_style(line, "stroke-dashoffset", &reveal.dash);
        dom::set_style(line, "animation", reveal.animation);
    }

    fn show_markers(&self) {
        for marker in &self.markers {
            dom::set_style(marker, "opacity", "1");
        }
    }

    fn stop_observing(&self) {
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer.unobserve(&self.section);
        }
    }
}

pub struct RevealBindings {
    pub reveal: Rc<ConnectorReveal<BrowserHost, DomRevealSurface>>,
    _on_intersect: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

fn install_reveal(document: &Document, section_id: &str, config: &WidgetConfig) -> Result<RevealBindings> {
    let section = dom::by_id(document, section_id)?;
    inject_keyframes(document)?;

    let reveal = ConnectorReveal::new(
        BrowserHost,
        DomRevealSurface {
            section: section.clone(),
            lines: dom::query_all(document, &config.reveal_line_selector),
            markers: dom::query_all(document, &config.reveal_marker_selector),
            observer: RefCell::new(None),
        },
    );

    let handler = Rc::clone(&reveal);
    let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let visible = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .any(|entry| entry.is_intersecting());
            if visible {
                handler.on_visible();
            }
        },
    );
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer = IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;
    observer.observe(&section);
    reveal.surface().observer.replace(Some(observer));

    Ok(RevealBindings {
        reveal,
        _on_intersect: on_intersect,
    })
}

fn inject_keyframes(document: &Document) -> Result<()> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(DRAW_LINE_KEYFRAMES));
    let head = document.head().ok_or(Error::NoDocument)?;
    head.append_child(&style)?;
    Ok(())
}

/// Installed widgets; a widget whose markup is missing is left out.
#[derive(Default)]
pub struct WidgetBindings {
    pub slider: Option<Rc<LogoSlider<BrowserHost, DomSliderSurface>>>,
    pub reveal: Option<RevealBindings>,
    listeners: Vec<EventListener>,
}

impl WidgetBindings {
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

pub fn install(
    window: &Window,
    document: &Document,
    config: &WidgetConfig,
    reveal_section_id: &str,
) -> WidgetBindings {
    let mut bindings = WidgetBindings::default();

    match install_slider(document, config, &mut bindings.listeners) {
        Ok(slider) => bindings.slider = Some(slider),
        Err(err) => log::warn!("logo slider not installed: {err}"),
    }
    if let Err(err) = install_drawer(document, config, &mut bindings.listeners) {
        log::debug!("logos drawer not installed: {err}");
    }
    install_feature_labels(window, document, config, &mut bindings.listeners);
    match install_reveal(document, reveal_section_id, config) {
        Ok(reveal) => bindings.reveal = Some(reveal),
        Err(err) => log::debug!("connector reveal not installed: {err}"),
    }

    bindings
}
