use std::rc::Rc;

use foundation::Rect;
use gloo::events::EventListener;
use navigation::{
    INDICATOR_TRANSITION, IndicatorPlacement, MenuState, NavSurface, NavigationConfig,
    NavigationController, ScrollMetrics,
};
use runtime::Dispatch;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;
use crate::error::Result;
use crate::host::BrowserHost;

const ACTIVE_CLASS: &str = "active";
const MENU_OPEN_CLASS: &str = "mobile-menu-open";

pub struct DomNavSurface {
    window: Window,
    document: Document,
    config: NavigationConfig,
    header: Option<HtmlElement>,
    nav: Element,
    indicator: Option<HtmlElement>,
    menu_toggle: Option<Element>,
}

impl DomNavSurface {
    pub fn new(window: Window, document: Document, config: NavigationConfig) -> Result<Self> {
        let nav = dom::by_id(&document, &config.nav_id)?;
        let header = document
            .get_element_by_id(&config.header_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let indicator = document
            .get_element_by_id(&config.indicator_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if indicator.is_none() {
            log::warn!("nav indicator #{} not found", config.indicator_id);
        }
        let menu_toggle = document.get_element_by_id(&config.menu_toggle_id);
        Ok(Self {
            window,
            document,
            config,
            header,
            nav,
            indicator,
            menu_toggle,
        })
    }

    pub fn links(&self) -> Vec<Element> {
        dom::query_all(&self.document, &self.config.link_selector)
    }

    fn link_for(&self, section_id: &str) -> Option<Element> {
        let selector = format!(r#"{}[data-section="{}"]"#, self.config.link_selector, section_id);
        dom::query(&self.document, &selector)
    }
}

impl NavSurface for DomNavSurface {
    fn viewport_width(&self) -> f64 {
        dom::viewport_size(&self.window).0
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let (_, viewport_height) = dom::viewport_size(&self.window);
        let document_height = self
            .document
            .body()
            .map_or(0.0, |body| f64::from(body.scroll_height()));
        ScrollMetrics::new(scroll_y, viewport_height, document_height)
    }

    fn section_rects(&self) -> Vec<(String, Rect)> {
        dom::query_all(&self.document, &self.config.section_selector)
            .into_iter()
            .filter(|section| !section.id().is_empty())
            .map(|section| (section.id(), dom::client_rect(&section)))
            .collect()
    }

    fn header_height(&self) -> f64 {
        self.header
            .as_ref()
            .map_or(0.0, |header| f64::from(header.offset_height()))
    }

    fn nav_rect(&self) -> Option<Rect> {
        Some(dom::client_rect(&self.nav))
    }

    fn link_rect(&self, section_id: &str) -> Option<Rect> {
        self.link_for(section_id).map(|link| dom::client_rect(&link))
    }

    fn logo_rect(&self) -> Option<Rect> {
        dom::query(&self.document, &self.config.logo_selector).map(|logo| dom::client_rect(&logo))
    }

    fn mark_active_link(&self, section_id: &str) {
        for link in self.links() {
            let matches = link.get_attribute("data-section").as_deref() == Some(section_id);
            dom::set_class(&link, ACTIVE_CLASS, matches);
        }
    }

    fn place_indicator(&self, placement: IndicatorPlacement) {
        let Some(indicator) = &self.indicator else {
            return;
        };
        let style = indicator.style();
        let writes = [
            ("transition", placement.transition_css().to_string()),
            ("width", placement.width_css()),
            ("transform", placement.transform_css()),
            ("opacity", "1".to_string()),
        ];
        for (property, value) in writes {
            if let Err(err) = style.set_property(property, &value) {
                log::warn!("indicator {property}: {err:?}");
            }
        }
        if !placement.animate {
            // Flush layout so the jump is not animated, then restore the transition.
            let _ = indicator.offset_width();
            if let Err(err) = style.set_property("transition", INDICATOR_TRANSITION) {
                log::warn!("indicator transition: {err:?}");
            }
        }
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn navigate(&self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            log::warn!("navigation to {url} failed: {err:?}");
        }
    }

    fn show_menu(&self, state: MenuState) {
        dom::set_class(&self.nav, ACTIVE_CLASS, state.open);
        if let Some(body) = self.document.body() {
            dom::set_class(&body, MENU_OPEN_CLASS, state.open);
        }
        if let Some(toggle) = &self.menu_toggle {
            dom::set_class(toggle, ACTIVE_CLASS, state.open);
            dom::set_attr(toggle, "aria-expanded", state.aria_expanded());
            dom::set_attr(toggle, "aria-label", state.aria_label());
        }
    }
}

pub struct HeaderBindings {
    pub controller: Rc<NavigationController<BrowserHost, DomNavSurface>>,
    _listeners: Vec<EventListener>,
}

/// Binds nav links and the menu toggle, and registers scroll, resize and
/// load handlers.
pub fn install(
    window: &Window,
    document: &Document,
    config: &NavigationConfig,
    dispatch: &mut Dispatch,
) -> Result<HeaderBindings> {
    let surface = DomNavSurface::new(window.clone(), document.clone(), config.clone())?;
    let links = surface.links();
    let menu_toggle = surface.menu_toggle.clone();
    let controller = NavigationController::new(BrowserHost, surface, config.clone());
    controller.init();
    controller.install(dispatch);

    let mut listeners = Vec::with_capacity(links.len() + 1);
    for link in links {
        let Some(section_id) = link.get_attribute("data-section") else {
            continue;
        };
        let controller = Rc::clone(&controller);
        listeners.push(EventListener::new(&link, "click", move |event| {
            event.prevent_default();
            controller.on_link_click(&section_id);
        }));
    }
    match menu_toggle {
        Some(toggle) => {
            let controller = Rc::clone(&controller);
            listeners.push(EventListener::new(&toggle, "click", move |_| {
                controller.toggle_menu();
            }));
        }
        None => log::warn!("menu toggle #{} not found", config.menu_toggle_id),
    }

    log::debug!(
        "header installed on {:?} page with {} listeners",
        controller.page_kind(),
        listeners.len()
    );
    Ok(HeaderBindings {
        controller,
        _listeners: listeners,
    })
}
