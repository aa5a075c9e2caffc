use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use runtime::{Dispatch, EventKind};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

pub mod config;
pub mod connector_dom;
pub mod dom;
pub mod error;
pub mod header;
pub mod host;
pub mod widget_dom;

pub use config::PageConfig;
pub use error::{Error, Result};
pub use host::BrowserHost;

use connector_dom::ConnectorBindings;
use header::HeaderBindings;
use widget_dom::WidgetBindings;

// Guard against a second `start` (hot reload re-running the module).
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Everything installed on the page. Dropping it detaches every listener,
/// observer and pending timer.
struct Page {
    dispatch: Rc<Dispatch>,
    connectors: Option<ConnectorBindings>,
    header: Option<HeaderBindings>,
    _widgets: WidgetBindings,
    _window_listeners: Vec<EventListener>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Routes a page event to every registered handler.
///
/// The dispatch table is cloned out of the slot first so handlers run with
/// no borrow held.
pub(crate) fn emit(kind: EventKind) {
    let dispatch = PAGE.with(|page| page.borrow().as_ref().map(|p| Rc::clone(&p.dispatch)));
    if let Some(dispatch) = dispatch {
        dispatch.dispatch(kind);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();

    let document = dom::document()?;
    if is_loading(&document) {
        EventListener::once(&document, "DOMContentLoaded", |_| {
            if let Err(err) = install() {
                log::error!("showcase install failed: {err}");
            }
        })
        .forget();
        return Ok(());
    }
    install()?;
    Ok(())
}

fn install() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;
    let config = PageConfig::from_document(&document).unwrap_or_else(|err| {
        log::warn!("ignoring page config: {err}");
        PageConfig::default()
    });

    let mut dispatch = Dispatch::new();
    let connectors =
        match connector_dom::install(&window, &document, &config.connectors, &mut dispatch) {
            Ok(bindings) => Some(bindings),
            Err(err) => {
                log::warn!("connectors not installed: {err}");
                None
            }
        };
    let header = match header::install(&window, &document, &config.navigation, &mut dispatch) {
        Ok(bindings) => Some(bindings),
        Err(err) => {
            log::warn!("header not installed: {err}");
            None
        }
    };
    let widgets = widget_dom::install(&window, &document, &config.widgets, &config.connectors.section_id);

    let window_listeners = listen_on_window(&window, &dispatch);
    let page = Page {
        dispatch: Rc::new(dispatch),
        connectors,
        header,
        _widgets: widgets,
        _window_listeners: window_listeners,
    };
    let previous = PAGE.with(|slot| slot.borrow_mut().replace(page));
    drop(previous);

    if document.ready_state() == "complete" {
        emit(EventKind::Load);
    }
    Ok(())
}

/// One `window` listener per dispatched kind. Scroll is passive.
fn listen_on_window(window: &Window, dispatch: &Dispatch) -> Vec<EventListener> {
    dispatch
        .kinds()
        .filter_map(|kind| kind.window_event().map(|name| (kind, name)))
        .map(|(kind, name)| {
            let options = EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: kind == EventKind::Scroll,
            };
            EventListener::new_with_options(window, name, options, move |_| emit(kind))
        })
        .collect()
}

/// Runs a connector pass right away, e.g. after the host page changed the
/// craftsmanship section by script.
#[wasm_bindgen(js_name = refreshConnectors)]
pub fn refresh_connectors() {
    let controller = PAGE.with(|page| {
        page.borrow()
            .as_ref()
            .and_then(|p| p.connectors.as_ref())
            .map(|c| Rc::clone(&c.controller))
    });
    if let Some(controller) = controller {
        controller.recompute_now();
    }
}

/// Section the header currently marks as active, if the header is installed.
#[wasm_bindgen(js_name = activeSection)]
pub fn active_section() -> Option<String> {
    PAGE.with(|page| {
        page.borrow()
            .as_ref()
            .and_then(|p| p.header.as_ref())
            .map(|h| h.controller.active_section())
    })
}

#[wasm_bindgen(js_name = getVersion)]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Whether `document` still needs `DOMContentLoaded` before binding.
pub fn is_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}
