use std::cell::{Cell, RefCell};

use foundation::Rect;

use crate::active::ScrollMetrics;
use crate::indicator::IndicatorPlacement;
use crate::menu::MenuState;
use crate::surface::NavSurface;

/// In-memory page: fixed sections laid out in document coordinates, and a log
/// of everything the controller rendered.
pub struct FakeNavSurface {
    width: Cell<f64>,
    scroll_y: Cell<f64>,
    viewport_height: f64,
    document_height: f64,
    sections: Vec<(String, Rect)>,
    links: Vec<(String, Rect)>,
    pub marked: RefCell<Vec<String>>,
    pub placements: RefCell<Vec<IndicatorPlacement>>,
    pub scrolled_to: RefCell<Vec<f64>>,
    pub navigated: RefCell<Vec<String>>,
    pub menus: RefCell<Vec<MenuState>>,
}

impl FakeNavSurface {
    /// Sections a=[0,500], b=[500,1200], c=[1200,2000]; viewport 1200x800.
    pub fn abc() -> Self {
        let section = |id: &str, top: f64, height: f64| (id.to_string(), Rect::new(0.0, top, 1200.0, height));
        let link = |id: &str, left: f64| (id.to_string(), Rect::new(left, 18.0, 60.0, 24.0));
        Self {
            sections: vec![
                section("a", 0.0, 500.0),
                section("b", 500.0, 700.0),
                section("c", 1200.0, 800.0),
            ],
            links: vec![link("a", 400.0), link("b", 470.0), link("c", 540.0)],
            ..Self::secondary()
        }
    }

    /// A page without navigable sections.
    pub fn secondary() -> Self {
        Self {
            width: Cell::new(1200.0),
            scroll_y: Cell::new(0.0),
            viewport_height: 800.0,
            document_height: 2000.0,
            sections: Vec::new(),
            links: Vec::new(),
            marked: RefCell::new(Vec::new()),
            placements: RefCell::new(Vec::new()),
            scrolled_to: RefCell::new(Vec::new()),
            navigated: RefCell::new(Vec::new()),
            menus: RefCell::new(Vec::new()),
        }
    }

    pub fn set_width(&self, width: f64) {
        self.width.set(width);
    }

    pub fn scroll_to(&self, scroll_y: f64) {
        self.scroll_y.set(scroll_y);
    }
}

impl NavSurface for FakeNavSurface {
    fn viewport_width(&self) -> f64 {
        self.width.get()
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.scroll_y.get(), self.viewport_height, self.document_height)
    }

    fn section_rects(&self) -> Vec<(String, Rect)> {
        let dy = -self.scroll_y.get();
        self.sections
            .iter()
            .map(|(id, rect)| (id.clone(), rect.offset_y(dy)))
            .collect()
    }

    fn header_height(&self) -> f64 {
        80.0
    }

    fn nav_rect(&self) -> Option<Rect> {
        Some(Rect::new(400.0, 10.0, 600.0, 40.0))
    }

    fn link_rect(&self, section_id: &str) -> Option<Rect> {
        self.links
            .iter()
            .find(|(id, _)| id == section_id)
            .map(|(_, rect)| *rect)
    }

    fn logo_rect(&self) -> Option<Rect> {
        Some(Rect::new(20.0, 10.0, 140.0, 40.0))
    }

    fn mark_active_link(&self, section_id: &str) {
        self.marked.borrow_mut().push(section_id.to_string());
    }

    fn place_indicator(&self, placement: IndicatorPlacement) {
        self.placements.borrow_mut().push(placement);
    }

    fn smooth_scroll_to(&self, top: f64) {
        self.scrolled_to.borrow_mut().push(top);
    }

    fn navigate(&self, url: &str) {
        self.navigated.borrow_mut().push(url.to_string());
    }

    fn show_menu(&self, state: MenuState) {
        self.menus.borrow_mut().push(state);
    }
}
