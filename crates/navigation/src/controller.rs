use std::cell::RefCell;
use std::rc::Rc;

use foundation::Layout;
use foundation::time::Millis;
use runtime::{Debounce, Dispatch, EventKind, FrameGate, Suppression, TimerHost};

use crate::config::NavigationConfig;
use crate::extent::SectionMap;
use crate::indicator::IndicatorPlacement;
use crate::menu::MobileMenu;
use crate::surface::NavSurface;
use crate::tracker::{ActiveSectionTracker, NavCommand, PageKind};

/// Feeds browser events into an [`ActiveSectionTracker`] and renders the
/// result.
///
/// Scroll is coalesced to one pass per frame, resize is debounced, and a nav
/// click holds off scroll-driven updates for the suppression window.
pub struct NavigationController<H: TimerHost, S: NavSurface> {
    surface: S,
    config: NavigationConfig,
    tracker: RefCell<ActiveSectionTracker>,
    menu: RefCell<MobileMenu>,
    scroll: FrameGate<H>,
    resize: Debounce<H>,
    suppression: Suppression<H>,
}

impl<H: TimerHost, S: NavSurface + 'static> NavigationController<H, S> {
    pub fn new(host: H, surface: S, config: NavigationConfig) -> Rc<Self> {
        let is_mobile =
            Layout::for_width(surface.viewport_width(), config.breakpoint_px).is_mobile();
        Rc::new(Self {
            tracker: RefCell::new(ActiveSectionTracker::new(
                config.initial_section.clone(),
                is_mobile,
            )),
            menu: RefCell::new(MobileMenu::default()),
            scroll: FrameGate::new(host.clone()),
            resize: Debounce::new(host.clone(), Millis(config.resize_debounce_ms)),
            suppression: Suppression::new(host, Millis(config.suppression_ms)),
            surface,
            config,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn active_section(&self) -> String {
        self.tracker.borrow().active_section().to_string()
    }

    pub fn page_kind(&self) -> PageKind {
        self.tracker.borrow().page_kind()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.borrow().is_open()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppression.is_active()
    }

    /// Measures the page, marks the initial link and places the indicator
    /// without a transition.
    pub fn init(&self) {
        self.remeasure();
        let active = self.active_section();
        self.surface.mark_active_link(&active);
        self.place_indicator(false);
    }

    fn remeasure(&self) {
        let scroll_y = self.surface.scroll_metrics().scroll_y;
        let sections = SectionMap::measure(self.surface.section_rects(), scroll_y);
        log::debug!("measured {} navigable sections", sections.len());
        self.tracker.borrow_mut().set_sections(sections);
    }

    /// Queues an active-section pass for the next frame.
    pub fn on_scroll(self: &Rc<Self>) -> bool {
        let this = Rc::clone(self);
        self.scroll.request(move || this.scroll_pass())
    }

    fn scroll_pass(&self) {
        let metrics = self.surface.scroll_metrics();
        let changed = self.tracker.borrow_mut().on_scroll(metrics);
        if let Some(id) = changed {
            self.surface.mark_active_link(&id);
            self.place_indicator(true);
        }
    }

    pub fn on_resize(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.resize.trigger(move || this.resize_pass());
    }

    fn resize_pass(&self) {
        let is_mobile =
            Layout::for_width(self.surface.viewport_width(), self.config.breakpoint_px).is_mobile();
        let changed = self.tracker.borrow_mut().set_mobile(is_mobile);
        if changed && !is_mobile {
            let closed = self.menu.borrow_mut().close();
            if let Some(state) = closed {
                self.surface.show_menu(state);
            }
        }
        self.remeasure();
        self.place_indicator(false);
    }

    pub fn on_load(&self) {
        self.remeasure();
        self.place_indicator(false);
    }

    /// Handles a click on the nav link for `section_id`.
    pub fn on_link_click(self: &Rc<Self>, section_id: &str) {
        let header_height = self.surface.header_height();
        let command = self
            .tracker
            .borrow_mut()
            .activate_link(section_id, header_height, |id| self.config.home_link(id));

        match command {
            Some(NavCommand::Navigate { url }) => self.surface.navigate(&url),
            Some(NavCommand::SmoothScroll { top }) => {
                self.surface.mark_active_link(section_id);
                self.place_indicator(true);
                self.surface.smooth_scroll_to(top);
                let this = Rc::clone(self);
                self.suppression
                    .arm(move || this.tracker.borrow_mut().finish_programmatic_scroll());
            }
            None => {}
        }

        if self.tracker.borrow().is_mobile() {
            let closed = self.menu.borrow_mut().close();
            if let Some(state) = closed {
                self.surface.show_menu(state);
            }
        }
    }

    pub fn toggle_menu(&self) {
        let state = self.menu.borrow_mut().toggle();
        self.surface.show_menu(state);
    }

    fn place_indicator(&self, animate: bool) {
        let (is_mobile, kind, active) = {
            let tracker = self.tracker.borrow();
            (
                tracker.is_mobile(),
                tracker.page_kind(),
                tracker.active_section().to_string(),
            )
        };
        if is_mobile {
            return;
        }
        let Some(nav) = self.surface.nav_rect() else {
            log::warn!("nav element missing; indicator not placed");
            return;
        };
        let target = match kind {
            PageKind::Home => self.surface.link_rect(&active),
            PageKind::Secondary => self.surface.logo_rect(),
        };
        let Some(target) = target else {
            log::debug!("no indicator target for {active}");
            return;
        };
        self.surface
            .place_indicator(IndicatorPlacement::under(target, nav, animate));
    }

    pub fn install(self: &Rc<Self>, dispatch: &mut Dispatch) {
        let this = Rc::clone(self);
        dispatch.on(EventKind::Scroll, move || {
            this.on_scroll();
        });
        let this = Rc::clone(self);
        dispatch.on(EventKind::Resize, move || this.on_resize());
        let this = Rc::clone(self);
        dispatch.on(EventKind::Load, move || this.on_load());
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationController;
    use crate::config::NavigationConfig;
    use crate::indicator::IndicatorPlacement;
    use crate::menu::MenuState;
    use crate::testing::FakeNavSurface;
    use crate::tracker::PageKind;
    use foundation::time::Millis;
    use pretty_assertions::assert_eq;
    use runtime::{Dispatch, EventKind, VirtualHost};
    use std::rc::Rc;

    fn home_page() -> (VirtualHost, Rc<NavigationController<VirtualHost, FakeNavSurface>>) {
        let host = VirtualHost::new();
        let controller =
            NavigationController::new(host.clone(), FakeNavSurface::abc(), NavigationConfig {
                initial_section: "a".to_string(),
                ..NavigationConfig::default()
            });
        controller.init();
        (host, controller)
    }

    #[test]
    fn init_marks_initial_link_and_places_indicator_immediately() {
        let (_, controller) = home_page();
        let surface = controller.surface();
        assert_eq!(*surface.marked.borrow(), vec!["a".to_string()]);
        assert_eq!(
            surface.placements.borrow().last().copied(),
            Some(IndicatorPlacement {
                width: 60.0,
                offset_x: 0.0,
                animate: false
            })
        );
        assert_eq!(controller.page_kind(), PageKind::Home);
    }

    #[test]
    fn scroll_events_coalesce_into_one_pass_per_frame() {
        let (host, controller) = home_page();
        controller.surface().scroll_to(250.0);
        assert!(controller.on_scroll());
        assert!(!controller.on_scroll());
        assert!(!controller.on_scroll());
        assert_eq!(host.run_frame(), 1);
        assert_eq!(controller.active_section(), "b");
        assert_eq!(controller.surface().marked.borrow().last().map(String::as_str), Some("b"));
        assert!(controller.surface().placements.borrow().last().is_some_and(|p| p.animate));
    }

    #[test]
    fn click_holds_target_through_suppression_window() {
        let (host, controller) = home_page();
        let mut dispatch = Dispatch::new();
        controller.install(&mut dispatch);

        controller.on_link_click("c");
        assert_eq!(controller.active_section(), "c");
        assert_eq!(*controller.surface().scrolled_to.borrow(), vec![1120.0]);
        assert!(controller.is_suppressed());

        host.advance(Millis(300));
        controller.surface().scroll_to(400.0);
        dispatch.dispatch(EventKind::Scroll);
        host.run_frame();
        assert_eq!(controller.active_section(), "c");

        host.advance(Millis(499));
        assert!(controller.is_suppressed());
        host.advance(Millis(1));
        assert!(!controller.is_suppressed());

        dispatch.dispatch(EventKind::Scroll);
        host.run_frame();
        assert_eq!(controller.active_section(), "b");
    }

    #[test]
    fn resize_is_debounced_and_closes_menu_on_desktop() {
        let (host, controller) = home_page();
        controller.surface().set_width(500.0);
        controller.on_resize();
        host.advance(Millis(100));
        controller.toggle_menu();
        assert!(controller.is_menu_open());

        let placed = controller.surface().placements.borrow().len();
        controller.surface().set_width(1200.0);
        for _ in 0..5 {
            controller.on_resize();
            host.advance(Millis(40));
        }
        assert!(controller.is_menu_open());
        host.advance(Millis(60));
        assert!(!controller.is_menu_open());
        assert_eq!(
            controller.surface().menus.borrow().last().copied(),
            Some(MenuState { open: false })
        );
        assert_eq!(controller.surface().placements.borrow().len(), placed + 1);
    }

    #[test]
    fn mobile_layout_skips_indicator_and_click_closes_menu() {
        let host = VirtualHost::new();
        let surface = FakeNavSurface::abc();
        surface.set_width(400.0);
        let controller = NavigationController::new(host, surface, NavigationConfig::default());
        controller.init();
        assert!(controller.surface().placements.borrow().is_empty());

        controller.toggle_menu();
        controller.on_link_click("b");
        assert!(!controller.is_menu_open());
        assert!(controller.surface().placements.borrow().is_empty());
    }

    #[test]
    fn secondary_page_uses_logo_and_navigates_home() {
        let host = VirtualHost::new();
        let controller =
            NavigationController::new(host, FakeNavSurface::secondary(), NavigationConfig::default());
        controller.init();
        assert_eq!(controller.page_kind(), PageKind::Secondary);
        assert_eq!(
            controller.surface().placements.borrow().last().map(|p| p.width),
            Some(140.0)
        );

        controller.on_link_click("features");
        assert_eq!(
            *controller.surface().navigated.borrow(),
            vec!["index.html#features".to_string()]
        );
        assert!(controller.surface().scrolled_to.borrow().is_empty());
    }
}
