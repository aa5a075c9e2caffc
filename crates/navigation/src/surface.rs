use foundation::Rect;

use crate::active::ScrollMetrics;
use crate::indicator::IndicatorPlacement;
use crate::menu::MenuState;

/// Live page as seen by the navigation controller.
pub trait NavSurface {
    fn viewport_width(&self) -> f64;

    fn scroll_metrics(&self) -> ScrollMetrics;

    /// `(id, client rect)` for every navigable section, in document order.
    fn section_rects(&self) -> Vec<(String, Rect)>;

    fn header_height(&self) -> f64;

    fn nav_rect(&self) -> Option<Rect>;

    fn link_rect(&self, section_id: &str) -> Option<Rect>;

    fn logo_rect(&self) -> Option<Rect>;

    /// Gives `active` to the link for `section_id` and removes it from the rest.
    fn mark_active_link(&self, section_id: &str);

    fn place_indicator(&self, placement: IndicatorPlacement);

    fn smooth_scroll_to(&self, top: f64);

    fn navigate(&self, url: &str);

    fn show_menu(&self, state: MenuState);
}
