use foundation::MOBILE_BREAKPOINT_PX;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Section treated as active before the first scroll.
    pub initial_section: String,
    /// Page that owns the sections; secondary pages link to `<home_url>#<id>`.
    pub home_url: String,
    pub breakpoint_px: f64,
    pub resize_debounce_ms: u64,
    /// How long scroll events are ignored after a nav click.
    pub suppression_ms: u64,
    pub section_selector: String,
    pub link_selector: String,
    pub header_id: String,
    pub nav_id: String,
    pub indicator_id: String,
    pub menu_toggle_id: String,
    pub logo_selector: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_section: "home".to_string(),
            home_url: "index.html".to_string(),
            breakpoint_px: MOBILE_BREAKPOINT_PX,
            resize_debounce_ms: 100,
            suppression_ms: 800,
            section_selector: "section[id], .hero-section[id]".to_string(),
            link_selector: ".nav-link".to_string(),
            header_id: "main-header".to_string(),
            nav_id: "main-nav".to_string(),
            indicator_id: "indicator".to_string(),
            menu_toggle_id: "mobile-menu-toggle".to_string(),
            logo_selector: ".logo".to_string(),
        }
    }
}

impl NavigationConfig {
    pub fn home_link(&self, section_id: &str) -> String {
        format!("{}#{}", self.home_url, section_id)
    }
}
