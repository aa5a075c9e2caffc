use connectors::ConnectorConfig;
use navigation::NavigationConfig;
use serde::{Deserialize, Serialize};
use web_sys::Document;

use crate::error::Result;

/// Id of the optional `<script type="application/json">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "showcase-config";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub connectors: ConnectorConfig,
    pub navigation: NavigationConfig,
    pub widgets: WidgetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub slider_container_selector: String,
    pub slider_track_selector: String,
    /// Relative to the track.
    pub slider_logo_selector: String,
    pub drawer_toggle_id: String,
    pub feature_label_selector: String,
    /// Relative to a feature label.
    pub label_text_selector: String,
    pub reveal_line_selector: String,
    pub reveal_marker_selector: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            slider_container_selector: ".logo-slider-container".to_string(),
            slider_track_selector: ".logo-slider-track".to_string(),
            slider_logo_selector: "img.provider-logo".to_string(),
            drawer_toggle_id: "toggle-logos".to_string(),
            feature_label_selector: ".feature-label".to_string(),
            label_text_selector: ".label-text".to_string(),
            reveal_line_selector: ".connecting-line line".to_string(),
            reveal_marker_selector: ".connecting-line circle".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Reads overrides from the page, falling back to defaults when the
    /// config element is absent.
    pub fn from_document(document: &Document) -> Result<Self> {
        match document.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(element) => Self::from_json(&element.text_content().unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageConfig;

    #[test]
    fn empty_text_is_default() {
        assert_eq!(PageConfig::from_json("  ").unwrap(), PageConfig::default());
    }

    #[test]
    fn nested_overrides_keep_other_defaults() {
        let config = PageConfig::from_json(
            r#"{
                "navigation": { "home_url": "/", "suppression_ms": 600 },
                "widgets": { "drawer_toggle_id": "more-games" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.navigation.home_link("craftsmanship"), "/#craftsmanship");
        assert_eq!(config.navigation.suppression_ms, 600);
        assert_eq!(config.navigation.resize_debounce_ms, 100);
        assert_eq!(config.widgets.drawer_toggle_id, "more-games");
        assert_eq!(config.widgets.slider_track_selector, ".logo-slider-track");
        assert_eq!(config.connectors.max_retry_frames, 60);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(PageConfig::from_json("{ nope").is_err());
    }
}
