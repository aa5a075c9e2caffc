use serde::{Deserialize, Serialize};

use crate::anchor::{FeatureAnchor, default_anchors};
use foundation::MOBILE_BREAKPOINT_PX;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    pub svg_selector: String,
    /// Id of the section that hosts the SVG and its labels.
    pub section_id: String,
    pub breakpoint_px: f64,
    pub resize_debounce_ms: u64,
    /// Extra delay after the first frame before the initial pass.
    pub settle_delay_ms: u64,
    /// Consecutive frames to wait for a measurable SVG before giving up.
    pub max_retry_frames: u32,
    pub anchors: Vec<FeatureAnchor>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            svg_selector: ".product-svg".to_string(),
            section_id: "craftsmanship".to_string(),
            breakpoint_px: MOBILE_BREAKPOINT_PX,
            resize_debounce_ms: 50,
            settle_delay_ms: 50,
            max_retry_frames: 60,
            anchors: default_anchors(),
        }
    }
}
