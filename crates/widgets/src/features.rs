pub const HOVER_TRANSFORM: &str = "scale(1.05)";
pub const REST_TRANSFORM: &str = "scale(1)";
pub const HOVER_TRANSITION: &str = "transform 0.3s ease";

const FEATURE_INFO: &[(&str, &str)] = &[
    (
        "HIGH-RES DISPLAY",
        "Ultra-high resolution display with vibrant colors and crystal-clear graphics.",
    ),
    (
        "FORGED IN METAL",
        "Premium metal construction for durability and a luxurious feel.",
    ),
    (
        "30 DIFFERENT PROVIDERS",
        "Access to games from 30 different providers for endless entertainment options.",
    ),
    (
        "PREMIUM BUTTONS",
        "Responsive, high-quality buttons for precise control and enhanced gameplay.",
    ),
];

pub const UNKNOWN_FEATURE_INFO: &str = "Feature information not available.";

/// Blurb shown when a feature callout is clicked, keyed by its label text.
pub fn feature_info(label: &str) -> &'static str {
    let label = label.trim();
    FEATURE_INFO
        .iter()
        .find(|(name, _)| *name == label)
        .map_or(UNKNOWN_FEATURE_INFO, |(_, info)| info)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Hover {
    Enter,
    Leave,
}

impl Hover {
    pub fn transform(self) -> &'static str {
        match self {
            Hover::Enter => HOVER_TRANSFORM,
            Hover::Leave => REST_TRANSFORM,
        }
    }
}
