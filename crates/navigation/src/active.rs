use crate::extent::SectionMap;

/// Distance (px) from the document edges at which the first / last section
/// wins regardless of the viewport midpoint.
pub const EDGE_TOLERANCE_PX: f64 = 10.0;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_height,
            document_height,
        }
    }

    /// Vertical centre of the viewport in document coordinates.
    pub fn viewport_midpoint(&self) -> f64 {
        self.scroll_y + self.viewport_height / 2.0
    }

    pub fn at_top(&self) -> bool {
        self.scroll_y < EDGE_TOLERANCE_PX
    }

    pub fn at_bottom(&self) -> bool {
        self.scroll_y + self.viewport_height >= self.document_height - EDGE_TOLERANCE_PX
    }
}

/// Picks the section under the viewport midpoint.
///
/// Order of precedence:
/// 1. first section (document order) whose extent contains the midpoint;
/// 2. the first section when scrolled to the top, the last when scrolled to
///    the bottom;
/// 3. the section whose midpoint is nearest.
///
/// Returns `None` only for an empty map.
pub fn determine_active_section(sections: &SectionMap, metrics: ScrollMetrics) -> Option<&str> {
    let midpoint = metrics.viewport_midpoint();

    if let Some(hit) = sections.iter().find(|e| e.contains(midpoint)) {
        return Some(&hit.id);
    }
    // Edges before nearest-midpoint: a short first or last section may never
    // hold the midpoint, yet its link must light up at the page extremes.
    if metrics.at_top() {
        return sections.first().map(|e| e.id.as_str());
    }
    if metrics.at_bottom() {
        return sections.last().map(|e| e.id.as_str());
    }
    sections
        .iter()
        .min_by(|a, b| {
            a.distance_to_midpoint(midpoint)
                .total_cmp(&b.distance_to_midpoint(midpoint))
        })
        .map(|e| e.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::{ScrollMetrics, determine_active_section};
    use crate::extent::SectionMap;
    use foundation::Rect;

    /// A=[0,500], B=[500,1200], C=[1200,2000] measured at scroll 0.
    fn abc() -> SectionMap {
        SectionMap::measure(
            [
                ("a", Rect::new(0.0, 0.0, 1000.0, 500.0)),
                ("b", Rect::new(0.0, 500.0, 1000.0, 700.0)),
                ("c", Rect::new(0.0, 1200.0, 1000.0, 800.0)),
            ],
            0.0,
        )
    }

    fn at(scroll_y: f64) -> ScrollMetrics {
        ScrollMetrics::new(scroll_y, 800.0, 2000.0)
    }

    #[test]
    fn midpoint_inside_extent_wins() {
        let map = abc();
        assert_eq!(determine_active_section(&map, at(250.0)), Some("b"));
        assert_eq!(determine_active_section(&map, at(0.0)), Some("a"));
    }

    #[test]
    fn shared_boundary_goes_to_earlier_section() {
        // Midpoint exactly 500.
        assert_eq!(determine_active_section(&abc(), at(100.0)), Some("a"));
    }

    #[test]
    fn past_last_extent_falls_back_to_last() {
        assert_eq!(determine_active_section(&abc(), at(1700.0)), Some("c"));
    }

    #[test]
    fn gap_between_sections_picks_nearest_midpoint() {
        let map = SectionMap::measure(
            [
                ("a", Rect::new(0.0, 0.0, 1.0, 400.0)),
                ("b", Rect::new(0.0, 1000.0, 1.0, 400.0)),
            ],
            0.0,
        );
        let metrics = ScrollMetrics::new(350.0, 600.0, 5000.0);
        // Midpoint 650: 450 from a's midpoint, 550 from b's.
        assert_eq!(determine_active_section(&map, metrics), Some("a"));
    }

    #[test]
    fn top_edge_prefers_first_section() {
        let map = SectionMap::measure(
            [
                ("a", Rect::new(0.0, 900.0, 1.0, 400.0)),
                ("b", Rect::new(0.0, 1300.0, 1.0, 400.0)),
            ],
            0.0,
        );
        let metrics = ScrollMetrics::new(5.0, 800.0, 3000.0);
        assert_eq!(determine_active_section(&map, metrics), Some("a"));
    }

    #[test]
    fn bottom_edge_beats_nearer_midpoint() {
        let map = SectionMap::measure(
            [
                ("a", Rect::new(0.0, 0.0, 1.0, 1000.0)),
                ("b", Rect::new(0.0, 1300.0, 1.0, 200.0)),
                ("c", Rect::new(0.0, 1950.0, 1.0, 40.0)),
            ],
            0.0,
        );
        // Midpoint 1600 sits in the gap, 200 from b and 370 from c.
        let metrics = ScrollMetrics::new(1200.0, 800.0, 2000.0);
        assert_eq!(determine_active_section(&map, metrics), Some("c"));
    }

    #[test]
    fn total_over_scroll_range() {
        let map = abc();
        let mut y = 0.0;
        while y <= 1200.0 {
            assert!(determine_active_section(&map, at(y)).is_some());
            y += 37.0;
        }
        assert_eq!(determine_active_section(&SectionMap::new(), at(0.0)), None);
    }
}
