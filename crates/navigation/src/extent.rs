use foundation::Rect;

/// Vertical extent of a page section in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionExtent {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
    pub height: f64,
    pub midpoint: f64,
}

impl SectionExtent {
    /// Converts a viewport rect measured at `scroll_y` into document space.
    pub fn from_client_rect(id: impl Into<String>, rect: Rect, scroll_y: f64) -> Self {
        let top = rect.top + scroll_y;
        Self {
            id: id.into(),
            top,
            bottom: rect.bottom() + scroll_y,
            height: rect.height,
            midpoint: top + rect.height / 2.0,
        }
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom
    }

    pub fn distance_to_midpoint(&self, y: f64) -> f64 {
        (y - self.midpoint).abs()
    }
}

/// Navigable sections in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionMap {
    extents: Vec<SectionExtent>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(id, client rect)` pairs measured at `scroll_y`.
    pub fn measure<I, S>(sections: I, scroll_y: f64) -> Self
    where
        I: IntoIterator<Item = (S, Rect)>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (id, rect) in sections {
            map.insert(SectionExtent::from_client_rect(id, rect, scroll_y));
        }
        map
    }

    /// Adds `extent`, replacing an existing section with the same id in place.
    pub fn insert(&mut self, extent: SectionExtent) {
        match self.extents.iter_mut().find(|e| e.id == extent.id) {
            Some(existing) => *existing = extent,
            None => self.extents.push(extent),
        }
    }

    pub fn get(&self, id: &str) -> Option<&SectionExtent> {
        self.extents.iter().find(|e| e.id == id)
    }

    pub fn first(&self) -> Option<&SectionExtent> {
        self.extents.first()
    }

    pub fn last(&self) -> Option<&SectionExtent> {
        self.extents.last()
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionExtent> {
        self.extents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{SectionExtent, SectionMap};
    use foundation::Rect;

    #[test]
    fn client_rect_is_shifted_by_scroll() {
        let e = SectionExtent::from_client_rect("b", Rect::new(0.0, -100.0, 800.0, 700.0), 600.0);
        assert_eq!(e.top, 500.0);
        assert_eq!(e.bottom, 1200.0);
        assert_eq!(e.height, 700.0);
        assert_eq!(e.midpoint, 850.0);
    }

    #[test]
    fn contains_is_inclusive() {
        let e = SectionExtent::from_client_rect("a", Rect::new(0.0, 0.0, 10.0, 500.0), 0.0);
        assert!(e.contains(0.0));
        assert!(e.contains(500.0));
        assert!(!e.contains(500.5));
    }

    #[test]
    fn duplicate_ids_keep_first_position() {
        let map = SectionMap::measure(
            [
                ("a", Rect::new(0.0, 0.0, 1.0, 100.0)),
                ("b", Rect::new(0.0, 100.0, 1.0, 100.0)),
                ("a", Rect::new(0.0, 300.0, 1.0, 100.0)),
            ],
            0.0,
        );
        let ids: Vec<_> = map.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(map.get("a").map(|e| e.top), Some(300.0));
    }
}
