/// Signals that the connector section may be on screen.
///
/// Measuring a hidden section yields zero-size rects, so a pass only runs
/// when at least one signal holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SectionPresence {
    /// The section participates in layout (`offsetParent` is set).
    pub has_layout_box: bool,
    /// The URL fragment names the section.
    pub fragment_matches: bool,
    /// The section carries the `active` class.
    pub marked_active: bool,
}

impl SectionPresence {
    pub fn is_potentially_active(&self) -> bool {
        self.has_layout_box || self.fragment_matches || self.marked_active
    }
}
