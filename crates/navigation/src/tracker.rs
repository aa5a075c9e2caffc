use crate::active::{ScrollMetrics, determine_active_section};
use crate::extent::SectionMap;

/// Whether the page hosts its own sections or links back to the home page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerPhase {
    Idle,
    /// A nav click started a smooth scroll; scroll positions are transient.
    ProgrammaticScroll { target: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub active_section: String,
    pub is_mobile: bool,
    pub phase: TrackerPhase,
}

impl NavigationState {
    pub fn is_programmatic_scroll_in_flight(&self) -> bool {
        matches!(self.phase, TrackerPhase::ProgrammaticScroll { .. })
    }
}

/// What a nav-link activation asks the page to do.
#[derive(Debug, Clone, PartialEq)]
pub enum NavCommand {
    SmoothScroll { top: f64 },
    Navigate { url: String },
}

/// Owns [`NavigationState`]; every mutation goes through these methods.
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    state: NavigationState,
    sections: SectionMap,
}

impl ActiveSectionTracker {
    pub fn new(initial_section: impl Into<String>, is_mobile: bool) -> Self {
        Self {
            state: NavigationState {
                active_section: initial_section.into(),
                is_mobile,
                phase: TrackerPhase::Idle,
            },
            sections: SectionMap::new(),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn active_section(&self) -> &str {
        &self.state.active_section
    }

    pub fn is_mobile(&self) -> bool {
        self.state.is_mobile
    }

    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    pub fn page_kind(&self) -> PageKind {
        if self.sections.is_empty() {
            PageKind::Secondary
        } else {
            PageKind::Home
        }
    }

    pub fn set_sections(&mut self, sections: SectionMap) {
        self.sections = sections;
    }

    /// Returns `true` if the layout changed.
    pub fn set_mobile(&mut self, is_mobile: bool) -> bool {
        let changed = self.state.is_mobile != is_mobile;
        self.state.is_mobile = is_mobile;
        changed
    }

    /// Re-derives the active section from scroll position.
    ///
    /// Returns the new id when it changed. Ignored while a programmatic
    /// scroll is in flight.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<String> {
        if self.state.is_programmatic_scroll_in_flight() {
            return None;
        }
        let next = determine_active_section(&self.sections, metrics)?;
        if next == self.state.active_section {
            return None;
        }
        let next = next.to_string();
        self.state.active_section = next.clone();
        Some(next)
    }

    /// Handles a click on the nav link for `section_id`.
    ///
    /// On the home page the section becomes active immediately and the
    /// tracker enters the programmatic-scroll phase. On a secondary page the
    /// click becomes a navigation to `home_link`.
    pub fn activate_link(
        &mut self,
        section_id: &str,
        header_height: f64,
        home_link: impl FnOnce(&str) -> String,
    ) -> Option<NavCommand> {
        if self.page_kind() == PageKind::Secondary {
            return Some(NavCommand::Navigate {
                url: home_link(section_id),
            });
        }
        let Some(extent) = self.sections.get(section_id) else {
            log::warn!("nav link targets unknown section {section_id}");
            return None;
        };
        let top = extent.top - header_height;
        self.state.active_section = section_id.to_string();
        self.state.phase = TrackerPhase::ProgrammaticScroll {
            target: section_id.to_string(),
        };
        Some(NavCommand::SmoothScroll { top })
    }

    pub fn finish_programmatic_scroll(&mut self) {
        if let TrackerPhase::ProgrammaticScroll { target } = &self.state.phase {
            log::debug!("programmatic scroll to {target} settled");
        }
        self.state.phase = TrackerPhase::Idle;
    }
}
