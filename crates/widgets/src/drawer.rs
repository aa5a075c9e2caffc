/// Class toggled on `<body>` while the extra logos are shown.
pub const LOGOS_OPEN_CLASS: &str = "logos-open";

/// The "show more games" drawer under the provider slider.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct LogosDrawer {
    open: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawerState {
    pub open: bool,
}

impl DrawerState {
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    pub fn aria_label(&self) -> &'static str {
        if self.open {
            "Hide games"
        } else {
            "Show more games"
        }
    }
}

impl LogosDrawer {
    /// Starts from whatever the page already shows.
    pub fn with_state(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> DrawerState {
        self.open = !self.open;
        DrawerState { open: self.open }
    }
}
