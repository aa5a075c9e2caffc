/// Open/closed state of the mobile navigation drawer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct MobileMenu {
    open: bool,
}

/// What the page should show for a menu state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    pub fn aria_label(&self) -> &'static str {
        if self.open { "Close menu" } else { "Open menu" }
    }
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> MenuState {
        MenuState { open: self.open }
    }

    pub fn toggle(&mut self) -> MenuState {
        self.open = !self.open;
        self.state()
    }

    /// Closes the menu. Returns the new state only if it was open.
    pub fn close(&mut self) -> Option<MenuState> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::MobileMenu;

    #[test]
    fn toggle_flips_and_describes_state() {
        let mut menu = MobileMenu::default();
        let open = menu.toggle();
        assert!(open.open);
        assert_eq!(open.aria_expanded(), "true");
        assert_eq!(open.aria_label(), "Close menu");
        let closed = menu.toggle();
        assert_eq!(closed.aria_expanded(), "false");
    }

    #[test]
    fn close_is_noop_when_closed() {
        let mut menu = MobileMenu::default();
        assert_eq!(menu.close(), None);
        menu.toggle();
        assert!(menu.close().is_some());
        assert!(!menu.is_open());
    }
}
