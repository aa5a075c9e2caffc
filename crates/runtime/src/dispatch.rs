use std::collections::BTreeMap;
use std::rc::Rc;

/// Page-level events the components react to.
///
/// Browser listeners translate raw DOM events into these kinds; components
/// register handlers per kind instead of attaching their own listeners.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// `window` `load`: images and fonts have settled.
    Load,
    Scroll,
    Resize,
    HashChange,
    /// An observed section crossed an intersection threshold into view.
    SectionVisible,
    /// A layout-relevant mutation happened inside an observed subtree.
    Mutation,
}

impl EventKind {
    /// DOM event name for kinds that map to a `window` listener.
    pub fn window_event(self) -> Option<&'static str> {
        match self {
            EventKind::Load => Some("load"),
            EventKind::Scroll => Some("scroll"),
            EventKind::Resize => Some("resize"),
            EventKind::HashChange => Some("hashchange"),
            EventKind::SectionVisible | EventKind::Mutation => None,
        }
    }
}

pub type Handler = Rc<dyn Fn()>;

/// Dispatch table from [`EventKind`] to handlers.
///
/// Handlers for one kind run in registration order. Kinds are kept in a
/// sorted map so iteration is stable.
#[derive(Default)]
pub struct Dispatch {
    handlers: BTreeMap<EventKind, Vec<Handler>>,
}

impl Dispatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, handler: impl Fn() + 'static) {
        self.handlers.entry(kind).or_default().push(Rc::new(handler));
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Kinds with at least one handler, in stable order.
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.handlers.keys().copied()
    }

    /// Runs every handler registered for `kind`. Returns how many ran.
    pub fn dispatch(&self, kind: EventKind) -> usize {
        let Some(handlers) = self.handlers.get(&kind) else {
            return 0;
        };
        log::trace!("dispatch {kind:?} to {} handler(s)", handlers.len());
        for handler in handlers {
            handler();
        }
        handlers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{Dispatch, EventKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn runs_handlers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatch = Dispatch::new();
        let a = Rc::clone(&log);
        dispatch.on(EventKind::Resize, move || a.borrow_mut().push("a"));
        let b = Rc::clone(&log);
        dispatch.on(EventKind::Resize, move || b.borrow_mut().push("b"));

        assert_eq!(dispatch.dispatch(EventKind::Resize), 2);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn unknown_kind_runs_nothing() {
        let dispatch = Dispatch::new();
        assert_eq!(dispatch.dispatch(EventKind::Scroll), 0);
        assert_eq!(dispatch.handler_count(EventKind::Scroll), 0);
    }

    #[test]
    fn kinds_are_stably_sorted() {
        let mut dispatch = Dispatch::new();
        dispatch.on(EventKind::Mutation, || {});
        dispatch.on(EventKind::Load, || {});
        dispatch.on(EventKind::Scroll, || {});
        let kinds: Vec<_> = dispatch.kinds().collect();
        assert_eq!(
            kinds,
            vec![EventKind::Load, EventKind::Scroll, EventKind::Mutation]
        );
    }

    #[test]
    fn only_window_kinds_have_event_names() {
        assert_eq!(EventKind::HashChange.window_event(), Some("hashchange"));
        assert_eq!(EventKind::Mutation.window_event(), None);
    }
}
