use foundation::time::Millis;

/// Source of deferred callbacks: one-shot timers and animation frames.
///
/// Dropping a returned handle cancels the pending callback, so replacing a
/// stored handle is how callers get last-write-wins semantics.
pub trait TimerHost: Clone + 'static {
    type Handle: 'static;

    fn set_timeout(&self, delay: Millis, callback: Box<dyn FnOnce()>) -> Self::Handle;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Self::Handle;
}
