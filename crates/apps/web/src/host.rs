use foundation::time::Millis;
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use runtime::TimerHost;

/// [`TimerHost`] backed by `setTimeout` and `requestAnimationFrame`.
#[derive(Debug, Copy, Clone, Default)]
pub struct BrowserHost;

/// Owns a pending browser callback; dropping it cancels the callback.
pub enum BrowserHandle {
    Timeout(Timeout),
    Frame(AnimationFrame),
}

impl TimerHost for BrowserHost {
    type Handle = BrowserHandle;

    fn set_timeout(&self, delay: Millis, callback: Box<dyn FnOnce()>) -> Self::Handle {
        BrowserHandle::Timeout(Timeout::new(delay.as_u32(), callback))
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Self::Handle {
        BrowserHandle::Frame(request_animation_frame(move |_timestamp| callback()))
    }
}
