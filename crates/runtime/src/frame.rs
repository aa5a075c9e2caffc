use foundation::time::Millis;

/// Animation-frame metadata for a deterministic timeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Timeline position when the frame ran.
    pub time: Millis,
}

impl Frame {
    pub fn new(index: u64, time: Millis) -> Self {
        Self { index, time }
    }

    pub fn next(self, time: Millis) -> Self {
        Self::new(self.index + 1, time)
    }
}
