/// Bounded retry counter for work that waits on the page to become measurable.
///
/// A permanently hidden element would otherwise keep a frame-retry loop alive
/// forever.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryBudget {
    limit: u32,
    used: u32,
}

impl RetryBudget {
    pub fn new(limit: u32) -> Self {
        Self { limit, used: 0 }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn attempts(&self) -> u32 {
        self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    /// Records one retry.
    ///
    /// Returns `false` once the limit has been reached.
    pub fn try_consume(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}
