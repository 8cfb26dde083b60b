// Debounce - at most one firing per quiet period, newest trigger wins
use std::time::{Duration, Instant};

/// Deadline-based debounce primitive. Each trigger re-arms the deadline,
/// implicitly cancelling the outstanding one; `poll` fires once when the
/// quiet period has elapsed with no further triggers. Designed for a
/// cooperative event loop that polls every frame or timer tick.
///
/// The `_at` variants take an explicit `now` so callers (and tests) can
/// drive time themselves.
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    pub fn trigger_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// True exactly once per armed quiet window, after it elapses.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
