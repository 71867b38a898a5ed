//! Reporting clock.

use std::time::{Duration, Instant};

/// Tracks when the next periodic report is due.
///
/// Reporting runs through the same single-threaded dispatch as message
/// processing, so the clock is polled, never fired from another thread.
#[derive(Debug)]
pub struct ReportTimer {
    interval: Duration,
    last_fired: Instant,
}

impl ReportTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: Instant::now(),
        }
    }

    /// Returns true when a full interval has elapsed, and restarts it.
    pub fn due(&mut self) -> bool {
        if self.last_fired.elapsed() >= self.interval {
            self.last_fired = Instant::now();
            true
        } else {
            false
        }
    }

    /// Time until the next report is due.
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.last_fired.elapsed())
    }
}
