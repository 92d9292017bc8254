//! Wall-clock stopwatch.

use std::time::Instant;

/// Measures elapsed time from the most recent [`Tic::tic`].
///
/// Creating a `Tic` starts it.
#[derive(Debug, Clone, Copy)]
pub struct Tic {
    init: Instant,
    start: Instant,
}

impl Tic {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            init: now,
            start: now,
        }
    }

    /// Restart the measurement from now.
    pub fn tic(&mut self) {
        self.start = Instant::now();
    }

    /// Seconds since the most recent [`tic`](Self::tic) (or creation).
    pub fn toc(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Seconds since creation, ignoring restarts.
    pub fn total(&self) -> f64 {
        self.init.elapsed().as_secs_f64()
    }
}

impl Default for Tic {
    fn default() -> Self {
        Self::new()
    }
}
