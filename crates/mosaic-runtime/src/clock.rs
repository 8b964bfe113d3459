#![forbid(unsafe_code)]

//! Frame clocks and pacing.

use std::time::{Duration, Instant};

use crate::backend::FrameClock;

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl FrameClock for SystemClock {
    fn now_mono(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock advanced explicitly; sleeping advances it too.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl FrameClock for ManualClock {
    fn now_mono(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

/// Caps the frame rate and measures delta time.
#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Duration,
    max_dt: Duration,
    last: Option<Duration>,
}

impl FramePacer {
    pub fn new(budget: Duration, max_dt: Duration) -> Self {
        Self {
            budget,
            max_dt,
            last: None,
        }
    }

    /// Sleep out the rest of the frame budget, then return the time since the
    /// previous tick, clamped to `max_dt`. The first tick returns zero.
    pub fn tick<C: FrameClock + ?Sized>(&mut self, clock: &mut C) -> Duration {
        let Some(last) = self.last else {
            self.last = Some(clock.now_mono());
            return Duration::ZERO;
        };
        let spent = clock.now_mono().saturating_sub(last);
        if spent < self.budget {
            clock.sleep(self.budget - spent);
        }
        let now = clock.now_mono();
        self.last = Some(now);
        now.saturating_sub(last).min(self.max_dt)
    }
}
