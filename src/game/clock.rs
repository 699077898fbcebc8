//! Frame Timing
//!
//! The simulation is stepped with a variable `dt` measured between frames.
//! Wall-clock access sits behind [`Clock`] so matches can be driven by a
//! manual clock in tests and in headless runs.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    /// Time since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock, measured from creation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Create at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }

    /// Move forward by `seconds`.
    pub fn advance_secs(&self, seconds: f64) {
        self.advance(Duration::from_secs_f64(seconds));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Turns clock readings into scaled simulation `dt`.
#[derive(Clone, Copy, Debug)]
pub struct FrameTimer {
    last: Duration,
    game_speed: f64,
}

impl FrameTimer {
    /// Start timing from `now`.
    pub fn new(now: Duration, game_speed: f64) -> Self {
        Self { last: now, game_speed }
    }

    /// Scaled seconds since the previous call.
    ///
    /// A clock that went backwards yields zero.
    pub fn delta(&mut self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.last);
        self.last = self.last.max(now);
        elapsed.as_secs_f64() * self.game_speed
    }

    /// Speed multiplier applied to every delta.
    pub fn game_speed(&self) -> f64 {
        self.game_speed
    }
}
