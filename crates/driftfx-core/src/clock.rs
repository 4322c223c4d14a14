#![forbid(unsafe_code)]

//! Fixed-step simulation clock for phase time.
//!
//! Phase time is not wall-clock time. Every tick advances the clock by
//! `step * speed`, whatever the real delay between frames was. A slow host
//! therefore plays the sequence slower instead of skipping visual content,
//! and tests can reproduce a run exactly by counting ticks.

/// Default simulated seconds per tick at speed 1.
pub const DEFAULT_FIXED_STEP: f64 = 0.05;

/// Elapsed simulated time within the current phase.
///
/// Invariant: `elapsed >= 0` and it only grows until [`AnimationClock::reset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    elapsed: f64,
    step: f64,
    ticks: u64,
}

impl AnimationClock {
    /// Create a clock with the given fixed step.
    ///
    /// Non-finite or non-positive steps fall back to [`DEFAULT_FIXED_STEP`].
    pub fn new(step: f64) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            DEFAULT_FIXED_STEP
        };
        Self {
            elapsed: 0.0,
            step,
            ticks: 0,
        }
    }

    /// Advance by one fixed step scaled by `speed`.
    ///
    /// `speed` below 1 is treated as 1; the multiplier never slows time down.
    pub fn advance(&mut self, speed: f64) {
        let speed = if speed.is_finite() { speed.max(1.0) } else { 1.0 };
        self.elapsed += self.step * speed;
        self.ticks += 1;
    }

    /// Simulated seconds since the last reset.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Ticks since the last reset.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The fixed step in simulated seconds.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Back to zero (phase transition).
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.ticks = 0;
    }

    /// `elapsed >= threshold / speed`.
    #[inline]
    pub fn is_due(&self, threshold: f64, speed: f64) -> bool {
        self.elapsed >= threshold / speed.max(1.0)
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_STEP)
    }
}
