#![forbid(unsafe_code)]

//! `driftfx-web` runs the intro and the phase animator from a host loop.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes clicks and size changes.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The crate does not bind to `wasm-bindgen`. A JS shim only has to forward
//! `requestAnimationFrame` deltas to [`FrameDriver::advance_time`] and call
//! [`FrameDriver::step`] with a canvas-backed [`Surface`](driftfx_render::Surface).

pub mod driver;

use core::time::Duration;

pub use driver::{DriverConfig, FrameDriver, Stage, StepResult};

#[allow(unused_imports)]
pub(crate) use driftfx_core::{debug, trace};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance current monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero_and_advances() {
        let mut clock = DeterministicClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(17));
        assert_eq!(clock.now(), Duration::from_millis(33));
    }

    #[test]
    fn clock_set_and_saturate() {
        let mut clock = DeterministicClock::new();
        clock.set(Duration::MAX);
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::MAX);
    }
}
