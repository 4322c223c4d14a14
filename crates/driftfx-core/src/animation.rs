#![forbid(unsafe_code)]

//! Host-time envelopes.
//!
//! These run on host (wall-clock) time, unlike the phase clock in
//! [`crate::clock`], which advances in fixed simulated steps. Overlays such
//! as the speed badge use them so their envelopes stay stable regardless of
//! the current speed multiplier.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A host-time animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Fade in, hold, fade out. Value is 0 before start and after the release.
#[derive(Debug, Clone, Copy)]
pub struct Envelope {
    attack: Duration,
    hold: Duration,
    release: Duration,
    elapsed: Duration,
    active: bool,
}

impl Envelope {
    /// Create an idle envelope. Call [`Envelope::trigger`] to start it.
    pub const fn new(attack: Duration, hold: Duration, release: Duration) -> Self {
        Self {
            attack,
            hold,
            release,
            elapsed: Duration::ZERO,
            active: false,
        }
    }

    /// Restart from the beginning of the attack.
    pub fn trigger(&mut self) {
        self.elapsed = Duration::ZERO;
        self.active = true;
    }

    /// Whether the envelope is currently producing a value.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Total length of attack + hold + release.
    pub fn total(&self) -> Duration {
        self.attack + self.hold + self.release
    }
}

impl Animation for Envelope {
    fn tick(&mut self, dt: Duration) {
        if !self.active {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.total() {
            self.active = false;
        }
    }

    fn is_complete(&self) -> bool {
        !self.active
    }

    fn value(&self) -> f32 {
        if !self.active {
            return 0.0;
        }
        let e = self.elapsed;
        if e < self.attack {
            return (e.as_secs_f32() / self.attack.as_secs_f32()).clamp(0.0, 1.0);
        }
        let held = self.attack + self.hold;
        if e < held {
            return 1.0;
        }
        if self.release.is_zero() {
            return 0.0;
        }
        let into_release = (e - held).as_secs_f32() / self.release.as_secs_f32();
        (1.0 - into_release).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.active = false;
    }
}
