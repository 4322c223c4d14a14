#![forbid(unsafe_code)]

//! Click-driven speed multiplier with inactivity decay.
//!
//! Each input is classified by its distance from the previous one:
//!
//! | Gap to previous input | Kind   | Effect                   |
//! |-----------------------|--------|--------------------------|
//! | `< 500 ms`            | Double | `min(8, m * 2.5)`        |
//! | otherwise / first     | Single | `min(8, m + 1.5)`        |
//!
//! Every input (re)arms a 5 s countdown; when it expires the multiplier snaps
//! back to 1. A newer input simply overwrites the pending deadline.
//!
//! Timestamps are host time as a [`Duration`] since an arbitrary epoch. They
//! are expected to be monotonic; an input that arrives "before" the previous
//! one is classified as a single input.

use std::time::Duration;

/// Lower bound of the multiplier.
pub const MIN_SPEED: f64 = 1.0;
/// Upper bound of the multiplier.
pub const MAX_SPEED: f64 = 8.0;
/// Added on a single input.
pub const SINGLE_INPUT_BOOST: f64 = 1.5;
/// Multiplied on a double input.
pub const DOUBLE_INPUT_FACTOR: f64 = 2.5;
/// Two inputs closer than this form a double input.
pub const DOUBLE_INPUT_WINDOW: Duration = Duration::from_millis(500);
/// Inactivity after which the multiplier resets.
pub const DECAY_AFTER: Duration = Duration::from_secs(5);

/// How an input was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Isolated input.
    Single,
    /// Second input within [`DOUBLE_INPUT_WINDOW`].
    Double,
}

/// Result of registering an input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedChange {
    pub kind: InputKind,
    pub before: f64,
    pub after: f64,
}

/// Speed multiplier state. Single writer, single reader; no locking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedControl {
    multiplier: f64,
    last_input: Option<Duration>,
    reset_at: Option<Duration>,
}

impl SpeedControl {
    /// Multiplier 1, no pending countdown.
    pub const fn new() -> Self {
        Self {
            multiplier: MIN_SPEED,
            last_input: None,
            reset_at: None,
        }
    }

    /// Current multiplier, always in `[MIN_SPEED, MAX_SPEED]`.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Host time at which the multiplier will reset, if a countdown is armed.
    #[inline]
    pub fn reset_deadline(&self) -> Option<Duration> {
        self.reset_at
    }

    /// Register a speed-up input at host time `at`.
    pub fn register_input(&mut self, at: Duration) -> SpeedChange {
        let kind = match self.last_input {
            Some(prev) if at >= prev && at - prev < DOUBLE_INPUT_WINDOW => InputKind::Double,
            _ => InputKind::Single,
        };
        let before = self.multiplier;
        let raw = match kind {
            InputKind::Double => before * DOUBLE_INPUT_FACTOR,
            InputKind::Single => before + SINGLE_INPUT_BOOST,
        };
        self.multiplier = raw.clamp(MIN_SPEED, MAX_SPEED);
        self.last_input = Some(at);
        self.reset_at = Some(at.saturating_add(DECAY_AFTER));

        crate::trace!(
            kind = ?kind,
            before,
            after = self.multiplier,
            "speed input"
        );

        SpeedChange {
            kind,
            before,
            after: self.multiplier,
        }
    }

    /// Expire the countdown if `now` has reached it. Returns `true` on reset.
    pub fn update(&mut self, now: Duration) -> bool {
        match self.reset_at {
            Some(deadline) if now >= deadline => {
                self.multiplier = MIN_SPEED;
                self.reset_at = None;
                crate::trace!("speed multiplier decayed");
                true
            }
            _ => false,
        }
    }
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn first_input_is_single() {
        let mut speed = SpeedControl::new();
        let change = speed.register_input(ms(1000));
        assert_eq!(change.kind, InputKind::Single);
        assert_eq!(speed.multiplier(), 2.5);
    }

    #[test]
    fn close_inputs_are_double() {
        let mut speed = SpeedControl::new();
        speed.register_input(ms(1000));
        let change = speed.register_input(ms(1100));
        assert_eq!(change.kind, InputKind::Double);
        assert_eq!(change.before, 2.5);
        assert_eq!(speed.multiplier(), 6.25);
    }

    #[test]
    fn distant_inputs_are_single() {
        let mut speed = SpeedControl::new();
        speed.register_input(ms(1000));
        let change = speed.register_input(ms(1600));
        assert_eq!(change.kind, InputKind::Single);
        assert_eq!(speed.multiplier(), 4.0);
    }

    #[test]
    fn window_boundary_is_single() {
        let mut speed = SpeedControl::new();
        speed.register_input(ms(0));
        let change = speed.register_input(ms(500));
        assert_eq!(change.kind, InputKind::Single);
    }

    #[test]
    fn clamped_at_max() {
        let mut speed = SpeedControl::new();
        for i in 0..10 {
            speed.register_input(ms(i * 100));
        }
        assert_eq!(speed.multiplier(), MAX_SPEED);
    }

    #[test]
    fn decays_exactly_after_five_seconds() {
        let mut speed = SpeedControl::new();
        speed.register_input(ms(2000));
        assert!(!speed.update(ms(6999)));
        assert_eq!(speed.multiplier(), 2.5);
        assert!(speed.update(ms(7000)));
        assert_eq!(speed.multiplier(), 1.0);
        assert_eq!(speed.reset_deadline(), None);
    }

    #[test]
    fn later_input_rearms_countdown() {
        let mut speed = SpeedControl::new();
        speed.register_input(ms(0));
        speed.register_input(ms(4000));
        assert!(!speed.update(ms(5000)));
        assert_eq!(speed.reset_deadline(), Some(ms(9000)));
        assert!(speed.update(ms(9000)));
    }

    #[test]
    fn out_of_order_input_is_single() {
        let mut speed = SpeedControl::new();
        speed.register_input(ms(1000));
        let change = speed.register_input(ms(900));
        assert_eq!(change.kind, InputKind::Single);
    }
}
