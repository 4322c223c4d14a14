#![forbid(unsafe_code)]

//! Host input events.
//!
//! Hosts translate their native events (pointer clicks, window resizes) into
//! this small vocabulary. Timestamps are host time since an arbitrary epoch.

use std::time::Duration;

use crate::geometry::Size;

/// An input delivered by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// A speed-up request (pointer click on the surface).
    SpeedUp { at: Duration },
    /// The drawing surface changed size.
    Resize(Size),
}

impl Event {
    /// Convenience constructor for a speed-up request.
    pub const fn speed_up(at: Duration) -> Self {
        Self::SpeedUp { at }
    }
}
