#![forbid(unsafe_code)]

//! Core: simulation clock, speed control, seeded randomness, and input events.

pub mod animation;
pub mod clock;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod rng;
pub mod speed;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, info_span, trace, trace_span, warn};
