//! Phase animator and visual effects for driftfx.
//!
//! The centerpiece is [`PhaseAnimator`], a per-frame cyclic phase machine
//! that draws onto any [`driftfx_render::Surface`]. Each phase lives in its
//! own module so it can be rendered and tested in isolation.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`phase`] | phase enum and transition table |
//! | [`config`] | timing table and animator configuration |
//! | [`grid`] | particle grid (converge spiral, reveal scatter) |
//! | [`faces`] | static face templates, reveal and melt drawing |
//! | [`attractor`] | bounded Lorenz trace |
//! | [`caption`] | dictionary caption reveal and glitch |
//! | [`glitch`] | noise, scan lines, glitched question, symbol storm |
//! | [`dialogue`] | type-then-backspace dialogue timing |
//! | [`badge`] | transient speed badge |
//! | [`intro`] | question typewriter (feature `intro`) |
//! | [`quantum`] | generated wave-field art (feature `quantum-art`) |

#![forbid(unsafe_code)]

#[allow(unused_imports)]
pub(crate) use driftfx_core::{debug, trace};

pub mod animator;
pub mod attractor;
pub mod badge;
pub mod caption;
pub mod config;
pub mod dialogue;
pub mod faces;
pub mod glitch;
pub mod grid;
pub mod phase;

#[cfg(feature = "intro")]
pub mod intro;

#[cfg(feature = "quantum-art")]
pub mod quantum;

pub use animator::PhaseAnimator;
pub use config::{AnimatorConfig, AttractorConfig, TimingTable};
pub use phase::{Phase, Transition};
