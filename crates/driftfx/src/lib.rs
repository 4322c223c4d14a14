#![forbid(unsafe_code)]

//! driftfx public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use driftfx_core::clock::AnimationClock;
pub use driftfx_core::event::Event;
pub use driftfx_core::geometry::{Point, Size};
pub use driftfx_core::rng::FxRng;
pub use driftfx_core::speed::{SpeedChange, SpeedControl};

// --- Render re-exports -----------------------------------------------------

pub use driftfx_render::{
    DrawOp, PackedRgba, PixelSurface, RecordingSurface, Surface, TextAlign, TextStyle,
};

// --- Animator re-exports ---------------------------------------------------

pub use driftfx_extras::{AnimatorConfig, AttractorConfig, Phase, PhaseAnimator, TimingTable, Transition};

#[cfg(feature = "quantum-art")]
pub use driftfx_extras::quantum::{ArtLoadError, QuantumArtAnimator, QuantumArtPiece};

#[cfg(feature = "web")]
pub use driftfx_web::{DeterministicClock, DriverConfig, FrameDriver, Stage, StepResult};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for driftfx hosts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while reading assets or writing output.
    Io(std::io::Error),
    /// An asset could not be decoded.
    LoadFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::LoadFailed(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::LoadFailed(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "quantum-art")]
impl From<ArtLoadError> for Error {
    fn from(err: ArtLoadError) -> Self {
        Self::LoadFailed(err.to_string())
    }
}

/// Standard result type for driftfx APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Read a quantum art JSON file and build an animator over its pieces.
#[cfg(feature = "quantum-art")]
pub fn load_quantum_art(path: impl AsRef<std::path::Path>) -> Result<QuantumArtAnimator> {
    let json = std::fs::read_to_string(path)?;
    Ok(QuantumArtAnimator::from_json(&json)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnimatorConfig, Error, Event, PackedRgba, Phase, PhaseAnimator, PixelSurface, Result,
        Size, Surface, TextStyle,
    };

    #[cfg(feature = "web")]
    pub use crate::{DriverConfig, FrameDriver};

    pub use crate::{core, extras, render};
}

pub use driftfx_core as core;
pub use driftfx_extras as extras;
pub use driftfx_render as render;
