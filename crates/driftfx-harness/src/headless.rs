#![forbid(unsafe_code)]

//! Headless animator runs.
//!
//! A [`Script`] fixes everything that can influence the pixels: animator
//! configuration, surface size, frame count, host delta per frame, and the
//! frames at which a click arrives. Running the same script twice yields the
//! same [`FrameRecord`]s.

use std::time::Duration;

use driftfx_core::geometry::Size;
use driftfx_extras::{AnimatorConfig, Phase, PhaseAnimator, Transition};
use driftfx_render::PixelSurface;

use crate::golden::frame_checksum;

/// Host delta per frame (a 60 Hz display, rounded down).
pub const FRAME_DELTA: Duration = Duration::from_millis(16);

/// What one frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    /// Animator frame index after this frame (1-based).
    pub frame_id: u64,
    /// Phase that was drawn.
    pub phase: Phase,
    /// Speed multiplier in effect while drawing.
    pub speed: f64,
    pub checksum: String,
    /// Transition taken at the end of the frame.
    pub transition: Option<Transition>,
}

/// A reproducible headless run.
#[derive(Debug, Clone)]
pub struct Script {
    pub config: AnimatorConfig,
    pub size: Size,
    pub frames: u64,
    pub frame_delta: Duration,
    /// 0-based frame numbers that receive a click before they are drawn.
    pub clicks: Vec<u64>,
}

impl Script {
    pub fn new(config: AnimatorConfig, size: Size, frames: u64) -> Self {
        Self {
            config,
            size,
            frames,
            frame_delta: FRAME_DELTA,
            clicks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clicks(mut self, clicks: impl IntoIterator<Item = u64>) -> Self {
        self.clicks = clicks.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_frame_delta(mut self, delta: Duration) -> Self {
        self.frame_delta = delta;
        self
    }
}

/// Run `frames` frames without input and record each one.
pub fn run_headless(config: &AnimatorConfig, frames: u64, size: Size) -> Vec<FrameRecord> {
    run_script(&Script::new(config.clone(), size, frames))
}

/// Run a script and record each frame.
pub fn run_script(script: &Script) -> Vec<FrameRecord> {
    let mut animator = PhaseAnimator::new(script.config.clone(), script.size);
    let mut surface = PixelSurface::new(script.size.width, script.size.height);
    let mut records = Vec::with_capacity(usize::try_from(script.frames).unwrap_or(0));

    for i in 0..script.frames {
        if script.clicks.contains(&i) {
            animator.register_speed_input(animator.host_time());
        }
        let phase = animator.phase();
        let transition = animator.frame(script.frame_delta, &mut surface);
        records.push(FrameRecord {
            frame_id: animator.frame_index(),
            phase,
            speed: animator.speed(),
            checksum: frame_checksum(&surface),
            transition,
        });
    }
    records
}
