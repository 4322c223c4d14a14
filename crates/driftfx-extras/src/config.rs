#![forbid(unsafe_code)]

//! Animator configuration: phase thresholds, grid resolution, attractor
//! budget and the RNG seed.

use driftfx_core::clock::DEFAULT_FIXED_STEP;

use crate::phase::Phase;

/// Per-phase durations in simulated seconds at speed 1.
///
/// A phase is due when `elapsed >= threshold / speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingTable {
    pub converge: f64,
    /// Applies to each face separately.
    pub face_reveal: f64,
    pub melt: f64,
    pub text_reveal: f64,
    pub text_glitch: f64,
    pub final_glitch: f64,
    /// Multiplied by the number of dialogue lines.
    pub dialogue_per_line: f64,
    pub symbol_storm: f64,
}

impl TimingTable {
    /// The canonical cycle: 2, 2 per face, 5, 3, 2, 3, 0.3 per line, 5.
    pub const CANONICAL: Self = Self {
        converge: 2.0,
        face_reveal: 2.0,
        melt: 5.0,
        text_reveal: 3.0,
        text_glitch: 2.0,
        final_glitch: 3.0,
        dialogue_per_line: 0.3,
        symbol_storm: 5.0,
    };

    /// Threshold for `phase`, before dividing by speed.
    pub fn threshold(&self, phase: Phase, dialogue_lines: usize) -> f64 {
        match phase {
            Phase::Converge => self.converge,
            Phase::FaceReveal { .. } => self.face_reveal,
            Phase::MeltToAttractor => self.melt,
            Phase::TextReveal => self.text_reveal,
            Phase::TextGlitch => self.text_glitch,
            Phase::FinalGlitchText => self.final_glitch,
            Phase::Dialogue => self.dialogue_per_line * dialogue_lines as f64,
            Phase::SymbolStorm => self.symbol_storm,
        }
    }

    /// Every threshold multiplied by `factor` (handy for fast tests).
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            converge: self.converge * factor,
            face_reveal: self.face_reveal * factor,
            melt: self.melt * factor,
            text_reveal: self.text_reveal * factor,
            text_glitch: self.text_glitch * factor,
            final_glitch: self.final_glitch * factor,
            dialogue_per_line: self.dialogue_per_line * factor,
            symbol_storm: self.symbol_storm * factor,
        }
    }
}

impl Default for TimingTable {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Lorenz integration budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractorConfig {
    /// Integration steps appended per tick of the melt phase.
    pub steps_per_tick: usize,
    /// Maximum retained points; older points are evicted first.
    pub capacity: usize,
    /// Euler step size.
    pub dt: f64,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self {
            steps_per_tick: 150,
            capacity: 16_384,
            dt: 0.005,
        }
    }
}

/// Everything an animator needs besides the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    /// Seed for all randomness (grid colors, scatter, glitch picks).
    pub seed: u64,
    /// Grid cell edge in pixels.
    pub pixel_size: u32,
    /// Simulated seconds per tick at speed 1.
    pub fixed_step: f64,
    pub timing: TimingTable,
    pub attractor: AttractorConfig,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_D1F7,
            pixel_size: 2,
            fixed_step: DEFAULT_FIXED_STEP,
            timing: TimingTable::CANONICAL,
            attractor: AttractorConfig::default(),
        }
    }
}

impl AnimatorConfig {
    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the grid cell size (0 is treated as 1).
    #[must_use]
    pub fn with_pixel_size(mut self, pixel_size: u32) -> Self {
        self.pixel_size = pixel_size.max(1);
        self
    }

    /// Set the simulated step per tick.
    #[must_use]
    pub fn with_fixed_step(mut self, step: f64) -> Self {
        self.fixed_step = step;
        self
    }

    /// Replace the timing table.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingTable) -> Self {
        self.timing = timing;
        self
    }

    /// Set attractor steps per tick.
    #[must_use]
    pub fn with_attractor_steps(mut self, steps: usize) -> Self {
        self.attractor.steps_per_tick = steps;
        self
    }

    /// Set the attractor trace capacity (at least 1).
    #[must_use]
    pub fn with_attractor_capacity(mut self, capacity: usize) -> Self {
        self.attractor.capacity = capacity.max(1);
        self
    }
}
