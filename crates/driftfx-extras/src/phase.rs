#![forbid(unsafe_code)]

//! The phase sequence and its transition table.
//!
//! Phases form a fixed cycle:
//!
//! ```text
//! Converge -> FaceReveal(0) -> .. -> FaceReveal(n-1) -> MeltToAttractor
//!   -> TextReveal -> TextGlitch -> FinalGlitchText -> Dialogue
//!   -> SymbolStorm -> Converge
//! ```
//!
//! [`Phase::next`] is the whole transition table; nothing else decides what
//! follows what.

use std::fmt;

/// One visual phase of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Particle grid spirals toward the center.
    #[default]
    Converge,
    /// A face template assembles out of scattered points.
    FaceReveal { face: usize },
    /// The last face melts away while the attractor trace grows.
    MeltToAttractor,
    /// The attractor fades as the dictionary caption fades in.
    TextReveal,
    /// The caption shakes and dissolves into noise.
    TextGlitch,
    /// The question, glitched character by character.
    FinalGlitchText,
    /// Five lines typed, held and backspaced.
    Dialogue,
    /// Full-surface grid of random symbols.
    SymbolStorm,
}

impl Phase {
    /// Number of distinct phase kinds (face reveals count once).
    pub const KINDS: usize = 8;

    /// The phase that follows `self`, given how many faces exist.
    ///
    /// With no faces the face-reveal step is skipped entirely.
    pub const fn next(self, face_count: usize) -> Phase {
        match self {
            Phase::Converge if face_count == 0 => Phase::MeltToAttractor,
            Phase::Converge => Phase::FaceReveal { face: 0 },
            Phase::FaceReveal { face } if face + 1 < face_count => {
                Phase::FaceReveal { face: face + 1 }
            }
            Phase::FaceReveal { .. } => Phase::MeltToAttractor,
            Phase::MeltToAttractor => Phase::TextReveal,
            Phase::TextReveal => Phase::TextGlitch,
            Phase::TextGlitch => Phase::FinalGlitchText,
            Phase::FinalGlitchText => Phase::Dialogue,
            Phase::Dialogue => Phase::SymbolStorm,
            Phase::SymbolStorm => Phase::Converge,
        }
    }

    /// Position in the cycle, `0..KINDS` (all face reveals share 1).
    pub const fn ordinal(self) -> usize {
        match self {
            Phase::Converge => 0,
            Phase::FaceReveal { .. } => 1,
            Phase::MeltToAttractor => 2,
            Phase::TextReveal => 3,
            Phase::TextGlitch => 4,
            Phase::FinalGlitchText => 5,
            Phase::Dialogue => 6,
            Phase::SymbolStorm => 7,
        }
    }

    /// Stable snake_case name, used in logs and golden files.
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Converge => "converge",
            Phase::FaceReveal { .. } => "face_reveal",
            Phase::MeltToAttractor => "melt_to_attractor",
            Phase::TextReveal => "text_reveal",
            Phase::TextGlitch => "text_glitch",
            Phase::FinalGlitchText => "final_glitch_text",
            Phase::Dialogue => "dialogue",
            Phase::SymbolStorm => "symbol_storm",
        }
    }

    /// Per-tick progress increment at speed 1.
    pub const fn progress_rate(self) -> f64 {
        match self {
            Phase::Converge | Phase::FinalGlitchText => 0.0,
            Phase::FaceReveal { .. } | Phase::TextReveal => 0.08,
            Phase::MeltToAttractor | Phase::TextGlitch | Phase::SymbolStorm => 0.05,
            Phase::Dialogue => 0.03,
        }
    }

    /// Face index carried by a face reveal.
    pub const fn face(self) -> Option<usize> {
        match self {
            Phase::FaceReveal { face } => Some(face),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::FaceReveal { face } => write!(f, "face_reveal[{face}]"),
            other => f.write_str(other.name()),
        }
    }
}

/// A phase change reported by the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Frame index at which the change happened.
    pub frame: u64,
}

impl Transition {
    /// Whether this transition closes the cycle.
    pub fn restarts_cycle(&self) -> bool {
        matches!(self.from, Phase::SymbolStorm) && matches!(self.to, Phase::Converge)
    }
}
