#![forbid(unsafe_code)]

//! The phase animator.
//!
//! [`PhaseAnimator`] owns all per-run state: the current [`Phase`], the
//! simulated clock, the speed multiplier, the particle grid and the attractor
//! trace. A host drives it once per display refresh:
//!
//! ```rust,ignore
//! animator.tick(delta);          // simulation + host-time bookkeeping
//! animator.render(&mut surface); // draw, no state change
//! animator.advance_if_due();     // maybe move to the next phase
//! ```
//!
//! or simply `animator.frame(delta, &mut surface)`.
//!
//! # Determinism
//!
//! Simulation randomness (grid colors, scatter) comes from one generator
//! seeded by [`AnimatorConfig::seed`]. Draw-time randomness (glitch picks,
//! reveal jitter) is derived from `(seed, frame index)`, so rendering the
//! same state twice yields the same pixels.

use std::time::Duration;

use driftfx_core::clock::AnimationClock;
use driftfx_core::event::Event;
use driftfx_core::geometry::{Point, Size};
use driftfx_core::rng::FxRng;
use driftfx_core::speed::{SpeedChange, SpeedControl};
use driftfx_render::{PackedRgba, Surface};

use crate::attractor::AttractorTrace;
use crate::badge::SpeedBadge;
use crate::caption;
use crate::config::AnimatorConfig;
use crate::dialogue::{self, DIALOGUE};
use crate::faces::{self, FACES};
use crate::glitch;
use crate::grid::ParticleGrid;
use crate::phase::{Phase, Transition};

/// Translucent black drawn at the start of every frame so motion leaves
/// trails.
pub const VEIL: PackedRgba = PackedRgba::rgba(0, 0, 0, 26);

/// Hue rotation of the attractor trace, degrees per simulated second.
const TRACE_HUE_RATE: f64 = 15.0;
/// Angular rate of the melt sway.
const MELT_SWAY_RATE: f64 = 3.0;

/// Per-frame cyclic phase machine.
#[derive(Debug, Clone)]
pub struct PhaseAnimator {
    config: AnimatorConfig,
    phase: Phase,
    clock: AnimationClock,
    progress: f64,
    speed: SpeedControl,
    host_time: Duration,
    size: Size,
    grid: ParticleGrid,
    trace: AttractorTrace,
    badge: SpeedBadge,
    rng: FxRng,
    face: usize,
    frame: u64,
}

impl PhaseAnimator {
    /// Start at [`Phase::Converge`] with a grid covering `size`.
    pub fn new(config: AnimatorConfig, size: Size) -> Self {
        let mut rng = FxRng::new(config.seed);
        let grid = ParticleGrid::generate(size, config.pixel_size, &mut rng);
        let trace = AttractorTrace::new(config.attractor);
        Self {
            clock: AnimationClock::new(config.fixed_step),
            config,
            phase: Phase::Converge,
            progress: 0.0,
            speed: SpeedControl::new(),
            host_time: Duration::ZERO,
            size,
            grid,
            trace,
            badge: SpeedBadge::new(),
            rng,
            face: 0,
            frame: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Simulated seconds since the current phase began.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Phase progress accumulator (may exceed 1).
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Current speed multiplier in `[1, 8]`.
    pub fn speed(&self) -> f64 {
        self.speed.multiplier()
    }

    pub fn speed_control(&self) -> &SpeedControl {
        &self.speed
    }

    pub fn grid(&self) -> &ParticleGrid {
        &self.grid
    }

    pub fn trace(&self) -> &AttractorTrace {
        &self.trace
    }

    pub fn badge(&self) -> &SpeedBadge {
        &self.badge
    }

    /// Number of ticks so far.
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Host time accumulated from tick deltas.
    pub fn host_time(&self) -> Duration {
        self.host_time
    }

    /// Surface size used for simulation and the next grid regeneration.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Face shown by the current (or most recent) reveal.
    pub fn current_face(&self) -> usize {
        self.face
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Register a speed-up input at host time `at`.
    pub fn register_speed_input(&mut self, at: Duration) -> SpeedChange {
        let change = self.speed.register_input(at);
        self.badge.show(change.after);
        change
    }

    /// Record a new surface size. The grid keeps its layout until the cycle
    /// restarts.
    pub fn resize(&mut self, size: Size) {
        if size != self.size {
            crate::debug!(width = size.width, height = size.height, "animator resized");
            self.size = size;
        }
    }

    /// Apply a host event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::SpeedUp { at } => {
                self.register_speed_input(at);
            }
            Event::Resize(size) => self.resize(size),
        }
    }

    // ── Frame loop ───────────────────────────────────────────────────────

    /// Advance the simulation by one tick.
    ///
    /// `delta` is host time since the previous tick; it only feeds the speed
    /// decay and the badge. Phase time always advances by
    /// `fixed_step * speed`.
    pub fn tick(&mut self, delta: Duration) {
        self.host_time = self.host_time.saturating_add(delta);
        self.speed.update(self.host_time);
        self.badge.tick(delta);

        let speed = self.speed.multiplier();
        self.progress += self.phase.progress_rate() * speed;
        let center = self.size.center();
        match self.phase {
            Phase::Converge => self.grid.converge(center, self.clock.elapsed(), speed),
            Phase::FaceReveal { .. } if self.progress < 1.0 => {
                self.grid.scatter(center, speed, &mut self.rng);
            }
            Phase::MeltToAttractor => self.trace.extend(self.config.attractor.steps_per_tick),
            _ => {}
        }
        self.clock.advance(speed);
        self.frame += 1;
    }

    /// Draw the current phase onto `surface`.
    pub fn render(&self, surface: &mut dyn Surface) {
        let mut rng = FxRng::for_frame(self.config.seed, self.frame);
        let speed = self.speed.multiplier();
        let elapsed = self.clock.elapsed();
        let progress = self.progress;
        let ps = self.config.pixel_size as f64;
        let center = Size::new(surface.width(), surface.height()).center();

        surface.clear(VEIL);
        match self.phase {
            Phase::Converge => self.grid.draw(surface, 1.0),
            Phase::FaceReveal { face } => {
                if progress < 1.0 {
                    self.grid.draw(surface, 1.0 - progress);
                }
                if let Some(template) = faces::face(face) {
                    template.draw_reveal(surface, ps, progress, &mut rng);
                }
            }
            Phase::MeltToAttractor => {
                if let Some(template) = faces::face(self.face) {
                    let sway = (elapsed * MELT_SWAY_RATE * speed).sin();
                    template.draw_melt(surface, ps, progress, sway);
                }
                self.draw_trace(surface, center, progress.min(1.0));
            }
            Phase::TextReveal => {
                if progress < 1.0 {
                    self.draw_trace(surface, center, 1.0 - progress);
                }
                caption::draw_caption(surface, 0.0, progress.min(1.0));
            }
            Phase::TextGlitch => caption::draw_glitch(surface, elapsed, progress, &mut rng),
            Phase::FinalGlitchText => glitch::draw_final(surface, &mut rng),
            Phase::Dialogue => {
                surface.clear(PackedRgba::BLACK.with_opacity(progress.min(0.1)));
                dialogue::draw_dialogue(surface, elapsed, speed);
            }
            Phase::SymbolStorm => {
                surface.clear(PackedRgba::BLACK.with_opacity(progress.min(0.1)));
                glitch::draw_storm(surface, &mut rng);
            }
        }
        self.badge.draw(surface);
    }

    fn draw_trace(&self, surface: &mut dyn Surface, center: Point, opacity: f64) {
        let hue_shift = self.clock.elapsed() * TRACE_HUE_RATE * self.speed.multiplier();
        self.trace.draw(surface, center, hue_shift, opacity);
    }

    /// Move to the next phase if the current one has run its course.
    ///
    /// Due means `elapsed >= threshold / speed`. Returns the transition taken.
    pub fn advance_if_due(&mut self) -> Option<Transition> {
        let threshold = self.config.timing.threshold(self.phase, DIALOGUE.len());
        if !self.clock.is_due(threshold, self.speed.multiplier()) {
            return None;
        }
        let from = self.phase;
        let to = from.next(FACES.len());

        if from == Phase::TextReveal {
            self.trace.clear();
        }
        match to {
            Phase::FaceReveal { face } => self.face = face,
            Phase::MeltToAttractor => self.trace.clear(),
            Phase::Converge => {
                self.grid
                    .regenerate(self.size, self.config.pixel_size, &mut self.rng);
            }
            _ => {}
        }

        self.phase = to;
        self.clock.reset();
        self.progress = 0.0;
        crate::debug!(%from, %to, frame = self.frame, "phase transition");
        Some(Transition {
            from,
            to,
            frame: self.frame,
        })
    }

    /// One complete host frame: follow the surface size, tick, render, and
    /// advance.
    pub fn frame(&mut self, delta: Duration, surface: &mut dyn Surface) -> Option<Transition> {
        self.resize(Size::new(surface.width(), surface.height()));
        self.tick(delta);
        self.render(surface);
        self.advance_if_due()
    }
}
