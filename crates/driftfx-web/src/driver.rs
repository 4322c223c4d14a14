#![forbid(unsafe_code)]

//! Host-driven frame driver.
//!
//! [`FrameDriver`] owns the intro typewriter and, after the hand-off, the
//! [`PhaseAnimator`]. It never blocks and never spawns threads. The host
//! drives it explicitly:
//!
//! 1. **Create**: `FrameDriver::new(config, width, height)`.
//! 2. **Input**: `driver.push_click(at)` / `driver.resize(w, h)`.
//! 3. **Time**: `driver.advance_time(dt)`.
//! 4. **Step**: `driver.step(&mut surface)` drains queued events, advances the
//!    active stage by the time since the previous step, and draws one frame.
//!
//! Click timestamps are driver-clock time. They are rebased onto the
//! animator's own host time, which starts at the hand-off.
//!
//! # Example
//!
//! ```ignore
//! use driftfx_web::{DriverConfig, FrameDriver};
//! use driftfx_render::PixelSurface;
//!
//! let mut driver = FrameDriver::new(DriverConfig::default(), 320, 240);
//! let mut surface = PixelSurface::new(320, 240);
//! driver.advance_time(Duration::from_millis(16));
//! let result = driver.step(&mut surface);
//! ```

use core::time::Duration;
use std::collections::VecDeque;

use driftfx_core::event::Event;
use driftfx_core::geometry::Size;
use driftfx_extras::intro::QuestionTypewriter;
use driftfx_extras::{AnimatorConfig, Phase, PhaseAnimator, Transition};
use driftfx_render::Surface;

use crate::DeterministicClock;

/// Driver configuration.
#[derive(Debug, Clone, Default)]
pub struct DriverConfig {
    /// Configuration for the animator created at the hand-off.
    pub animator: AnimatorConfig,
    /// Start directly in the animator stage.
    pub skip_intro: bool,
}

impl DriverConfig {
    #[must_use]
    pub fn with_animator(mut self, animator: AnimatorConfig) -> Self {
        self.animator = animator;
        self
    }

    #[must_use]
    pub fn with_skip_intro(mut self, skip: bool) -> Self {
        self.skip_intro = skip;
        self
    }
}

/// Which part of the show is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Intro,
    Animator,
}

/// Outcome of a single [`FrameDriver::step`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Frames drawn so far, including this one.
    pub frame_idx: u64,
    /// Stage active after the step.
    pub stage: Stage,
    /// Animator phase, once the animator runs.
    pub phase: Option<Phase>,
    /// Current speed multiplier (1 during the intro).
    pub speed: f64,
    /// Phase transition taken at the end of this frame.
    pub transition: Option<Transition>,
    /// Number of queued events drained.
    pub events_processed: u32,
}

/// Runs the intro, then the phase animator, one host frame at a time.
#[derive(Debug)]
pub struct FrameDriver {
    config: DriverConfig,
    clock: DeterministicClock,
    last_step: Duration,
    events: VecDeque<Event>,
    size: Size,
    intro: QuestionTypewriter,
    animator: Option<PhaseAnimator>,
    animator_epoch: Duration,
    frame_idx: u64,
}

impl FrameDriver {
    /// Create a driver for a surface of `width × height`.
    pub fn new(config: DriverConfig, width: u32, height: u32) -> Self {
        let size = Size::new(width, height);
        let animator = config
            .skip_intro
            .then(|| PhaseAnimator::new(config.animator.clone(), size));
        Self {
            config,
            clock: DeterministicClock::new(),
            last_step: Duration::ZERO,
            events: VecDeque::new(),
            size,
            intro: QuestionTypewriter::new(),
            animator,
            animator_epoch: Duration::ZERO,
            frame_idx: 0,
        }
    }

    /// Queue a click at driver time `at`. Clicks during the intro are dropped.
    pub fn push_click(&mut self, at: Duration) {
        self.push_event(Event::speed_up(at));
    }

    /// Queue a click at the current driver time.
    pub fn click_now(&mut self) {
        self.push_click(self.clock.now());
    }

    /// Queue a host event. Events are processed on the next [`step`](Self::step).
    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Queue a surface size change.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.push_event(Event::Resize(Size::new(width, height)));
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the deterministic clock to an absolute time. Going backwards
    /// yields a zero-length next frame.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Drain queued events, advance the active stage, and draw one frame.
    pub fn step(&mut self, surface: &mut dyn Surface) -> StepResult {
        let now = self.clock.now();
        let delta = now.saturating_sub(self.last_step);
        self.last_step = now;

        let mut events_processed: u32 = 0;
        while let Some(event) = self.events.pop_front() {
            events_processed += 1;
            self.handle_event(event);
        }

        let transition = match self.animator.as_mut() {
            Some(animator) => animator.frame(delta, surface),
            None => {
                self.intro.advance(delta);
                if self.intro.handoff_requested() {
                    self.start_animator(now);
                    self.animator
                        .as_mut()
                        .and_then(|animator| animator.frame(Duration::ZERO, surface))
                } else {
                    self.intro.draw(surface);
                    None
                }
            }
        };
        self.frame_idx += 1;

        StepResult {
            frame_idx: self.frame_idx,
            stage: self.stage(),
            phase: self.animator.as_ref().map(PhaseAnimator::phase),
            speed: self.speed(),
            transition,
            events_processed,
        }
    }

    /// Active stage.
    pub fn stage(&self) -> Stage {
        if self.animator.is_some() {
            Stage::Animator
        } else {
            Stage::Intro
        }
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f64 {
        self.animator.as_ref().map_or(1.0, PhaseAnimator::speed)
    }

    /// The animator, once the hand-off has happened.
    pub fn animator(&self) -> Option<&PhaseAnimator> {
        self.animator.as_ref()
    }

    pub fn intro(&self) -> &QuestionTypewriter {
        &self.intro
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Current driver time.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Frames drawn so far.
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    /// Last known surface size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of events waiting for the next step.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    // --- Private helpers ---

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Resize(size) => {
                self.size = size;
                if let Some(animator) = self.animator.as_mut() {
                    animator.resize(size);
                }
            }
            Event::SpeedUp { at } => {
                let Some(animator) = self.animator.as_mut() else {
                    crate::trace!("click ignored during intro");
                    return;
                };
                animator.register_speed_input(at.saturating_sub(self.animator_epoch));
            }
        }
    }

    fn start_animator(&mut self, now: Duration) {
        crate::debug!(
            at_ms = now.as_millis() as u64,
            width = self.size.width,
            height = self.size.height,
            "intro handed off to animator"
        );
        self.animator_epoch = now;
        self.animator = Some(PhaseAnimator::new(self.config.animator.clone(), self.size));
    }
}
