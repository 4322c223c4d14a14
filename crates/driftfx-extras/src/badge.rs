#![forbid(unsafe_code)]

//! Transient "Speed: N.Nx" label shown after each speed input.

use std::time::Duration;

use driftfx_core::animation::{Animation, Envelope};
use driftfx_render::{PackedRgba, Surface, TextStyle, text_advance};

pub const BADGE_FONT: f64 = 16.0;
/// Distance from the top-right corner.
pub const BADGE_MARGIN: f64 = 10.0;

const FADE_IN: Duration = Duration::from_millis(500);
const HOLD: Duration = Duration::from_millis(1000);
const FADE_OUT: Duration = Duration::from_millis(500);

/// Speed badge driven by host time.
#[derive(Debug, Clone)]
pub struct SpeedBadge {
    envelope: Envelope,
    label: String,
}

impl Default for SpeedBadge {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeedBadge {
    pub fn new() -> Self {
        Self {
            envelope: Envelope::new(FADE_IN, HOLD, FADE_OUT),
            label: String::new(),
        }
    }

    /// Show `multiplier`, restarting the fade.
    pub fn show(&mut self, multiplier: f64) {
        self.label = format!("Speed: {multiplier:.1}x");
        self.envelope.trigger();
    }

    /// Advance by host time.
    pub fn tick(&mut self, dt: Duration) {
        self.envelope.tick(dt);
    }

    pub fn is_visible(&self) -> bool {
        self.envelope.is_active()
    }

    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.envelope.value() as f64
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Draw right-aligned in the top-right corner.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let opacity = self.opacity();
        if opacity <= 0.0 || self.label.is_empty() {
            return;
        }
        let width = text_advance(&self.label, BADGE_FONT);
        let x = surface.width() as f64 - BADGE_MARGIN - width;
        let y = BADGE_MARGIN + BADGE_FONT;
        let style = TextStyle::new(BADGE_FONT, PackedRgba::WHITE.with_opacity(opacity));
        surface.fill_text(&self.label, x, y, style);
    }
}
