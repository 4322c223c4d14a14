#![forbid(unsafe_code)]

//! Question typewriter shown before the phase animator.
//!
//! Each question is typed one character per 50 ms, held for 3 s, then
//! deleted one character per 25 ms before the next one starts. When the
//! fourth question comes up, a hand-off to the animator is scheduled one
//! second later. All timing is host time.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use driftfx_render::{PackedRgba, Surface, TextStyle, text_advance};

use crate::dialogue::visible_prefix;

/// The questions, in order. The cycle wraps after the last one.
pub const QUESTIONS: &[&str] = &[
    "who are you?",
    "who am i?",
    "do you know who you are?",
    "do you even know who you are",
];

pub const TYPE_DELAY: Duration = Duration::from_millis(50);
pub const DELETE_DELAY: Duration = Duration::from_millis(25);
pub const HOLD_DELAY: Duration = Duration::from_millis(3000);
/// Question index whose arrival schedules the hand-off.
pub const HANDOFF_INDEX: usize = 3;
pub const HANDOFF_DELAY: Duration = Duration::from_millis(1000);

pub const INTRO_FONT: f64 = 24.0;
pub const INTRO_MARGIN: f64 = 20.0;
pub const INTRO_COLOR: PackedRgba = PackedRgba::GREEN;
pub const CURSOR: &str = "_";
const CURSOR_BLINK: Duration = Duration::from_millis(500);

/// What the typewriter is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeStage {
    Typing,
    Holding,
    Deleting,
}

/// Host-time driven question typewriter.
#[derive(Debug, Clone)]
pub struct QuestionTypewriter {
    index: usize,
    shown: usize,
    stage: TypeStage,
    now: Duration,
    next_step: Duration,
    handoff_at: Option<Duration>,
}

impl Default for QuestionTypewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionTypewriter {
    pub fn new() -> Self {
        Self {
            index: 0,
            shown: 0,
            stage: TypeStage::Typing,
            now: Duration::ZERO,
            next_step: TYPE_DELAY,
            handoff_at: None,
        }
    }

    /// Advance by `dt` of host time, running every step that fell due.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
        while self.now >= self.next_step {
            self.step();
        }
    }

    fn step(&mut self) {
        let len = self.question().graphemes(true).count();
        let delay = match self.stage {
            TypeStage::Typing if self.shown < len => {
                self.shown += 1;
                TYPE_DELAY
            }
            TypeStage::Typing => {
                self.stage = TypeStage::Holding;
                HOLD_DELAY
            }
            TypeStage::Holding => {
                self.stage = TypeStage::Deleting;
                DELETE_DELAY
            }
            TypeStage::Deleting if self.shown > 0 => {
                self.shown -= 1;
                DELETE_DELAY
            }
            TypeStage::Deleting => {
                self.index = (self.index + 1) % QUESTIONS.len();
                self.stage = TypeStage::Typing;
                if self.index == HANDOFF_INDEX && self.handoff_at.is_none() {
                    self.handoff_at = Some(self.next_step + HANDOFF_DELAY);
                    crate::debug!(index = self.index, "intro hand-off scheduled");
                }
                TYPE_DELAY
            }
        };
        self.next_step += delay;
    }

    /// Current question.
    pub fn question(&self) -> &'static str {
        QUESTIONS.get(self.index).copied().unwrap_or_default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn stage(&self) -> TypeStage {
        self.stage
    }

    /// Text currently on screen (without cursor).
    pub fn visible_text(&self) -> &'static str {
        visible_prefix(self.question(), self.shown)
    }

    /// Whether the animator should take over.
    pub fn handoff_requested(&self) -> bool {
        self.handoff_at.is_some_and(|at| self.now >= at)
    }

    /// Host time at which the hand-off fires, once scheduled.
    pub fn handoff_at(&self) -> Option<Duration> {
        self.handoff_at
    }

    pub fn cursor_visible(&self) -> bool {
        (self.now.as_millis() / CURSOR_BLINK.as_millis()) % 2 == 0
    }

    /// Draw the terminal: opaque black, text, blinking cursor.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear(PackedRgba::BLACK);
        let style = TextStyle::new(INTRO_FONT, INTRO_COLOR);
        let text = self.visible_text();
        let baseline = INTRO_MARGIN + INTRO_FONT;
        surface.fill_text(text, INTRO_MARGIN, baseline, style);
        if self.cursor_visible() {
            let x = INTRO_MARGIN + text_advance(text, INTRO_FONT);
            surface.fill_text(CURSOR, x, baseline, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftfx_render::RecordingSurface;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn types_one_char_per_50ms() {
        let mut t = QuestionTypewriter::new();
        assert_eq!(t.visible_text(), "");
        t.advance(ms(50));
        assert_eq!(t.visible_text(), "w");
        t.advance(ms(100));
        assert_eq!(t.visible_text(), "who");
        assert_eq!(t.stage(), TypeStage::Typing);
    }

    #[test]
    fn holds_then_deletes() {
        let mut t = QuestionTypewriter::new();
        // "who are you?" is 12 chars: fully typed at 600 ms.
        t.advance(ms(600));
        assert_eq!(t.visible_text(), "who are you?");
        t.advance(ms(50));
        assert_eq!(t.stage(), TypeStage::Holding);
        t.advance(ms(2_999));
        assert_eq!(t.visible_text(), "who are you?");
        t.advance(ms(1));
        assert_eq!(t.stage(), TypeStage::Deleting);
        t.advance(ms(50));
        assert_eq!(t.visible_text(), "who are yo");
    }

    #[test]
    fn moves_to_next_question() {
        let mut t = QuestionTypewriter::new();
        // 12 typed + hold + 12 deleted + one empty step.
        t.advance(ms(650 + 3_000 + 25 * 13));
        assert_eq!(t.index(), 1);
        assert_eq!(t.visible_text(), "");
        assert!(!t.handoff_requested());
    }

    #[test]
    fn hands_off_after_third_question() {
        let mut t = QuestionTypewriter::new();
        let mut elapsed = Duration::ZERO;
        while t.index() < HANDOFF_INDEX {
            t.advance(ms(10));
            elapsed += ms(10);
            assert!(elapsed < Duration::from_secs(30));
        }
        let at = t.handoff_at().expect("hand-off scheduled");
        assert!(!t.handoff_requested());
        let wait = at.saturating_sub(elapsed);
        assert!(wait <= HANDOFF_DELAY);
        t.advance(wait);
        assert!(t.handoff_requested());
    }

    #[test]
    fn large_steps_catch_up() {
        let mut a = QuestionTypewriter::new();
        let mut b = QuestionTypewriter::new();
        a.advance(ms(5_000));
        for _ in 0..500 {
            b.advance(ms(10));
        }
        assert_eq!(a.visible_text(), b.visible_text());
        assert_eq!(a.stage(), b.stage());
    }

    #[test]
    fn draw_includes_cursor_when_visible() {
        let mut t = QuestionTypewriter::new();
        t.advance(ms(100));
        let mut s = RecordingSurface::new(400, 100);
        t.draw(&mut s);
        assert_eq!(s.texts(), vec!["wh", "_"]);
        t.advance(ms(450));
        s.clear_ops();
        t.draw(&mut s);
        assert_eq!(s.texts().len(), 1);
    }
}
