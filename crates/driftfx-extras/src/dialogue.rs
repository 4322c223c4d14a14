#![forbid(unsafe_code)]

//! Type-then-backspace dialogue.
//!
//! Line `i` of length `L` runs on a local clock `t = elapsed - i`:
//!
//! | stage     | local time        | characters shown           |
//! |-----------|-------------------|----------------------------|
//! | Hidden    | `t < 0`           | 0                          |
//! | Growing   | `t < 0.1 L`       | `floor(10 t)`              |
//! | Held      | `t < 0.2 L`       | `L`                        |
//! | Shrinking | `t < 0.3 L`       | `L - floor(10 (t - 0.2 L))`|
//! | Done      | otherwise         | 0                          |
//!
//! Characters are grapheme clusters.

use unicode_segmentation::UnicodeSegmentation;

use driftfx_render::{PackedRgba, Surface, TextStyle};

/// The five dialogue lines.
pub const DIALOGUE: &[&str] = &[
    "wait, does that make sense?",
    "do you mean...",
    "who is the operative, that is unknown?",
    "or...",
    "is the reason you are operating, unknown?",
];

/// Characters typed (and deleted) per simulated second.
pub const CHARS_PER_SECOND: f64 = 10.0;
pub const DIALOGUE_FONT: f64 = 24.0;
pub const DIALOGUE_LINE_HEIGHT: f64 = 40.0;
/// Horizontal sway amplitude.
pub const SWAY: f64 = 8.0;
/// Echo copies trailing the first line.
pub const ECHOES: usize = 3;

// Absorbs representation error at stage boundaries (0.3 * 10 < 3).
const EPS: f64 = 1e-9;

/// Where a line is in its type/hold/delete cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStage {
    Hidden,
    Growing,
    Held,
    Shrinking,
    Done,
}

/// Stage of a line of `len` characters at local time `t`.
pub fn line_stage(t: f64, len: usize) -> LineStage {
    let span = len as f64 / CHARS_PER_SECOND;
    if t.is_nan() || t < 0.0 {
        LineStage::Hidden
    } else if t < span {
        LineStage::Growing
    } else if t < 2.0 * span {
        LineStage::Held
    } else if t < 3.0 * span {
        LineStage::Shrinking
    } else {
        LineStage::Done
    }
}

/// Characters of a `len`-character line visible at local time `t`.
pub fn chars_shown(t: f64, len: usize) -> usize {
    match line_stage(t, len) {
        LineStage::Hidden | LineStage::Done => 0,
        LineStage::Growing => ((t * CHARS_PER_SECOND + EPS).floor() as usize).min(len),
        LineStage::Held => len,
        LineStage::Shrinking => {
            let held_until = 2.0 * len as f64 / CHARS_PER_SECOND;
            let deleted = ((t - held_until) * CHARS_PER_SECOND + EPS).floor() as usize;
            len.saturating_sub(deleted)
        }
    }
}

/// First `n` graphemes of `line`.
pub fn visible_prefix(line: &str, n: usize) -> &str {
    match line.grapheme_indices(true).nth(n) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

/// Draw every line at phase time `elapsed`.
pub fn draw_dialogue(surface: &mut dyn Surface, elapsed: f64, speed: f64) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let top = h / 2.0 - DIALOGUE.len() as f64 * DIALOGUE_LINE_HEIGHT / 2.0;
    let style = TextStyle::new(DIALOGUE_FONT, PackedRgba::WHITE);
    for (i, line) in DIALOGUE.iter().enumerate() {
        let len = line.graphemes(true).count();
        let shown = chars_shown(elapsed - i as f64, len);
        if shown == 0 {
            continue;
        }
        let text = visible_prefix(line, shown);
        let x = w / 4.0 + (elapsed * 3.0 * speed + i as f64).sin() * SWAY;
        let y = top + i as f64 * DIALOGUE_LINE_HEIGHT;
        surface.fill_text(text, x, y, style);
        if i == 0 {
            for k in 1..=ECHOES {
                let offset = 5.0 * k as f64;
                let echo = style.color(PackedRgba::WHITE.with_opacity(0.3 / k as f64));
                surface.fill_text(text, x + offset, y + offset, echo);
            }
        }
    }
}
