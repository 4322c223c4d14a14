#![forbid(unsafe_code)]

//! Glitch primitives: static noise, scan lines, the glitched question and
//! the symbol storm.

use unicode_segmentation::UnicodeSegmentation;

use driftfx_core::rng::FxRng;
use driftfx_render::{PackedRgba, Surface, TextAlign, TextStyle};

/// Replacement alphabet for glitched characters and storm cells.
pub const GLITCH_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// The closing question.
pub const QUESTION: &str = "is your operative unknown?";

pub const QUESTION_FONT: f64 = 30.0;
/// Horizontal distance between question characters.
pub const QUESTION_ADVANCE: f64 = 20.0;
/// The question starts this far left of the surface center.
pub const QUESTION_LEAD: f64 = 150.0;
/// Chance that a question character is swapped for a symbol.
pub const SWAP_CHANCE: f64 = 0.3;
/// Jitter span of a swapped character.
pub const SWAP_JITTER: f64 = 10.0;

/// Noise candidates per final-glitch frame, and their probability.
pub const FINAL_NOISE: usize = 200;
pub const FINAL_NOISE_CHANCE: f64 = 0.1;

/// Storm cell edge (and font size).
pub const STORM_CELL: u32 = 20;

const SCAN_LINE: PackedRgba = PackedRgba::rgba(255, 255, 255, 26);

/// Random glitch symbol.
pub fn random_symbol(rng: &mut FxRng) -> &'static str {
    let i = rng.index(GLITCH_SYMBOLS.len());
    // Alphabet is ASCII, so byte ranges are char boundaries.
    GLITCH_SYMBOLS.get(i..i + 1).unwrap_or("?")
}

/// Up to `candidates` white 1×1 pixels, each kept with `probability`.
pub fn noise(surface: &mut dyn Surface, rng: &mut FxRng, candidates: usize, probability: f64) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    for _ in 0..candidates {
        if rng.chance(probability) {
            let x = rng.range(0.0, w);
            let y = rng.range(0.0, h);
            surface.fill_rect(x, y, 1.0, 1.0, PackedRgba::WHITE);
        }
    }
}

/// Up to `count` faint full-width 1 px lines, each kept with `probability`.
pub fn scan_lines(surface: &mut dyn Surface, rng: &mut FxRng, count: usize, probability: f64) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    for _ in 0..count {
        if rng.chance(probability) {
            let y = rng.range(0.0, h);
            surface.fill_rect(0.0, y, w, 1.0, SCAN_LINE);
        }
    }
}

/// The question, centered per character, with random symbol swaps.
pub fn draw_question(surface: &mut dyn Surface, rng: &mut FxRng) {
    let (w, h) = (surface.width() as f64, surface.height() as f64);
    let style = TextStyle::new(QUESTION_FONT, PackedRgba::WHITE).align(TextAlign::Center);
    let left = w / 2.0 - QUESTION_LEAD;
    let baseline = h / 2.0;
    for (i, grapheme) in QUESTION.graphemes(true).enumerate() {
        let x = left + i as f64 * QUESTION_ADVANCE;
        if rng.chance(SWAP_CHANCE) {
            let symbol = random_symbol(rng);
            let dx = rng.centered() * SWAP_JITTER;
            let dy = rng.centered() * SWAP_JITTER;
            surface.fill_text(symbol, x + dx, baseline + dy, style);
        } else {
            surface.fill_text(grapheme, x, baseline, style);
        }
    }
}

/// One final-glitch frame: extra veil, sparse static, glitched question.
pub fn draw_final(surface: &mut dyn Surface, rng: &mut FxRng) {
    surface.clear(crate::animator::VEIL);
    noise(surface, rng, FINAL_NOISE, FINAL_NOISE_CHANCE);
    draw_question(surface, rng);
}

/// Storm dimensions `(cols, rows)` for a surface.
pub fn storm_dims(width: u32, height: u32) -> (usize, usize) {
    (
        width.div_ceil(STORM_CELL) as usize,
        height.div_ceil(STORM_CELL) as usize,
    )
}

/// Fill the surface with random symbols at opacity in `[0.5, 1.0)`.
pub fn draw_storm(surface: &mut dyn Surface, rng: &mut FxRng) {
    let (cols, rows) = storm_dims(surface.width(), surface.height());
    let cell = STORM_CELL as f64;
    for row in 0..rows {
        for col in 0..cols {
            let symbol = random_symbol(rng);
            let opacity = rng.range(0.5, 1.0);
            let style = TextStyle::new(cell, PackedRgba::WHITE.with_opacity(opacity));
            surface.fill_text(symbol, col as f64 * cell, (row + 1) as f64 * cell, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftfx_render::{DrawOp, RecordingSurface};

    #[test]
    fn symbols_come_from_alphabet() {
        let mut rng = FxRng::new(9);
        for _ in 0..500 {
            let s = random_symbol(&mut rng);
            assert_eq!(s.len(), 1);
            assert!(GLITCH_SYMBOLS.contains(s));
        }
    }

    #[test]
    fn noise_respects_probability_bounds() {
        let mut s = RecordingSurface::new(50, 50);
        noise(&mut s, &mut FxRng::new(1), 100, 0.0);
        assert!(s.ops().is_empty());
        noise(&mut s, &mut FxRng::new(1), 100, 1.0);
        assert_eq!(s.rects().len(), 100);
        for (x, y, w, h, c) in s.rects() {
            assert!((0.0..50.0).contains(&x) && (0.0..50.0).contains(&y));
            assert_eq!((w, h, c), (1.0, 1.0, PackedRgba::WHITE));
        }
    }

    #[test]
    fn scan_lines_span_width() {
        let mut s = RecordingSurface::new(80, 40);
        scan_lines(&mut s, &mut FxRng::new(2), 5, 1.0);
        assert_eq!(s.rects().len(), 5);
        assert!(s.rects().iter().all(|r| r.0 == 0.0 && r.2 == 80.0 && r.3 == 1.0));
    }

    #[test]
    fn question_draws_one_glyph_per_char() {
        let mut s = RecordingSurface::new(800, 600);
        draw_question(&mut s, &mut FxRng::new(3));
        let texts = s.texts();
        assert_eq!(texts.len(), QUESTION.len());
        let mut swapped = 0;
        for (drawn, original) in texts.iter().zip(QUESTION.chars()) {
            if *drawn != original.to_string() {
                assert!(GLITCH_SYMBOLS.contains(drawn));
                swapped += 1;
            }
        }
        assert!(swapped < QUESTION.len());
    }

    #[test]
    fn unswapped_chars_sit_on_the_grid() {
        let mut s = RecordingSurface::new(800, 600);
        draw_question(&mut s, &mut FxRng::new(11));
        for (i, op) in s.ops().iter().enumerate() {
            let DrawOp::Text { text, x, y, style } = op else {
                panic!("expected text");
            };
            assert_eq!(style.align, TextAlign::Center);
            let grid_x = 250.0 + i as f64 * QUESTION_ADVANCE;
            if QUESTION.get(i..i + 1) == Some(text.as_str()) && *y == 300.0 {
                assert_eq!(*x, grid_x);
            } else {
                assert!((x - grid_x).abs() <= SWAP_JITTER / 2.0);
                assert!((y - 300.0).abs() <= SWAP_JITTER / 2.0);
            }
        }
    }

    #[test]
    fn storm_covers_surface() {
        assert_eq!(storm_dims(800, 600), (40, 30));
        assert_eq!(storm_dims(801, 1), (41, 1));
        let mut s = RecordingSurface::new(45, 20);
        draw_storm(&mut s, &mut FxRng::new(4));
        assert_eq!(s.texts().len(), 3);
        for op in s.ops() {
            let DrawOp::Text { style, .. } = op else {
                panic!("expected text");
            };
            assert!(style.color.a() >= 127);
        }
    }
}
