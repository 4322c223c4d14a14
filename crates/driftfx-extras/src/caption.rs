#![forbid(unsafe_code)]

//! The dictionary caption shown by the text-reveal and text-glitch phases.

use driftfx_core::rng::FxRng;
use driftfx_render::{PackedRgba, Surface, TextStyle};

/// Caption lines, top to bottom.
pub const DICTIONARY: &[&str] = &[
    "operative",
    "adjective",
    "1. functioning or having effect",
    "2. of or relating to operations",
    "3. ready for use",
    "4. (espionage) a secret agent or spy",
    "",
    "unknown",
    "adjective",
    "1. not known or familiar",
    "2. not identified",
    "3. not understood",
    "",
    "is your operative unknown?",
];

pub const CAPTION_FONT: f64 = 20.0;
pub const CAPTION_LINE_HEIGHT: f64 = 25.0;
/// Left edge and first baseline.
pub const CAPTION_ORIGIN: (f64, f64) = (50.0, 50.0);
pub const CAPTION_COLOR: PackedRgba = PackedRgba::GREEN;

/// Horizontal glitch amplitude at full intensity.
pub const GLITCH_AMPLITUDE: f64 = 20.0;
/// Full-width glitch lines attempted per frame.
pub const GLITCH_LINES: usize = 5;
/// Noise pixels attempted per frame.
pub const GLITCH_NOISE: usize = 100;

/// Draw the caption shifted by `dx` at `opacity`.
pub fn draw_caption(surface: &mut dyn Surface, dx: f64, opacity: f64) {
    if opacity <= 0.0 {
        return;
    }
    let style = TextStyle::new(CAPTION_FONT, CAPTION_COLOR.with_opacity(opacity));
    let (x, y) = CAPTION_ORIGIN;
    for (i, line) in DICTIONARY.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        surface.fill_text(line, x + dx, y + i as f64 * CAPTION_LINE_HEIGHT, style);
    }
}

/// Glitch intensity for a phase progress: `min(1, 2p)`.
#[inline]
pub fn glitch_intensity(progress: f64) -> f64 {
    (progress * 2.0).clamp(0.0, 1.0)
}

/// Horizontal caption displacement while glitching.
#[inline]
pub fn glitch_shift(elapsed: f64, intensity: f64) -> f64 {
    (elapsed * 10.0).sin() * GLITCH_AMPLITUDE * intensity
}

/// One text-glitch frame: shaking caption, scan lines and static.
pub fn draw_glitch(
    surface: &mut dyn Surface,
    elapsed: f64,
    progress: f64,
    rng: &mut FxRng,
) {
    let intensity = glitch_intensity(progress);
    draw_caption(surface, glitch_shift(elapsed, intensity), 1.0 - progress);
    crate::glitch::scan_lines(surface, rng, GLITCH_LINES, intensity);
    crate::glitch::noise(surface, rng, GLITCH_NOISE, intensity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftfx_render::{DrawOp, RecordingSurface};

    #[test]
    fn caption_skips_blank_lines() {
        let mut s = RecordingSurface::new(800, 600);
        draw_caption(&mut s, 0.0, 1.0);
        assert_eq!(s.texts().len(), DICTIONARY.len() - 2);
        assert_eq!(s.texts()[0], "operative");
        assert_eq!(*s.texts().last().unwrap(), "is your operative unknown?");
    }

    #[test]
    fn caption_layout() {
        let mut s = RecordingSurface::new(800, 600);
        draw_caption(&mut s, 4.0, 0.5);
        let DrawOp::Text { x, y, style, .. } = &s.ops()[1] else {
            panic!("expected text");
        };
        assert_eq!((*x, *y), (54.0, 75.0));
        assert_eq!(style.size, CAPTION_FONT);
        assert_eq!(style.color.a(), 128);
        assert_eq!(style.color.g(), 255);
    }

    #[test]
    fn intensity_saturates() {
        assert_eq!(glitch_intensity(0.0), 0.0);
        assert_eq!(glitch_intensity(0.25), 0.5);
        assert_eq!(glitch_intensity(0.9), 1.0);
    }

    #[test]
    fn zero_intensity_glitch_draws_only_caption() {
        let mut s = RecordingSurface::new(800, 600);
        draw_glitch(&mut s, 1.3, 0.0, &mut FxRng::new(5));
        assert!(s.rects().is_empty());
        assert_eq!(s.texts().len(), DICTIONARY.len() - 2);
    }

    #[test]
    fn full_intensity_glitch_draws_every_candidate() {
        let mut s = RecordingSurface::new(800, 600);
        draw_glitch(&mut s, 1.3, 0.6, &mut FxRng::new(5));
        assert_eq!(s.rects().len(), GLITCH_LINES + GLITCH_NOISE);
    }
}
