#![forbid(unsafe_code)]

//! The drawing-surface contract.
//!
//! Effects never allocate or resize a surface; the host hands one in every
//! frame. The contract is intentionally the small subset of a 2D canvas the
//! effects need: translucent rectangle fills and single-line text.
//!
//! Coordinates are `f64` pixels with the origin at the top-left. Text is
//! positioned by its **baseline**, as on a browser canvas.

use unicode_width::UnicodeWidthStr;

use crate::color::PackedRgba;

/// Horizontal anchoring of text relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    /// `x` is the left edge.
    #[default]
    Left,
    /// `x` is the horizontal center.
    Center,
}

/// Font size, alignment and fill color for [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels (em height).
    pub size: f64,
    pub align: TextAlign,
    pub color: PackedRgba,
}

impl TextStyle {
    /// Left-aligned text of the given size and color.
    pub const fn new(size: f64, color: PackedRgba) -> Self {
        Self {
            size,
            align: TextAlign::Left,
            color,
        }
    }

    /// Set the alignment (builder).
    pub const fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Set the color (builder).
    pub const fn color(mut self, color: PackedRgba) -> Self {
        self.color = color;
        self
    }
}

/// Monospace advance per display column, as a fraction of the font size.
pub const MONO_ADVANCE: f64 = 0.6;

/// Advance width of `text` in a monospace font of `size` pixels.
///
/// Wide (CJK, emoji) graphemes count as two columns.
pub fn text_advance(text: &str, size: f64) -> f64 {
    text.width() as f64 * size * MONO_ADVANCE
}

/// A pixel-addressable 2D drawing target supplied by the host.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Fill an axis-aligned rectangle. Translucent colors blend source-over.
    ///
    /// Rectangles may extend past the surface or have fractional coordinates;
    /// implementations clip. Non-positive sizes draw nothing.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: PackedRgba);

    /// Draw one line of text with its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle);

    /// Cover the whole surface with `color` (translucent colors leave trails).
    fn clear(&mut self, color: PackedRgba) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        self.fill_rect(0.0, 0.0, w, h, color);
    }

    /// Fill a disc using one rectangle per pixel row.
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: PackedRgba) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let top = (cy - radius).floor().max(0.0);
        let bottom = (cy + radius).ceil().min(self.height() as f64);
        let mut y = top;
        while y < bottom {
            let dy = y + 0.5 - cy;
            let span = radius * radius - dy * dy;
            if span > 0.0 {
                let half = span.sqrt();
                self.fill_rect(cx - half, y, half * 2.0, 1.0, color);
            }
            y += 1.0;
        }
    }
}
