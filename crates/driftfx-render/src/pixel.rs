#![forbid(unsafe_code)]

//! Headless RGBA rasterizer.
//!
//! [`PixelSurface`] implements [`Surface`] over a row-major
//! `Vec<PackedRgba>`, so effects can be rendered, hashed and compared without
//! a browser or a GPU. Rectangles snap to whole pixels (round-to-nearest on
//! both edges) and blend source-over. Text is drawn with the built-in 3×5
//! bitmap font scaled to the requested size.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use driftfx_core::geometry::Size;

use crate::color::PackedRgba;
use crate::font::{self, GLYPH_COLS, GLYPH_ROWS};
use crate::surface::{MONO_ADVANCE, Surface, TextAlign, TextStyle, text_advance};

/// Cap height of the bitmap font as a fraction of the font size.
const CAP_HEIGHT: f64 = 0.7;

/// In-memory RGBA surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
}

impl PixelSurface {
    /// Opaque black surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, PackedRgba::BLACK)
    }

    /// Surface filled with `color`.
    pub fn filled(width: u32, height: u32, color: PackedRgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Current size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Resize, discarding content (host-side operation).
    pub fn resize(&mut self, width: u32, height: u32) {
        driftfx_core::debug!(width, height, "pixel surface resized");
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, PackedRgba::BLACK);
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<PackedRgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Row-major pixel slice.
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// Count pixels for which `pred` holds.
    pub fn count_where(&self, pred: impl Fn(PackedRgba) -> bool) -> usize {
        self.pixels.iter().filter(|&&p| pred(p)).count()
    }

    /// Overwrite every pixel with `color` (no blending).
    pub fn reset(&mut self, color: PackedRgba) {
        self.pixels.fill(color);
    }

    /// Clip `[start, start + len)` to `[0, limit)` after rounding both edges.
    fn span(start: f64, len: f64, limit: u32) -> Option<(u32, u32)> {
        if !(start.is_finite() && len.is_finite()) || len <= 0.0 {
            return None;
        }
        let lo = start.round().max(0.0);
        let hi = (start + len).round().min(limit as f64);
        if hi <= lo {
            return None;
        }
        Some((lo as u32, hi as u32))
    }

    fn draw_glyph(&mut self, ch: char, left: f64, top: f64, cell_w: f64, cell_h: f64, color: PackedRgba) {
        let glyph = font::glyph(ch);
        // One empty column of spacing to the right of each glyph.
        let dot_w = cell_w / (GLYPH_COLS + 1) as f64;
        let dot_h = cell_h / GLYPH_ROWS as f64;
        for row in 0..GLYPH_ROWS {
            for col in 0..GLYPH_COLS {
                if font::lit(&glyph, col, row) {
                    self.fill_rect(
                        left + col as f64 * dot_w,
                        top + row as f64 * dot_h,
                        dot_w.max(1.0),
                        dot_h.max(1.0),
                        color,
                    );
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: PackedRgba) {
        if color.a() == 0 {
            return;
        }
        let Some((x0, x1)) = Self::span(x, w, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::span(y, h, self.height) else {
            return;
        };
        let stride = self.width as usize;
        for row in y0..y1 {
            let base = row as usize * stride;
            let line = &mut self.pixels[base + x0 as usize..base + x1 as usize];
            if color.a() == 255 {
                line.fill(color);
            } else {
                for px in line {
                    *px = color.over(*px);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        if text.is_empty() || style.color.a() == 0 || style.size <= 0.0 {
            return;
        }
        let column = style.size * MONO_ADVANCE;
        let cap = style.size * CAP_HEIGHT;
        let mut pen = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - text_advance(text, style.size) / 2.0,
        };
        let top = y - cap;
        for grapheme in text.graphemes(true) {
            let cols = grapheme.width().max(1) as f64;
            if let Some(ch) = grapheme.chars().next() {
                self.draw_glyph(ch, pen, top, column * cols, cap, style.color);
            }
            pen += column * cols;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_black() {
        let s = PixelSurface::new(4, 3);
        assert_eq!(s.pixels().len(), 12);
        assert!(s.pixels().iter().all(|&p| p == PackedRgba::BLACK));
    }

    #[test]
    fn fill_rect_clips() {
        let mut s = PixelSurface::new(4, 4);
        s.fill_rect(-10.0, -10.0, 12.0, 12.0, PackedRgba::RED);
        assert_eq!(s.get(0, 0), Some(PackedRgba::RED));
        assert_eq!(s.get(1, 1), Some(PackedRgba::RED));
        assert_eq!(s.get(2, 2), Some(PackedRgba::BLACK));
        assert_eq!(s.get(9, 9), None);
    }

    #[test]
    fn fill_rect_rounds_edges() {
        let mut s = PixelSurface::new(4, 1);
        s.fill_rect(0.6, 0.0, 1.0, 1.0, PackedRgba::WHITE);
        assert_eq!(s.get(0, 0), Some(PackedRgba::BLACK));
        assert_eq!(s.get(1, 0), Some(PackedRgba::WHITE));
        assert_eq!(s.get(2, 0), Some(PackedRgba::BLACK));
    }

    #[test]
    fn degenerate_rects_draw_nothing() {
        let mut s = PixelSurface::new(4, 4);
        s.fill_rect(1.0, 1.0, 0.0, 2.0, PackedRgba::WHITE);
        s.fill_rect(1.0, 1.0, -2.0, 2.0, PackedRgba::WHITE);
        s.fill_rect(f64::NAN, 1.0, 2.0, 2.0, PackedRgba::WHITE);
        assert_eq!(s.count_where(|p| p == PackedRgba::WHITE), 0);
    }

    #[test]
    fn translucent_fill_blends() {
        let mut s = PixelSurface::filled(1, 1, PackedRgba::WHITE);
        s.clear(PackedRgba::rgba(0, 0, 0, 128));
        let p = s.get(0, 0).unwrap();
        assert_eq!((p.r(), p.a()), (127, 255));
    }

    #[test]
    fn repeated_veil_fades_to_black() {
        let mut s = PixelSurface::filled(2, 2, PackedRgba::WHITE);
        for _ in 0..100 {
            s.clear(PackedRgba::rgba(0, 0, 0, 26));
        }
        let p = s.get(0, 0).unwrap();
        assert!(p.r() < 10, "trail should decay, got {}", p.r());
    }

    #[test]
    fn text_draws_pixels_inside_its_box() {
        let mut s = PixelSurface::new(100, 40);
        s.fill_text("HI", 10.0, 30.0, TextStyle::new(20.0, PackedRgba::GREEN));
        let lit = s.count_where(|p| p == PackedRgba::GREEN);
        assert!(lit > 0);
        for y in 0..40 {
            for x in 0..100 {
                if s.get(x, y) == Some(PackedRgba::GREEN) {
                    assert!((10..34).contains(&x), "x {x} outside text box");
                    assert!((16..30).contains(&y), "y {y} outside cap height");
                }
            }
        }
    }

    #[test]
    fn centered_text_is_symmetric() {
        let mut s = PixelSurface::new(200, 40);
        s.fill_text("OO", 100.0, 30.0, TextStyle::new(20.0, PackedRgba::WHITE).align(TextAlign::Center));
        let xs: Vec<u32> = (0..200)
            .filter(|&x| (0..40).any(|y| s.get(x, y) == Some(PackedRgba::WHITE)))
            .collect();
        let min = *xs.first().unwrap();
        let max = *xs.last().unwrap();
        // Two 12px columns starting at 88; the trailing spacing column is empty.
        assert_eq!(min, 88);
        assert!(max < 112);
    }

    #[test]
    fn resize_discards_content() {
        let mut s = PixelSurface::filled(2, 2, PackedRgba::RED);
        s.resize(3, 1);
        assert_eq!(s.size(), Size::new(3, 1));
        assert_eq!(s.get(2, 0), Some(PackedRgba::BLACK));
    }
}
