#![forbid(unsafe_code)]

//! Static face templates drawn during the reveal and melt phases.
//!
//! Points use coordinates relative to the surface (`0.0..=1.0` on both axes)
//! and a size in grid cells, so a template scales with the surface and the
//! configured pixel size.

use driftfx_core::geometry::Point;
use driftfx_core::rng::FxRng;
use driftfx_render::{PackedRgba, Surface};

/// One feature point of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePoint {
    pub x: f64,
    pub y: f64,
    /// Edge length in grid cells.
    pub size: f64,
    pub color: PackedRgba,
}

/// A named list of feature points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceTemplate {
    pub name: &'static str,
    pub points: &'static [FacePoint],
}

const GOLD: PackedRgba = PackedRgba::rgb(255, 215, 0);
const WHITE: PackedRgba = PackedRgba::WHITE;
const BLUE: PackedRgba = PackedRgba::BLUE;
const PINK: PackedRgba = PackedRgba::rgb(255, 192, 203);
const RED: PackedRgba = PackedRgba::RED;
const GRAY: PackedRgba = PackedRgba::rgb(128, 128, 128);
const BROWN: PackedRgba = PackedRgba::rgb(165, 42, 42);

const fn pt(x: f64, y: f64, size: f64, color: PackedRgba) -> FacePoint {
    FacePoint { x, y, size, color }
}

const QUEEN_ELIZABETH: &[FacePoint] = &[
    // crown
    pt(0.5, 0.2, 3.0, GOLD),
    pt(0.5, 0.25, 3.0, GOLD),
    pt(0.5, 0.3, 3.0, GOLD),
    pt(0.45, 0.25, 2.0, GOLD),
    pt(0.55, 0.25, 2.0, GOLD),
    // outline
    pt(0.5, 0.4, 4.0, WHITE),
    pt(0.5, 0.5, 4.0, WHITE),
    pt(0.5, 0.6, 4.0, WHITE),
    pt(0.4, 0.5, 3.0, WHITE),
    pt(0.6, 0.5, 3.0, WHITE),
    // eyes, nose, mouth
    pt(0.45, 0.45, 2.0, BLUE),
    pt(0.55, 0.45, 2.0, BLUE),
    pt(0.5, 0.5, 2.0, PINK),
    pt(0.5, 0.55, 2.0, RED),
    // hair
    pt(0.5, 0.35, 4.0, GRAY),
    pt(0.4, 0.35, 3.0, GRAY),
    pt(0.6, 0.35, 3.0, GRAY),
];

const MONA_LISA: &[FacePoint] = &[
    // hair
    pt(0.5, 0.3, 4.0, BROWN),
    pt(0.4, 0.3, 3.0, BROWN),
    pt(0.6, 0.3, 3.0, BROWN),
    pt(0.5, 0.25, 3.0, BROWN),
    // face
    pt(0.5, 0.4, 4.0, WHITE),
    pt(0.5, 0.5, 4.0, WHITE),
    pt(0.4, 0.45, 3.0, WHITE),
    pt(0.6, 0.45, 3.0, WHITE),
    // eyes
    pt(0.45, 0.45, 2.0, BROWN),
    pt(0.55, 0.45, 2.0, BROWN),
    // smile
    pt(0.5, 0.55, 2.0, RED),
    pt(0.45, 0.53, 1.0, RED),
    pt(0.55, 0.53, 1.0, RED),
];

/// The built-in templates, in reveal order.
pub static FACES: &[FaceTemplate] = &[
    FaceTemplate {
        name: "Queen Elizabeth",
        points: QUEEN_ELIZABETH,
    },
    FaceTemplate {
        name: "Mona Lisa",
        points: MONA_LISA,
    },
];

/// Template for `index`, wrapping past the end. `None` only if no faces exist.
pub fn face(index: usize) -> Option<&'static FaceTemplate> {
    if FACES.is_empty() {
        return None;
    }
    FACES.get(index % FACES.len())
}

/// Maximum scatter distance of a reveal point at progress 0.
pub const SCATTER_SPAN: f64 = 150.0;

impl FacePoint {
    /// Center of the point on a `width × height` surface.
    pub fn anchor(&self, width: f64, height: f64) -> Point {
        Point::new(self.x * width, self.y * height)
    }
}

impl FaceTemplate {
    /// Draw the reveal ("firework") frame at `progress`.
    ///
    /// Points start scattered up to ±75 px and settle as the firework
    /// progress `min(1, 2p)` reaches 1; opacity is `min(1, p)`.
    pub fn draw_reveal(
        &self,
        surface: &mut dyn Surface,
        pixel_size: f64,
        progress: f64,
        rng: &mut FxRng,
    ) {
        let (w, h) = (surface.width() as f64, surface.height() as f64);
        let firework = (progress * 2.0).min(1.0);
        let spread = SCATTER_SPAN * (1.0 - firework);
        let opacity = progress.min(1.0);
        for point in self.points {
            let at = point.anchor(w, h);
            let size = point.size * pixel_size;
            let dx = rng.centered() * spread;
            let dy = rng.centered() * spread;
            surface.fill_rect(
                at.x - size / 2.0 + dx,
                at.y - size / 2.0 + dy,
                size,
                size,
                point.color.with_opacity(opacity),
            );
        }
    }

    /// Draw the melting frame: points shrink, stretch downward and sway.
    pub fn draw_melt(&self, surface: &mut dyn Surface, pixel_size: f64, progress: f64, sway: f64) {
        let (w, h) = (surface.width() as f64, surface.height() as f64);
        let melt = (progress * 2.0).min(1.0);
        let offset = sway * 30.0 * melt;
        let opacity = 1.0 - progress;
        if opacity <= 0.0 {
            return;
        }
        for point in self.points {
            let at = point.anchor(w, h);
            let size = point.size * pixel_size * (1.0 - melt * 0.7);
            surface.fill_rect(
                at.x - size / 2.0,
                at.y - size / 2.0 + offset,
                size,
                size * 2.5,
                point.color.with_opacity(opacity),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftfx_render::RecordingSurface;

    #[test]
    fn templates_match_expected_sizes() {
        assert_eq!(FACES.len(), 2);
        assert_eq!(FACES[0].name, "Queen Elizabeth");
        assert_eq!(FACES[0].points.len(), 17);
        assert_eq!(FACES[1].name, "Mona Lisa");
        assert_eq!(FACES[1].points.len(), 13);
    }

    #[test]
    fn points_are_relative() {
        for face in FACES {
            for p in face.points {
                assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
                assert!(p.size >= 1.0);
            }
        }
    }

    #[test]
    fn face_lookup_wraps() {
        assert_eq!(face(2).map(|f| f.name), Some("Queen Elizabeth"));
    }

    #[test]
    fn settled_reveal_is_exact() {
        let mut s = RecordingSurface::new(800, 600);
        FACES[0].draw_reveal(&mut s, 2.0, 0.5, &mut FxRng::new(3));
        let rects = s.rects();
        assert_eq!(rects.len(), 17);
        // First crown point: (400, 120), 6px square, opacity 0.5.
        let (x, y, w, h, c) = rects[0];
        assert!((x - 397.0).abs() < 1e-9 && (y - 117.0).abs() < 1e-9);
        assert_eq!((w, h), (6.0, 6.0));
        assert_eq!(c.a(), 128);
    }

    #[test]
    fn early_reveal_scatters_within_span() {
        let mut s = RecordingSurface::new(800, 600);
        FACES[1].draw_reveal(&mut s, 2.0, 0.0, &mut FxRng::new(4));
        for ((x, _, w, _, _), p) in s.rects().into_iter().zip(FACES[1].points) {
            let dx = x + w / 2.0 - p.x * 800.0;
            assert!(dx.abs() <= SCATTER_SPAN / 2.0);
        }
    }

    #[test]
    fn melt_shrinks_and_stretches() {
        let mut s = RecordingSurface::new(100, 100);
        FACES[1].draw_melt(&mut s, 2.0, 0.5, 1.0);
        let (_, y, w, h, c) = s.rects()[0];
        // size 8 * 0.3 = 2.4, stretched 2.5x, offset 30 at full melt.
        assert!((w - 2.4).abs() < 1e-9);
        assert!((h - 6.0).abs() < 1e-9);
        assert!((y - (30.0 - 1.2 + 30.0)).abs() < 1e-9);
        assert_eq!(c.a(), 128);
        s.clear_ops();
        FACES[1].draw_melt(&mut s, 2.0, 1.0, 1.0);
        assert!(s.ops().is_empty());
    }
}
