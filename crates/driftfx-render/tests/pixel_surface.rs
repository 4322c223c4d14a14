#![forbid(unsafe_code)]

use driftfx_render::{PackedRgba, PixelSurface, Surface, TextAlign, TextStyle};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn circle_stays_inside_its_bounding_box() {
    let mut s = PixelSurface::new(64, 64);
    s.fill_circle(32.0, 32.0, 10.0, PackedRgba::WHITE);
    let lit = s.count_where(|p| p == PackedRgba::WHITE);
    // pi * r^2 ~= 314, row-snapping adds a little slack either way.
    assert!((280..=360).contains(&lit), "lit {lit}");
    for y in 0..64 {
        for x in 0..64 {
            if s.get(x, y) == Some(PackedRgba::WHITE) {
                assert!((22..=42).contains(&x) && (22..=42).contains(&y));
            }
        }
    }
}

#[test]
fn translucent_circle_blends_with_background() {
    let mut s = PixelSurface::new(16, 16);
    s.fill_circle(8.0, 8.0, 4.0, PackedRgba::rgba(0, 255, 255, 26));
    let center = s.get(8, 8).unwrap();
    assert_eq!((center.r(), center.a()), (0, 255));
    assert!(center.g() > 0 && center.g() < 40);
}

#[test]
fn centered_and_left_text_differ_only_by_offset() {
    let style = TextStyle::new(10.0, PackedRgba::WHITE);
    let mut left = PixelSurface::new(80, 20);
    left.fill_text("AB", 28.0, 15.0, style);
    let mut centered = PixelSurface::new(80, 20);
    // "AB" at size 10 advances 12px; centering at 34 starts at 28.
    centered.fill_text("AB", 34.0, 15.0, style.align(TextAlign::Center));
    assert_eq!(left, centered);
}

proptest! {
    #[test]
    fn fill_rect_never_panics(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        w in -50.0f64..500.0,
        h in -50.0f64..500.0,
        a in 0u8..=255,
    ) {
        let mut s = PixelSurface::new(32, 24);
        s.fill_rect(x, y, w, h, PackedRgba::rgba(200, 10, 10, a));
        prop_assert_eq!(s.pixels().len(), 32 * 24);
        prop_assert!(s.pixels().iter().all(|p| p.a() == 255));
    }

    #[test]
    fn text_never_panics(text in "\\PC{0,16}", x in -50.0f64..100.0, size in 0.0f64..40.0) {
        let mut s = PixelSurface::new(40, 40);
        s.fill_text(&text, x, 20.0, TextStyle::new(size, PackedRgba::GREEN));
        prop_assert_eq!(s.pixels().len(), 1600);
    }
}
