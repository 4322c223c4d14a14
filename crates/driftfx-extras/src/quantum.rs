#![forbid(unsafe_code)]

//! Generative "quantum art".
//!
//! A piece is the density of a noisy plane wave
//! `ψ = exp(i(kX + wY + φ + ε))` sampled over `[-10, 10]²`, smoothed with a
//! 3×3 box filter, contrast-lifted with `ln(1 + d)`, normalized and mapped
//! through a five-stop neon colormap. Because `|ψ|²` of a pure phase is
//! identically one, the density uses `Re(ψ)²`, which keeps the interference
//! fringes.
//!
//! Pieces travel as JSON:
//!
//! ```json
//! [{ "pixels": [["#000000", "#00ff00"], ...], "width": 2, "height": 1 }]
//! ```

use std::f64::consts::{PI, TAU};
use std::fmt;

use serde::{Deserialize, Serialize};

use driftfx_core::rng::FxRng;
use driftfx_render::{PackedRgba, Surface};

/// Colormap stops, low to high density.
pub const COLORMAP: [PackedRgba; 5] = [
    PackedRgba::rgb(0x00, 0x00, 0x00),
    PackedRgba::rgb(0x00, 0xff, 0x00),
    PackedRgba::rgb(0x00, 0xff, 0xff),
    PackedRgba::rgb(0xff, 0x00, 0xff),
    PackedRgba::rgb(0xff, 0xff, 0x00),
];

/// Default piece edge length.
pub const DEFAULT_PIECE_SIZE: usize = 512;
/// Pieces in a default collection.
pub const DEFAULT_PIECE_COUNT: usize = 5;

// =============================================================================
// Errors
// =============================================================================

/// Why a piece collection could not be loaded.
#[derive(Debug)]
pub enum ArtLoadError {
    /// Not valid JSON, or not the expected shape.
    Json(serde_json::Error),
    /// A pixel is not a `#rrggbb` color.
    InvalidColor { piece: usize, value: String },
    /// Row count or row length disagrees with the declared size.
    RaggedRow { piece: usize, row: usize },
    /// No pieces at all.
    Empty,
}

impl fmt::Display for ArtLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtLoadError::Json(e) => write!(f, "load failed: {e}"),
            ArtLoadError::InvalidColor { piece, value } => {
                write!(f, "load failed: piece {piece} has invalid color {value:?}")
            }
            ArtLoadError::RaggedRow { piece, row } => {
                write!(f, "load failed: piece {piece} row {row} does not match its size")
            }
            ArtLoadError::Empty => f.write_str("load failed: no pieces"),
        }
    }
}

impl std::error::Error for ArtLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArtLoadError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ArtLoadError {
    fn from(err: serde_json::Error) -> Self {
        ArtLoadError::Json(err)
    }
}

// =============================================================================
// Piece
// =============================================================================

/// A rendered piece: `width × height` opaque colors, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantumArtPiece {
    width: usize,
    height: usize,
    pixels: Vec<PackedRgba>,
}

impl QuantumArtPiece {
    /// Build from row-major pixels. `None` if the length disagrees.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<PackedRgba>) -> Option<Self> {
        (width.checked_mul(height) == Some(pixels.len())).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, wrapping on both axes.
    pub fn sample(&self, x: usize, y: usize) -> PackedRgba {
        if self.pixels.is_empty() {
            return PackedRgba::BLACK;
        }
        self.pixels[(y % self.height) * self.width + (x % self.width)]
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PieceRecord {
    pixels: Vec<Vec<String>>,
    width: usize,
    height: usize,
}

impl PieceRecord {
    fn from_piece(piece: &QuantumArtPiece) -> Self {
        let pixels = piece
            .pixels
            .chunks(piece.width.max(1))
            .take(piece.height)
            .map(|row| row.iter().map(|c| c.to_hex()).collect())
            .collect();
        Self {
            pixels,
            width: piece.width,
            height: piece.height,
        }
    }

    fn into_piece(self, index: usize) -> Result<QuantumArtPiece, ArtLoadError> {
        if self.pixels.len() != self.height {
            return Err(ArtLoadError::RaggedRow {
                piece: index,
                row: self.pixels.len().min(self.height),
            });
        }
        if let Some(row) = self.pixels.iter().position(|cells| cells.len() != self.width) {
            return Err(ArtLoadError::RaggedRow { piece: index, row });
        }
        // Rows are checked, so this is the real cell count.
        let mut pixels = Vec::with_capacity(self.pixels.iter().map(Vec::len).sum());
        for cells in self.pixels {
            for value in cells {
                match PackedRgba::from_hex(&value) {
                    Some(color) => pixels.push(color),
                    None => return Err(ArtLoadError::InvalidColor { piece: index, value }),
                }
            }
        }
        Ok(QuantumArtPiece {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}

/// Parse a JSON piece collection.
pub fn parse_pieces(json: &str) -> Result<Vec<QuantumArtPiece>, ArtLoadError> {
    let records: Vec<PieceRecord> = serde_json::from_str(json)?;
    if records.is_empty() {
        return Err(ArtLoadError::Empty);
    }
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_piece(i))
        .collect()
}

/// Serialize pieces to the JSON collection format.
pub fn pieces_to_json(pieces: &[QuantumArtPiece]) -> Result<String, ArtLoadError> {
    let records: Vec<PieceRecord> = pieces.iter().map(PieceRecord::from_piece).collect();
    Ok(serde_json::to_string(&records)?)
}

// =============================================================================
// Generator
// =============================================================================

/// Map a normalized density to the colormap.
pub fn colormap(t: f64) -> PackedRgba {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let span = (COLORMAP.len() - 1) as f64;
    let pos = t * span;
    let lo = (pos.floor() as usize).min(COLORMAP.len() - 2);
    COLORMAP[lo].lerp(COLORMAP[lo + 1], pos - lo as f64)
}

/// Wave-field generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantumArtGenerator {
    /// Standard deviation of the phase noise.
    pub noise: f64,
    /// Half extent of the sampled square.
    pub extent: f64,
}

impl Default for QuantumArtGenerator {
    fn default() -> Self {
        Self {
            noise: 0.1,
            extent: 10.0,
        }
    }
}

impl QuantumArtGenerator {
    /// Generate one `size × size` piece.
    pub fn generate(&self, size: usize, rng: &mut FxRng) -> QuantumArtPiece {
        let k = rng.range(0.5, 2.0);
        let w = rng.range(0.5, 2.0);
        let phi = rng.range(0.0, TAU);
        let coord = |i: usize| {
            if size <= 1 {
                0.0
            } else {
                -self.extent + 2.0 * self.extent * i as f64 / (size - 1) as f64
            }
        };

        let mut density = Vec::with_capacity(size * size);
        for row in 0..size {
            let y = coord(row);
            for col in 0..size {
                let x = coord(col);
                let re = (k * x + w * y + phi + rng.gaussian(self.noise)).cos();
                density.push(re * re);
            }
        }

        let smoothed = box_blur(&density, size);
        let lifted: Vec<f64> = smoothed.iter().map(|d| d.ln_1p()).collect();
        let (min, max) = lifted
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;
        let pixels = lifted
            .iter()
            .map(|&v| {
                let t = if range > f64::EPSILON { (v - min) / range } else { 0.0 };
                colormap(t)
            })
            .collect();
        crate::debug!(size, k, w, phi, "quantum art generated");
        QuantumArtPiece {
            width: size,
            height: size,
            pixels,
        }
    }

    /// Generate `count` pieces from one generator stream.
    pub fn generate_many(&self, count: usize, size: usize, rng: &mut FxRng) -> Vec<QuantumArtPiece> {
        (0..count).map(|_| self.generate(size, rng)).collect()
    }
}

/// 3×3 mean filter with zero padding (edges darken slightly).
fn box_blur(values: &[f64], size: usize) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    for row in 0..size {
        for col in 0..size {
            let mut sum = 0.0;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    let (r, c) = (row as i64 + dy, col as i64 + dx);
                    if (0..size as i64).contains(&r) && (0..size as i64).contains(&c) {
                        sum += values[r as usize * size + c as usize];
                    }
                }
            }
            out[row * size + col] = sum / 9.0;
        }
    }
    out
}

// =============================================================================
// Animator
// =============================================================================

/// Time step per animator frame.
pub const ART_TIME_STEP: f64 = 0.05;
/// Positional jitter amplitude in pixels.
pub const JITTER: f64 = 2.0;
const DISC_COLOR: PackedRgba = PackedRgba::rgba(0, 255, 255, 26);
const DISC_ORBIT: f64 = 50.0;

/// Plays a collection of pieces with positional shimmer and orbiting discs.
#[derive(Debug, Clone)]
pub struct QuantumArtAnimator {
    pieces: Vec<QuantumArtPiece>,
    current: usize,
    time: f64,
}

impl QuantumArtAnimator {
    pub fn new(pieces: Vec<QuantumArtPiece>) -> Result<Self, ArtLoadError> {
        if pieces.is_empty() {
            return Err(ArtLoadError::Empty);
        }
        Ok(Self {
            pieces,
            current: 0,
            time: 0.0,
        })
    }

    /// Parse and wrap a JSON collection.
    pub fn from_json(json: &str) -> Result<Self, ArtLoadError> {
        Self::new(parse_pieces(json)?)
    }

    pub fn current(&self) -> &QuantumArtPiece {
        &self.pieces[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Cycle to the next piece.
    pub fn next_piece(&mut self) {
        self.current = (self.current + 1) % self.pieces.len();
    }

    pub fn tick(&mut self) {
        self.time += ART_TIME_STEP;
    }

    /// Draw the current piece at the surface origin, then the discs.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let piece = self.current();
        let (w, h) = (piece.width(), piece.height());
        let cols = w.min(surface.width() as usize);
        let rows = h.min(surface.height() as usize);
        let t = self.time;
        for y in 0..rows {
            let dy = (t + y as f64 * 0.1).cos() * JITTER;
            let sy = (y as f64 + dy + h as f64).rem_euclid(h as f64).floor() as usize;
            for x in 0..cols {
                let dx = (t + x as f64 * 0.1).sin() * JITTER;
                let sx = (x as f64 + dx + w as f64).rem_euclid(w as f64).floor() as usize;
                surface.fill_rect(x as f64, y as f64, 1.0, 1.0, piece.sample(sx, sy));
            }
        }

        let radius = 100.0 + t.sin() * 20.0;
        for i in 0..3 {
            let phase = t * 0.1 + i as f64 * PI / 3.0;
            surface.fill_circle(
                w as f64 / 2.0 + phase.sin() * DISC_ORBIT,
                h as f64 / 2.0 + phase.cos() * DISC_ORBIT,
                radius,
                DISC_COLOR,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftfx_render::PixelSurface;
    use pretty_assertions::assert_eq;

    fn tiny() -> QuantumArtPiece {
        QuantumArtPiece::from_pixels(
            2,
            1,
            vec![PackedRgba::BLACK, PackedRgba::rgb(0, 255, 0)],
        )
        .unwrap()
    }

    // ── JSON ─────────────────────────────────────────────────────────────

    #[test]
    fn json_matches_documented_shape() {
        let json = pieces_to_json(&[tiny()]).unwrap();
        assert_eq!(
            json,
            r##"[{"pixels":[["#000000","#00ff00"]],"width":2,"height":1}]"##
        );
        assert_eq!(parse_pieces(&json).unwrap(), vec![tiny()]);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_pieces("{nope"), Err(ArtLoadError::Json(_))));
        assert!(matches!(parse_pieces(r#"{"width":1}"#), Err(ArtLoadError::Json(_))));
    }

    #[test]
    fn rejects_empty_collection() {
        assert!(matches!(parse_pieces("[]"), Err(ArtLoadError::Empty)));
        assert!(matches!(QuantumArtAnimator::new(Vec::new()), Err(ArtLoadError::Empty)));
    }

    #[test]
    fn rejects_bad_color() {
        let json = r##"[{"pixels":[["#000000","green"]],"width":2,"height":1}]"##;
        match parse_pieces(json) {
            Err(ArtLoadError::InvalidColor { piece, value }) => {
                assert_eq!((piece, value.as_str()), (0, "green"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_ragged_rows() {
        let json = r##"[{"pixels":[["#000000"],["#000000","#000000"]],"width":1,"height":2}]"##;
        assert!(matches!(
            parse_pieces(json),
            Err(ArtLoadError::RaggedRow { piece: 0, row: 1 })
        ));
        let json = r##"[{"pixels":[["#000000"]],"width":1,"height":2}]"##;
        assert!(matches!(parse_pieces(json), Err(ArtLoadError::RaggedRow { .. })));
    }

    #[test]
    fn oversized_dimensions_fail_without_allocating() {
        let json = r##"[{"pixels":[["#000000"]],"width":4611686018427387904,"height":1}]"##;
        assert!(matches!(
            parse_pieces(json),
            Err(ArtLoadError::RaggedRow { piece: 0, row: 0 })
        ));
        let json = r##"[{"pixels":[["#000000"]],"width":1000000000,"height":1}]"##;
        let err = parse_pieces(json).unwrap_err();
        assert!(err.to_string().starts_with("load failed"));
        assert!(QuantumArtPiece::from_pixels(usize::MAX, 2, vec![PackedRgba::BLACK]).is_none());
    }

    #[test]
    fn errors_say_load_failed() {
        assert!(ArtLoadError::Empty.to_string().starts_with("load failed"));
    }

    // ── Generator ────────────────────────────────────────────────────────

    #[test]
    fn colormap_endpoints() {
        assert_eq!(colormap(0.0), COLORMAP[0]);
        assert_eq!(colormap(0.25), COLORMAP[1]);
        assert_eq!(colormap(1.0), COLORMAP[4]);
        assert_eq!(colormap(f64::NAN), COLORMAP[0]);
    }

    #[test]
    fn generated_piece_uses_full_range() {
        let piece = QuantumArtGenerator::default().generate(32, &mut FxRng::new(1));
        assert_eq!((piece.width(), piece.height()), (32, 32));
        assert_eq!(piece.pixels().len(), 1024);
        assert!(piece.pixels().contains(&COLORMAP[0]));
        assert!(piece.pixels().contains(&COLORMAP[4]));
        assert!(piece.pixels().iter().all(|p| p.a() == 255));
    }

    #[test]
    fn generator_is_seeded() {
        let g = QuantumArtGenerator::default();
        let a = g.generate(16, &mut FxRng::new(7));
        let b = g.generate(16, &mut FxRng::new(7));
        let c = g.generate(16, &mut FxRng::new(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn flat_field_maps_to_black() {
        let piece = QuantumArtGenerator::default().generate(1, &mut FxRng::new(2));
        assert_eq!(piece.pixels(), &[COLORMAP[0]]);
    }

    #[test]
    fn box_blur_zero_pads() {
        let out = box_blur(&[9.0; 9], 3);
        assert_eq!(out[4], 9.0);
        assert_eq!(out[0], 4.0);
    }

    // ── Animator ─────────────────────────────────────────────────────────

    #[test]
    fn next_piece_cycles() {
        let pieces = QuantumArtGenerator::default().generate_many(3, 4, &mut FxRng::new(3));
        let mut anim = QuantumArtAnimator::new(pieces).unwrap();
        assert_eq!(anim.len(), 3);
        anim.next_piece();
        anim.next_piece();
        anim.next_piece();
        assert_eq!(anim.current_index(), 0);
    }

    #[test]
    fn draw_samples_piece_with_jitter() {
        let piece = QuantumArtGenerator::default().generate(16, &mut FxRng::new(4));
        let mut anim = QuantumArtAnimator::new(vec![piece.clone()]).unwrap();
        anim.tick();
        assert!((anim.time() - ART_TIME_STEP).abs() < 1e-12);
        let mut s = PixelSurface::new(16, 16);
        anim.draw(&mut s);
        // Every pixel is tinted by at least one disc (radius >= 80 covers 16x16).
        let center = s.get(8, 8).unwrap();
        assert!(center.a() == 255);
        assert!(s.pixels().iter().all(|p| p.g() > 0 || p.b() > 0));
    }
}
