#![forbid(unsafe_code)]

//! Particle grid: one colored particle per `pixel_size` cell.
//!
//! The grid is laid out row-major over `ceil(w / ps) × ceil(h / ps)` cells.
//! Every particle starts at its cell origin with a random fully saturated hue
//! and a motion coefficient in `[0.02, 0.07)`. The converge phase spirals the
//! particles around the surface center; the first face reveal blows them
//! outward.

use driftfx_core::geometry::{Point, Size};
use driftfx_core::rng::FxRng;
use driftfx_render::{PackedRgba, Surface};

/// Rotation rate of the converge spiral, radians per simulated second.
pub const ROTATION_RATE: f64 = 2.5;
/// Radius factor of the converge target (slightly inside the orbit).
pub const DESCENT: f64 = 0.98;
/// Scatter strength of the reveal explosion, relative to radius.
pub const EXPLOSION: f64 = 0.2;

/// A single grid particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Point,
    pub target: Point,
    pub color: PackedRgba,
    /// Easing coefficient toward `target`, in `[0.02, 0.07)`.
    pub speed: f64,
}

/// Dense particle grid covering a surface.
#[derive(Debug, Clone, Default)]
pub struct ParticleGrid {
    cols: usize,
    rows: usize,
    pixel_size: u32,
    particles: Vec<Particle>,
}

impl ParticleGrid {
    /// Build a grid for `size` at `pixel_size` resolution.
    pub fn generate(size: Size, pixel_size: u32, rng: &mut FxRng) -> Self {
        let mut grid = Self::default();
        grid.regenerate(size, pixel_size, rng);
        grid
    }

    /// Rebuild in place, reusing the particle buffer.
    pub fn regenerate(&mut self, size: Size, pixel_size: u32, rng: &mut FxRng) {
        let ps = pixel_size.max(1);
        let (cols, rows) = size.tiles(ps);
        self.cols = cols;
        self.rows = rows;
        self.pixel_size = ps;
        self.particles.clear();
        self.particles.reserve(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let origin = Point::new((col as u32 * ps) as f64, (row as u32 * ps) as f64);
                self.particles.push(Particle {
                    pos: origin,
                    target: origin,
                    color: PackedRgba::from_hsl(rng.range(0.0, 360.0), 1.0, 0.5),
                    speed: rng.range(0.02, 0.07),
                });
            }
        }
        crate::debug!(cols, rows, pixel_size = ps, "particle grid generated");
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particle at grid cell `(col, row)`.
    pub fn get(&self, col: usize, row: usize) -> Option<&Particle> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.particles.get(row * self.cols + col)
    }

    /// One converge step: retarget each particle onto the rotated orbit and
    /// ease toward it.
    pub fn converge(&mut self, center: Point, elapsed: f64, speed: f64) {
        let turn = elapsed * ROTATION_RATE * speed;
        for p in &mut self.particles {
            let angle = p.pos.angle_from(center) + turn;
            let radius = p.pos.distance(center) * DESCENT;
            p.target = Point::new(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            );
            let k = p.speed * speed;
            p.pos.x += (p.target.x - p.pos.x) * k;
            p.pos.y += (p.target.y - p.pos.y) * k;
        }
    }

    /// One scatter step: random outward kick proportional to radius.
    pub fn scatter(&mut self, center: Point, speed: f64, rng: &mut FxRng) {
        let strength = EXPLOSION * speed;
        for p in &mut self.particles {
            let radius = p.pos.distance(center);
            p.pos.x += rng.centered() * strength * radius;
            p.pos.y += rng.centered() * strength * radius;
        }
    }

    /// Draw every particle as a block snapped to the cell grid.
    pub fn draw(&self, surface: &mut dyn Surface, opacity: f64) {
        if opacity <= 0.0 {
            return;
        }
        let ps = self.pixel_size as f64;
        for p in &self.particles {
            let x = (p.pos.x / ps).floor() * ps;
            let y = (p.pos.y / ps).floor() * ps;
            surface.fill_rect(x, y, ps, ps, p.color.with_opacity(opacity));
        }
    }
}
