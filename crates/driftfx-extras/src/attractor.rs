#![forbid(unsafe_code)]

//! Lorenz attractor trace.
//!
//! ```text
//! dx/dt = σ(y - x)
//! dy/dt = x(ρ - z) - y
//! dz/dt = xy - βz
//! ```
//!
//! Integrated with forward Euler from `(1, 1, 1)`. The integrator state
//! persists across ticks so the trace keeps growing along one trajectory;
//! the point buffer is a ring that evicts the oldest point once full.

use std::collections::VecDeque;

use driftfx_core::geometry::Point;
use driftfx_render::{PackedRgba, Surface};

use crate::config::AttractorConfig;

/// Projection scale: surface pixels per attractor unit.
pub const PROJECTION_SCALE: f64 = 10.0;

/// Classic Lorenz parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

/// A point in attractor space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TracePoint {
    const ORIGIN: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    /// Screen position around `center`.
    pub fn project(&self, center: Point) -> Point {
        Point::new(
            self.x * PROJECTION_SCALE + center.x,
            self.y * PROJECTION_SCALE + center.y,
        )
    }

    /// Drawn edge length: `z / 10` clamped to `[1, 4]`.
    pub fn size(&self) -> f64 {
        (self.z / 10.0).clamp(1.0, 4.0)
    }
}

/// Bounded trajectory of the Lorenz system.
#[derive(Debug, Clone)]
pub struct AttractorTrace {
    params: LorenzParams,
    state: TracePoint,
    points: VecDeque<TracePoint>,
    capacity: usize,
    dt: f64,
}

impl AttractorTrace {
    pub fn new(config: AttractorConfig) -> Self {
        Self::with_params(LorenzParams::default(), config)
    }

    pub fn with_params(params: LorenzParams, config: AttractorConfig) -> Self {
        let capacity = config.capacity.max(1);
        Self {
            params,
            state: TracePoint::ORIGIN,
            points: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
            dt: config.dt,
        }
    }

    /// Integrate `steps` Euler steps, appending each new point.
    pub fn extend(&mut self, steps: usize) {
        let LorenzParams { sigma, rho, beta } = self.params;
        for _ in 0..steps {
            let TracePoint { x, y, z } = self.state;
            let dx = sigma * (y - x);
            let dy = x * (rho - z) - y;
            let dz = x * y - beta * z;
            self.state = TracePoint {
                x: x + dx * self.dt,
                y: y + dy * self.dt,
                z: z + dz * self.dt,
            };
            if self.points.len() == self.capacity {
                self.points.pop_front();
            }
            self.points.push_back(self.state);
        }
    }

    /// Drop every point and restart the trajectory at `(1, 1, 1)`.
    pub fn clear(&mut self) {
        self.points.clear();
        self.state = TracePoint::ORIGIN;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points oldest first.
    pub fn points(&self) -> impl Iterator<Item = &TracePoint> {
        self.points.iter()
    }

    /// Current integrator state (the newest point, or the origin).
    pub fn head(&self) -> TracePoint {
        self.state
    }

    /// Draw the trace around `center`. Point `i` gets hue `(i + hue_shift) mod 360`.
    pub fn draw(&self, surface: &mut dyn Surface, center: Point, hue_shift: f64, opacity: f64) {
        if opacity <= 0.0 {
            return;
        }
        for (i, point) in self.points.iter().enumerate() {
            let at = point.project(center);
            let size = point.size();
            let color = PackedRgba::from_hsl(i as f64 + hue_shift, 1.0, 0.5).with_opacity(opacity);
            surface.fill_rect(at.x, at.y, size, size, color);
        }
    }
}
