#![forbid(unsafe_code)]

//! Surface sizes and points.

/// Surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel count.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Number of `cell`-sized tiles needed to cover this size, rounding up.
    ///
    /// A zero `cell` is treated as 1.
    pub fn tiles(&self, cell: u32) -> (usize, usize) {
        let cell = cell.max(1);
        (
            self.width.div_ceil(cell) as usize,
            self.height.div_ceil(cell) as usize,
        )
    }
}

/// A point in surface space (pixels, sub-pixel precision).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of the vector from `origin` to `self`, in radians.
    #[inline]
    pub fn angle_from(self, origin: Point) -> f64 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }
}
