#![forbid(unsafe_code)]

//! A [`Surface`] that records draw calls instead of rasterizing them.
//!
//! Used by tests that assert on *what* an effect asked to draw (which text,
//! where, at what alpha) rather than on pixels.

use crate::color::PackedRgba;
use crate::surface::{Surface, TextStyle};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: PackedRgba,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
}

/// Surface of a fixed size that keeps every draw call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// All recorded operations, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text strings drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Rect { .. } => None,
            })
            .collect()
    }

    /// Rectangles drawn, as `(x, y, w, h, color)`.
    pub fn rects(&self) -> Vec<(f64, f64, f64, f64, PackedRgba)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Rect { x, y, w, h, color } => Some((x, y, w, h, color)),
                DrawOp::Text { .. } => None,
            })
            .collect()
    }

    /// Forget recorded operations (size is kept).
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: PackedRgba) {
        self.ops.push(DrawOp::Rect { x, y, w, h, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            x,
            y,
            style,
        });
    }
}
