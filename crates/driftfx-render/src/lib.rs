#![forbid(unsafe_code)]

//! Drawing primitives for driftfx.
//!
//! - [`Surface`]: the host-supplied drawing target effects render into.
//! - [`PackedRgba`]: straight-alpha colors with exact source-over blending.
//! - [`PixelSurface`]: headless rasterizer for tests, snapshots and terminals.
//! - [`RecordingSurface`]: records draw calls for structural assertions.

pub mod color;
pub mod font;
pub mod pixel;
pub mod recording;
pub mod surface;

pub use color::PackedRgba;
pub use pixel::PixelSurface;
pub use recording::{DrawOp, RecordingSurface};
pub use surface::{MONO_ADVANCE, Surface, TextAlign, TextStyle, text_advance};
