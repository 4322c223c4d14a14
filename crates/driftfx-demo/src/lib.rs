#![forbid(unsafe_code)]

//! Terminal host for the driftfx animator.
//!
//! The animator draws into a virtual [`PixelSurface`](driftfx_render::PixelSurface);
//! [`halfblock`] maps it onto terminal cells two pixels at a time.

pub mod cli;
pub mod halfblock;
pub mod session;
