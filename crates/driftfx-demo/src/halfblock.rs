#![forbid(unsafe_code)]

//! Half-block presentation of a pixel surface.
//!
//! Each terminal cell shows two vertically stacked pixels as `▀` with the
//! foreground set to the top pixel and the background to the bottom one.
//! Color escapes are only emitted when they change.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use driftfx_render::{PackedRgba, PixelSurface};

pub const UPPER_HALF: char = '▀';

/// Two pixels sharing one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfCell {
    pub top: PackedRgba,
    pub bottom: PackedRgba,
}

/// Sample the surface onto a `cols × rows` cell grid (nearest neighbour).
///
/// Returns cells in row-major order.
pub fn downsample(surface: &PixelSurface, cols: u16, rows: u16) -> Vec<HalfCell> {
    let size = surface.size();
    let (cols32, rows32) = (u32::from(cols), u32::from(rows));
    let mut cells = Vec::with_capacity(usize::from(cols) * usize::from(rows));
    if cols == 0 || rows == 0 || size.is_empty() {
        return cells;
    }
    let sample = |cx: u32, py: u32| {
        let x = (u64::from(cx) * u64::from(size.width) / u64::from(cols32)) as u32;
        let y = (u64::from(py) * u64::from(size.height) / u64::from(rows32 * 2)) as u32;
        surface.get(x, y).unwrap_or(PackedRgba::BLACK)
    };
    for cy in 0..rows32 {
        for cx in 0..cols32 {
            cells.push(HalfCell {
                top: sample(cx, cy * 2),
                bottom: sample(cx, cy * 2 + 1),
            });
        }
    }
    cells
}

fn term_color(c: PackedRgba) -> Color {
    Color::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

/// Queue the cells starting at the top-left corner and flush.
pub fn write_cells<W: Write>(out: &mut W, cells: &[HalfCell], cols: u16) -> io::Result<()> {
    if cols == 0 {
        return Ok(());
    }
    let mut fg = None;
    let mut bg = None;
    for (row, line) in cells.chunks(usize::from(cols)).enumerate() {
        queue!(out, MoveTo(0, u16::try_from(row).unwrap_or(u16::MAX)))?;
        for cell in line {
            if fg != Some(cell.top) {
                queue!(out, SetForegroundColor(term_color(cell.top)))?;
                fg = Some(cell.top);
            }
            if bg != Some(cell.bottom) {
                queue!(out, SetBackgroundColor(term_color(cell.bottom)))?;
                bg = Some(cell.bottom);
            }
            queue!(out, Print(UPPER_HALF))?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftfx_render::Surface;
    use pretty_assertions::assert_eq;

    #[test]
    fn downsample_picks_top_and_bottom_rows() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_rect(0.0, 0.0, 4.0, 1.0, PackedRgba::RED);
        surface.fill_rect(0.0, 2.0, 4.0, 1.0, PackedRgba::BLUE);
        let cells = downsample(&surface, 2, 1);
        assert_eq!(
            cells,
            vec![
                HalfCell {
                    top: PackedRgba::RED,
                    bottom: PackedRgba::BLUE
                };
                2
            ]
        );
    }

    #[test]
    fn downsample_handles_degenerate_grids() {
        let surface = PixelSurface::new(4, 4);
        assert!(downsample(&surface, 0, 3).is_empty());
        assert!(downsample(&surface, 3, 0).is_empty());
        assert_eq!(downsample(&surface, 10, 10).len(), 100);
    }

    #[test]
    fn write_emits_one_block_per_cell() {
        let surface = PixelSurface::filled(6, 4, PackedRgba::GREEN);
        let cells = downsample(&surface, 3, 2);
        let mut out = Vec::new();
        write_cells(&mut out, &cells, 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(UPPER_HALF).count(), 6);
        // Uniform color: one foreground and one background escape.
        assert_eq!(text.matches("38;2;0;255;0").count(), 1);
        assert_eq!(text.matches("48;2;0;255;0").count(), 1);
    }

    #[test]
    fn write_with_zero_columns_is_noop() {
        let mut out = Vec::new();
        write_cells(&mut out, &[], 0).unwrap();
        assert!(out.is_empty());
    }
}
