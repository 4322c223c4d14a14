#![forbid(unsafe_code)]

//! Golden output support for deterministic frame runs.
//!
//! # JSONL Schema
//!
//! Each run emits one JSON object per line:
//!
//! ```json
//! {"event":"start","case":"default","seed":1592644087,"width":160,"height":120,"frames":600}
//! {"event":"frame","frame_id":1,"phase":"converge","speed":1.0,"checksum":"fnv1a64:..."}
//! {"event":"transition","frame_id":40,"from":"converge","to":"face_reveal[0]"}
//! {"event":"complete","outcome":"pass","frames":600,"checksums":["fnv1a64:...",...]}
//! ```
//!
//! No wall-clock fields are logged, so two runs with the same seed produce
//! byte-identical logs.
//!
//! # Blessing
//!
//! Set `DRIFTFX_HARNESS_BLESS=1` to overwrite the stored checksum file instead
//! of comparing against it.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use driftfx_extras::Transition;
use driftfx_render::PixelSurface;

use crate::headless::FrameRecord;

/// Prefix naming the hash algorithm in every checksum string.
pub const CHECKSUM_PREFIX: &str = "fnv1a64:";
/// Environment variable enabling bless mode.
pub const BLESS_ENV: &str = "DRIFTFX_HARNESS_BLESS";

const FNV64_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV64_PRIME: u64 = 0x100000001b3;

// ============================================================================
// Checksum Computation
// ============================================================================

fn fnv1a64_extend(mut hash: u64, bytes: &[u8]) -> u64 {
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV64_PRIME);
    }
    hash
}

/// Checksum of a pixel surface: dimensions followed by every pixel, row-major.
///
/// Returns `"fnv1a64:"` followed by 16 lowercase hex digits.
pub fn frame_checksum(surface: &PixelSurface) -> String {
    let size = surface.size();
    let mut hash = FNV64_OFFSET_BASIS;
    hash = fnv1a64_extend(hash, &size.width.to_le_bytes());
    hash = fnv1a64_extend(hash, &size.height.to_le_bytes());
    for px in surface.pixels() {
        hash = fnv1a64_extend(hash, &px.0.to_le_bytes());
    }
    format!("{CHECKSUM_PREFIX}{hash:016x}")
}

// ============================================================================
// JSONL Logger
// ============================================================================

/// Run outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoldenOutcome {
    Pass,
    Fail,
    Skip,
}

/// One line of the golden log.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GoldenEvent<'a> {
    Start {
        case: &'a str,
        seed: u64,
        width: u32,
        height: u32,
        frames: u64,
    },
    Frame {
        frame_id: u64,
        phase: String,
        speed: f64,
        checksum: &'a str,
    },
    Transition {
        frame_id: u64,
        from: String,
        to: String,
    },
    Complete {
        outcome: GoldenOutcome,
        frames: usize,
        checksums: &'a [String],
    },
    Error {
        message: &'a str,
    },
}

/// JSONL writer for golden runs. Collects frame checksums as it goes.
#[derive(Debug)]
pub struct GoldenLog<W: Write> {
    writer: W,
    checksums: Vec<String>,
}

impl<W: Write> GoldenLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            checksums: Vec::new(),
        }
    }

    /// Log the run header.
    pub fn log_start(
        &mut self,
        case: &str,
        seed: u64,
        width: u32,
        height: u32,
        frames: u64,
    ) -> io::Result<()> {
        self.write_event(&GoldenEvent::Start {
            case,
            seed,
            width,
            height,
            frames,
        })
    }

    /// Log a rendered frame and remember its checksum.
    pub fn log_frame(&mut self, record: &FrameRecord) -> io::Result<()> {
        self.write_event(&GoldenEvent::Frame {
            frame_id: record.frame_id,
            phase: record.phase.to_string(),
            speed: record.speed,
            checksum: &record.checksum,
        })?;
        self.checksums.push(record.checksum.clone());
        Ok(())
    }

    /// Log a phase transition.
    pub fn log_transition(&mut self, transition: &Transition) -> io::Result<()> {
        self.write_event(&GoldenEvent::Transition {
            frame_id: transition.frame,
            from: transition.from.to_string(),
            to: transition.to.to_string(),
        })
    }

    /// Log every record, each followed by its transition if it had one.
    pub fn log_records(&mut self, records: &[FrameRecord]) -> io::Result<()> {
        for record in records {
            self.log_frame(record)?;
            if let Some(transition) = &record.transition {
                self.log_transition(transition)?;
            }
        }
        Ok(())
    }

    /// Log the run footer with all collected checksums.
    pub fn log_complete(&mut self, outcome: GoldenOutcome) -> io::Result<()> {
        let checksums = std::mem::take(&mut self.checksums);
        let result = self.write_event(&GoldenEvent::Complete {
            outcome,
            frames: checksums.len(),
            checksums: &checksums,
        });
        self.checksums = checksums;
        result
    }

    pub fn log_error(&mut self, message: &str) -> io::Result<()> {
        self.write_event(&GoldenEvent::Error { message })
    }

    /// Checksums collected so far.
    pub fn checksums(&self) -> &[String] {
        &self.checksums
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_event(&mut self, event: &GoldenEvent<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

// ============================================================================
// Checksum Files
// ============================================================================

/// Load checksums, one per line. Blank lines and `#` comments are skipped.
pub fn load_checksums(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Save checksums, one per line, creating parent directories.
pub fn save_checksums(path: &Path, checksums: &[String]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = String::new();
    for checksum in checksums {
        out.push_str(checksum);
        out.push('\n');
    }
    fs::write(path, out)
}

/// Whether bless mode is on.
pub fn is_bless_mode() -> bool {
    std::env::var(BLESS_ENV).is_ok_and(|v| matches!(v.trim(), "1" | "true" | "yes"))
}

/// Compare checksums. Returns the outcome and the first mismatching frame.
///
/// An empty expectation passes.
pub fn verify_checksums(actual: &[String], expected: &[String]) -> (GoldenOutcome, Option<usize>) {
    if expected.is_empty() {
        return (GoldenOutcome::Pass, None);
    }
    if let Some(i) = actual
        .iter()
        .zip(expected)
        .position(|(a, e)| a != e)
    {
        return (GoldenOutcome::Fail, Some(i));
    }
    if actual.len() != expected.len() {
        return (GoldenOutcome::Fail, Some(actual.len().min(expected.len())));
    }
    (GoldenOutcome::Pass, None)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use driftfx_render::PackedRgba;

    #[test]
    fn checksum_has_prefix_and_fixed_width() {
        let checksum = frame_checksum(&PixelSurface::new(10, 5));
        assert!(checksum.starts_with(CHECKSUM_PREFIX));
        assert_eq!(checksum.len(), CHECKSUM_PREFIX.len() + 16);
    }

    #[test]
    fn checksum_depends_on_pixels_and_shape() {
        let black = PixelSurface::new(4, 4);
        let red = PixelSurface::filled(4, 4, PackedRgba::RED);
        let wide = PixelSurface::new(8, 2);
        assert_eq!(frame_checksum(&black), frame_checksum(&PixelSurface::new(4, 4)));
        assert_ne!(frame_checksum(&black), frame_checksum(&red));
        assert_ne!(frame_checksum(&black), frame_checksum(&wide));
    }

    #[test]
    fn fnv_matches_reference_vector() {
        // FNV-1a 64 of "a".
        assert_eq!(fnv1a64_extend(FNV64_OFFSET_BASIS, b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn verify_reports_first_mismatch() {
        let a: Vec<String> = ["x", "y", "z"].map(String::from).to_vec();
        let b: Vec<String> = ["x", "q", "z"].map(String::from).to_vec();
        assert_eq!(verify_checksums(&a, &a), (GoldenOutcome::Pass, None));
        assert_eq!(verify_checksums(&a, &b), (GoldenOutcome::Fail, Some(1)));
        assert_eq!(verify_checksums(&a, &[]), (GoldenOutcome::Pass, None));
        assert_eq!(verify_checksums(&a[..2], &a), (GoldenOutcome::Fail, Some(2)));
    }

    #[test]
    fn error_lines_are_json() {
        let mut log = GoldenLog::new(Vec::new());
        log.log_error("bad \"quote\"").unwrap();
        let out = String::from_utf8(log.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["event"], "error");
        assert_eq!(value["message"], "bad \"quote\"");
    }

    #[test]
    fn checksum_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("driftfx-golden-{}", std::process::id()));
        let path = dir.join("nested").join("case.checksums");
        let sums = vec!["fnv1a64:0000000000000001".to_string(), "fnv1a64:00000000000000ff".to_string()];
        save_checksums(&path, &sums).unwrap();
        assert_eq!(load_checksums(&path).unwrap(), sums);
        let _ = fs::remove_dir_all(&dir);
    }
}
