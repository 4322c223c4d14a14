#![forbid(unsafe_code)]

//! Deterministic frame harness for driftfx.
//!
//! - [`golden`]: pixel checksums, JSONL golden logs, checksum files.
//! - [`headless`]: run the phase animator without a host and record every frame.

pub mod golden;
pub mod headless;

pub use golden::{GoldenLog, GoldenOutcome, frame_checksum, verify_checksums};
pub use headless::{FrameRecord, Script, run_headless, run_script};
