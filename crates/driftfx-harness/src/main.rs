#![forbid(unsafe_code)]

//! Headless golden runner.
//!
//! Runs the phase animator without a terminal and writes a JSONL golden log
//! to stdout.
//!
//! # Running
//!
//! ```sh
//! DRIFTFX_HARNESS_FRAMES=900 DRIFTFX_HARNESS_SEED=7 cargo run -p driftfx-harness
//! ```
//!
//! # Environment
//!
//! - `DRIFTFX_HARNESS_FRAMES`: frames to run (default 600)
//! - `DRIFTFX_HARNESS_SEED`: animator seed
//! - `DRIFTFX_HARNESS_WIDTH` / `DRIFTFX_HARNESS_HEIGHT`: surface size (default 160x120)
//! - `DRIFTFX_HARNESS_CLICKS`: comma-separated frame numbers that receive a click
//! - `DRIFTFX_HARNESS_GOLDEN`: checksum file to compare against (or write in bless mode)
//! - `DRIFTFX_HARNESS_BLESS`: overwrite the checksum file
//! - `DRIFTFX_LOG`: log filter when built with the `tracing` feature

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use driftfx_core::geometry::Size;
use driftfx_extras::AnimatorConfig;
use driftfx_harness::golden::{is_bless_mode, load_checksums, save_checksums};
use driftfx_harness::{GoldenLog, GoldenOutcome, Script, run_script, verify_checksums};

const DEFAULT_FRAMES: u64 = 600;
const DEFAULT_WIDTH: u32 = 160;
const DEFAULT_HEIGHT: u32 = 120;

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn env_u32(name: &str) -> Option<u32> {
    env_u64(name).and_then(|v| u32::try_from(v).ok())
}

fn env_list(name: &str) -> Vec<u64> {
    std::env::var(name)
        .map(|value| {
            value
                .split(',')
                .filter_map(|part| part.trim().parse::<u64>().ok())
                .collect()
        })
        .unwrap_or_default()
}

fn main() -> io::Result<ExitCode> {
    #[cfg(feature = "tracing")]
    let _ = driftfx_core::logging::init_json_subscriber();

    let mut config = AnimatorConfig::default();
    if let Some(seed) = env_u64("DRIFTFX_HARNESS_SEED") {
        config = config.with_seed(seed);
    }
    let frames = env_u64("DRIFTFX_HARNESS_FRAMES").unwrap_or(DEFAULT_FRAMES);
    let size = Size::new(
        env_u32("DRIFTFX_HARNESS_WIDTH").unwrap_or(DEFAULT_WIDTH),
        env_u32("DRIFTFX_HARNESS_HEIGHT").unwrap_or(DEFAULT_HEIGHT),
    );
    let seed = config.seed;
    let script = Script::new(config, size, frames).with_clicks(env_list("DRIFTFX_HARNESS_CLICKS"));
    let golden = std::env::var("DRIFTFX_HARNESS_GOLDEN").ok().map(PathBuf::from);

    let stdout = io::stdout();
    let mut log = GoldenLog::new(stdout.lock());
    log.log_start("default", seed, size.width, size.height, frames)?;
    let records = run_script(&script);
    log.log_records(&records)?;

    let outcome = match golden {
        Some(path) if is_bless_mode() => {
            save_checksums(&path, log.checksums())?;
            GoldenOutcome::Pass
        }
        Some(path) => match load_checksums(&path) {
            Ok(expected) => {
                let (outcome, mismatch) = verify_checksums(log.checksums(), &expected);
                if let Some(frame) = mismatch {
                    log.log_error(&format!("checksum mismatch at frame {frame}"))?;
                }
                outcome
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => GoldenOutcome::Skip,
            Err(err) => return Err(err),
        },
        None => GoldenOutcome::Pass,
    };
    log.log_complete(outcome)?;
    log.into_inner().flush()?;

    Ok(if outcome == GoldenOutcome::Fail {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
