#![forbid(unsafe_code)]

//! Command-line argument parsing for the terminal demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `DRIFTFX_DEMO_*` prefix.

use std::env;
use std::fmt;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
driftfx demo: cyclic phase animation in the terminal

USAGE:
    driftfx-demo [OPTIONS]

OPTIONS:
    --seed=N             Seed for all randomness (default: built-in)
    --width=N            Virtual surface width in pixels (default: follow terminal)
    --height=N           Virtual surface height in pixels (default: follow terminal)
    --fps=N              Target frames per second, 1-120 (default: 30)
    --skip-intro         Start with the animator instead of the typed questions
    --exit-after-ms=N    Quit after N milliseconds (0 = never)
    --help, -h           Show this help message
    --version, -V        Show version

CONTROLS:
    Left click           Speed up (click twice quickly for a bigger boost)
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    DRIFTFX_DEMO_SEED           Override --seed
    DRIFTFX_DEMO_WIDTH          Override --width
    DRIFTFX_DEMO_HEIGHT         Override --height
    DRIFTFX_DEMO_FPS            Override --fps
    DRIFTFX_DEMO_SKIP_INTRO     Set to 1 to skip the intro
    DRIFTFX_DEMO_EXIT_AFTER_MS  Auto-quit after N milliseconds (for testing)
    DRIFTFX_LOG                 Log filter (with the `tracing` feature)";

const MAX_FPS: u32 = 120;

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Animator seed; `None` keeps the default.
    pub seed: Option<u64>,
    /// Virtual surface width; 0 follows the terminal.
    pub width: u32,
    /// Virtual surface height; 0 follows the terminal.
    pub height: u32,
    pub fps: u32,
    pub skip_intro: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            seed: None,
            width: 0,
            height: 0,
            fps: 30,
            skip_intro: false,
            exit_after_ms: 0,
        }
    }
}

/// Why parsing stopped without producing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    Help,
    Version,
    Invalid(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str(HELP_TEXT),
            Self::Version => write!(f, "driftfx-demo {VERSION}"),
            Self::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for CliError {}

fn parse_value<T: std::str::FromStr>(flag: &str, val: &str) -> Result<T, CliError> {
    val.trim()
        .parse()
        .map_err(|_| CliError::Invalid(format!("Invalid {flag} value: {val}")))
}

fn is_truthy(val: &str) -> bool {
    matches!(val.trim(), "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON")
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Prints help or version and exits when asked to; exits with status 1
    /// on invalid input.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |name| env::var(name).ok()) {
            Ok(opts) => opts,
            Err(err @ (CliError::Help | CliError::Version)) => {
                println!("{err}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from explicit args and an environment lookup.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. Unparseable environment values are
    /// ignored.
    pub fn parse_from<I, F>(args: I, var: F) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = var("DRIFTFX_DEMO_SEED")
            && let Ok(n) = val.trim().parse()
        {
            opts.seed = Some(n);
        }
        if let Some(val) = var("DRIFTFX_DEMO_WIDTH")
            && let Ok(n) = val.trim().parse()
        {
            opts.width = n;
        }
        if let Some(val) = var("DRIFTFX_DEMO_HEIGHT")
            && let Ok(n) = val.trim().parse()
        {
            opts.height = n;
        }
        if let Some(val) = var("DRIFTFX_DEMO_FPS")
            && let Ok(n) = val.trim().parse()
        {
            opts.fps = n;
        }
        if let Some(val) = var("DRIFTFX_DEMO_SKIP_INTRO") {
            opts.skip_intro = is_truthy(&val);
        }
        if let Some(val) = var("DRIFTFX_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.trim().parse()
        {
            opts.exit_after_ms = n;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Err(CliError::Help),
                "--version" | "-V" => return Err(CliError::Version),
                "--skip-intro" => opts.skip_intro = true,
                other => {
                    if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = Some(parse_value("--seed", val)?);
                    } else if let Some(val) = other.strip_prefix("--width=") {
                        opts.width = parse_value("--width", val)?;
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = parse_value("--height", val)?;
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = parse_value("--fps", val)?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_value("--exit-after-ms", val)?;
                    } else {
                        return Err(CliError::Invalid(format!("Unknown argument: {other}")));
                    }
                }
            }
        }

        opts.fps = opts.fps.clamp(1, MAX_FPS);
        Ok(opts)
    }

    /// Virtual surface size for a terminal of `cols × rows` cells.
    ///
    /// Unset dimensions follow the terminal at one pixel per half cell.
    pub fn surface_size(&self, cols: u16, rows: u16) -> (u32, u32) {
        let width = if self.width == 0 {
            u32::from(cols)
        } else {
            self.width
        };
        let height = if self.height == 0 {
            u32::from(rows) * 2
        } else {
            self.height
        };
        (width.max(1), height.max(1))
    }

    /// Whether the surface follows terminal resizes.
    pub fn follows_terminal(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.seed, None);
        assert_eq!((opts.width, opts.height), (0, 0));
        assert_eq!(opts.fps, 30);
        assert!(!opts.skip_intro);
        assert_eq!(opts.exit_after_ms, 0);
    }

    #[test]
    fn flags_parse() {
        let opts = Opts::parse_from(
            args(&["--seed=7", "--width=320", "--height=240", "--skip-intro", "--fps=60"]),
            no_env,
        )
        .unwrap();
        assert_eq!(
            opts,
            Opts {
                seed: Some(7),
                width: 320,
                height: 240,
                fps: 60,
                skip_intro: true,
                exit_after_ms: 0,
            }
        );
    }

    #[test]
    fn env_is_overridden_by_flags() {
        let env = |name: &str| match name {
            "DRIFTFX_DEMO_SEED" => Some("11".to_string()),
            "DRIFTFX_DEMO_SKIP_INTRO" => Some("yes".to_string()),
            "DRIFTFX_DEMO_EXIT_AFTER_MS" => Some("2500".to_string()),
            "DRIFTFX_DEMO_FPS" => Some("not a number".to_string()),
            _ => None,
        };
        let opts = Opts::parse_from(args(&["--seed=12"]), env).unwrap();
        assert_eq!(opts.seed, Some(12));
        assert!(opts.skip_intro);
        assert_eq!(opts.exit_after_ms, 2500);
        assert_eq!(opts.fps, 30);
    }

    #[test]
    fn fps_is_clamped() {
        let opts = Opts::parse_from(args(&["--fps=0"]), no_env).unwrap();
        assert_eq!(opts.fps, 1);
        let opts = Opts::parse_from(args(&["--fps=1000"]), no_env).unwrap();
        assert_eq!(opts.fps, MAX_FPS);
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            Opts::parse_from(args(&["--seed=abc"]), no_env),
            Err(CliError::Invalid("Invalid --seed value: abc".into()))
        );
        assert!(matches!(
            Opts::parse_from(args(&["--bogus"]), no_env),
            Err(CliError::Invalid(_))
        ));
        assert_eq!(Opts::parse_from(args(&["-h"]), no_env), Err(CliError::Help));
    }

    #[test]
    fn surface_follows_terminal_when_unset() {
        let opts = Opts::default();
        assert!(opts.follows_terminal());
        assert_eq!(opts.surface_size(80, 24), (80, 48));
        let fixed = Opts {
            width: 320,
            height: 240,
            ..Opts::default()
        };
        assert!(!fixed.follows_terminal());
        assert_eq!(fixed.surface_size(80, 24), (320, 240));
    }

    #[test]
    fn help_text_contains_env_vars() {
        assert!(HELP_TEXT.contains("DRIFTFX_DEMO_SEED"));
        assert!(HELP_TEXT.contains("DRIFTFX_DEMO_EXIT_AFTER_MS"));
        assert!(!VERSION.is_empty());
    }
}
