#![forbid(unsafe_code)]

//! driftfx terminal demo binary entry point.
//!
//! # Running
//!
//! ```sh
//! cargo run -p driftfx-demo -- --skip-intro
//! ```

use std::io::{self, BufWriter};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use web_time::Instant;

use driftfx_demo::cli::Opts;
use driftfx_demo::halfblock::{downsample, write_cells};
use driftfx_demo::session::TerminalGuard;
use driftfx_extras::AnimatorConfig;
use driftfx_render::PixelSurface;
use driftfx_web::{DriverConfig, FrameDriver};

/// What a terminal event asks the loop to do.
enum Action {
    Continue,
    Quit,
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

struct Demo {
    opts: Opts,
    driver: FrameDriver,
    surface: PixelSurface,
    cols: u16,
    rows: u16,
    start: Instant,
}

impl Demo {
    fn new(opts: Opts, cols: u16, rows: u16) -> Self {
        let mut animator = AnimatorConfig::default();
        if let Some(seed) = opts.seed {
            animator = animator.with_seed(seed);
        }
        let config = DriverConfig::default()
            .with_animator(animator)
            .with_skip_intro(opts.skip_intro);
        let (width, height) = opts.surface_size(cols, rows);
        Self {
            driver: FrameDriver::new(config, width, height),
            surface: PixelSurface::new(width, height),
            opts,
            cols,
            rows,
            start: Instant::now(),
        }
    }

    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn handle(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) if is_quit_key(&key) => return Action::Quit,
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.driver.push_click(self.now());
            }
            Event::Resize(cols, rows) => {
                self.cols = cols;
                self.rows = rows;
                if self.opts.follows_terminal() {
                    let (width, height) = self.opts.surface_size(cols, rows);
                    self.surface.resize(width, height);
                    self.driver.resize(width, height);
                }
            }
            _ => {}
        }
        Action::Continue
    }

    fn draw(&mut self, out: &mut impl io::Write) -> io::Result<()> {
        self.driver.set_time(self.now());
        self.driver.step(&mut self.surface);
        let cells = downsample(&self.surface, self.cols, self.rows);
        write_cells(out, &cells, self.cols)
    }

    fn expired(&self) -> bool {
        self.opts.exit_after_ms > 0
            && self.now() >= Duration::from_millis(self.opts.exit_after_ms)
    }
}

fn run(opts: Opts) -> io::Result<()> {
    let (cols, rows) = crossterm::terminal::size()?;
    let frame = Duration::from_secs_f64(1.0 / f64::from(opts.fps));
    let mut demo = Demo::new(opts, cols, rows);
    let mut out = BufWriter::new(io::stdout());
    let mut next_frame = demo.now();

    loop {
        let timeout = next_frame.saturating_sub(demo.now());
        if event::poll(timeout)? {
            if let Action::Quit = demo.handle(event::read()?) {
                return Ok(());
            }
            continue;
        }
        demo.draw(&mut out)?;
        next_frame += frame;
        // Drop frames instead of queueing them when the terminal falls behind.
        if next_frame < demo.now() {
            next_frame = demo.now();
        }
        if demo.expired() {
            return Ok(());
        }
    }
}

fn main() -> io::Result<()> {
    let opts = Opts::parse();

    #[cfg(feature = "tracing")]
    let _ = driftfx_core::logging::init_json_subscriber();

    let guard = TerminalGuard::enter()?;
    let result = run(opts);
    drop(guard);
    result
}
