#![forbid(unsafe_code)]

//! Terminal lifecycle: raw mode, alternate screen, mouse capture.
//!
//! [`TerminalGuard`] restores the terminal when dropped. A panic hook does
//! the same best-effort cleanup before the default hook prints the panic.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::{cursor, event, execute, terminal};

/// RAII guard for the demo's terminal state.
#[derive(Debug)]
pub struct TerminalGuard {
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
}

impl TerminalGuard {
    /// Enter raw mode, switch to the alternate screen, capture the mouse,
    /// and hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled or a control sequence
    /// cannot be written. Already-enabled state is restored on the way out.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode()?;
        driftfx_core::info!("terminal raw mode enabled");

        let mut guard = Self {
            alternate_screen_enabled: false,
            mouse_enabled: false,
        };
        let mut stdout = io::stdout();

        execute!(stdout, terminal::EnterAlternateScreen)?;
        guard.alternate_screen_enabled = true;

        execute!(stdout, event::EnableMouseCapture)?;
        guard.mouse_enabled = true;

        execute!(stdout, cursor::Hide, terminal::Clear(terminal::ClearType::All))?;
        Ok(guard)
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
            self.mouse_enabled = false;
        }

        let _ = execute!(stdout, cursor::Show);

        if self.alternate_screen_enabled {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
        }

        let _ = terminal::disable_raw_mode();
        driftfx_core::info!("terminal restored");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, event::DisableMouseCapture);
    let _ = execute!(stdout, cursor::Show);
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}
