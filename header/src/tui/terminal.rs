//! Terminal ownership for the wallet header front-end.
//!
//! [`Tui`] puts the terminal into raw mode on the alternate screen and hands
//! it back on drop. [`install_panic_hook`] does the same from a panic, so the
//! panic message lands on the normal screen.
//!
//! ```ignore
//! use wallet_header::tui::{install_panic_hook, Tui};
//!
//! install_panic_hook();
//! let mut tui = Tui::new()?;
//! tui.draw(|frame| wallet_header::tui::ui::render(frame, &app))?;
//! ```

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Gives the terminal back to the shell. Errors are ignored.
fn release_terminal() {
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Chains a panic hook that releases the terminal before the previous hook
/// prints the panic.
///
/// Call once, before [`Tui::new`].
pub fn install_panic_hook() {
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        release_terminal();
        previous_hook(panic_info);
    }));
}

/// A raw-mode, alternate-screen terminal that restores itself on drop.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl Tui {
    /// Takes over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode, the alternate screen or the backend
    /// cannot be set up. Partial setup is undone first.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
            release_terminal();
        })?;

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be flushed.
    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Returns the terminal size as (columns, rows).
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    /// Clears the screen, forcing a full redraw on the next frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear cannot be written.
    pub fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    /// Restores the terminal now and reports failures. Drop becomes a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if leaving the alternate screen or raw mode fails.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        disable_raw_mode()
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if !self.restored {
            release_terminal();
        }
    }
}
