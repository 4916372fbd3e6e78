//! Terminal setup and teardown.
//!
//! Setup goes through [`ratatui::try_init`], which also installs a panic
//! hook that leaves raw mode and the alternate screen before the panic
//! message is printed.

use std::io::{self, IsTerminal};

use ratatui::DefaultTerminal;

use crate::{RatescopeError, Result};

/// Terminal type driven by the UI loop.
pub type Tui = DefaultTerminal;

/// Enters raw mode and the alternate screen.
///
/// # Errors
///
/// Returns [`RatescopeError::Io`] if stdout is not a TTY or the terminal
/// cannot be initialized.
pub fn setup_terminal() -> Result<Tui> {
    require_tty(io::stdout().is_terminal())?;
    ratatui::try_init().map_err(io_error("failed to initialize terminal"))
}

/// Leaves the alternate screen and raw mode, and shows the cursor.
///
/// # Errors
///
/// Returns [`RatescopeError::Io`] if the terminal cannot be restored.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    ratatui::try_restore().map_err(io_error("failed to restore terminal"))?;
    terminal
        .show_cursor()
        .map_err(io_error("failed to show cursor"))
}

fn require_tty(is_tty: bool) -> Result<()> {
    if is_tty {
        Ok(())
    } else {
        Err(RatescopeError::Io(
            "ratescope needs an interactive terminal (TTY)".to_string(),
        ))
    }
}

fn io_error(context: &'static str) -> impl Fn(io::Error) -> RatescopeError {
    move |e| RatescopeError::Io(format!("{context}: {e}"))
}
