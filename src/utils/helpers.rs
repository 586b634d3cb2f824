//! Helpers for lister.

use crossterm::tty::IsTty;
use std::path::PathBuf;

/// Home directory of the current user, if known.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// True when stdout is attached to a terminal.
pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_tty()
}
