//! Miscellaneous utility functions for lister.
//!
//! - [cli]: command-line argument parsing and help text.
//! - [helpers]: home directory lookup and terminal detection.

pub mod cli;
pub mod helpers;

pub use helpers::{get_home, stdout_is_tty};
