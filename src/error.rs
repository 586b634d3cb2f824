//! Error types for lister.
//!
//! Fallible listing operations return [`CoreResult<T>`], an alias for
//! `Result<T, CoreError>`. Per-entry failures use [`EntryError`] instead, since
//! they are reported inline and never stop a directory listing.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Unified error type for target-level and internal failures.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("{0}: No such file or directory")]
    NotFound(PathBuf),

    /// The process lacks permission to open the target.
    #[error("{0}: Permission denied")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the target is something else.
    #[error("{0}: Not a directory")]
    NotADirectory(PathBuf),

    /// An entry with a not-found kind reached the permission renderer.
    /// The resolver never hands such an entry onward, so this is a bug.
    #[error("lost an entry while rendering: {0}")]
    LostEntry(String),

    /// Any other failure to open the target.
    #[error("{}: {}", .path.display(), os_description(.source))]
    Unreadable { path: PathBuf, source: io::Error },

    /// Failed to parse the TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Writing the listing (or the config file) failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Maps an I/O error raised while opening `path` onto the variant that
    /// names the path.
    pub fn for_target(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotADirectory => CoreError::NotADirectory(path.to_path_buf()),
            _ => CoreError::Unreadable {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Alias used throughout lister.
pub type CoreResult<T> = Result<T, CoreError>;

/// A per-entry attribute fetch failure.
///
/// Carries the bare entry name so the walker can still print it.
#[derive(Debug, thiserror::Error)]
#[error("{}", os_description(.source))]
pub struct EntryError {
    name: OsString,
    #[source]
    source: io::Error,
}

impl EntryError {
    pub fn new(name: OsString, source: io::Error) -> Self {
        Self { name, source }
    }

    #[inline]
    pub fn name(&self) -> &OsString {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

/// The bare OS description of `err`, without the ` (os error N)` suffix that
/// [io::Error] appends for raw OS errors.
fn os_description(err: &io::Error) -> String {
    let text = err.to_string();
    match (err.raw_os_error(), text.rfind(" (os error ")) {
        (Some(_), Some(idx)) => text[..idx].to_string(),
        _ => text,
    }
}
