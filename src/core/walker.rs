//! Directory walking and output for lister.
//!
//! A [Lister] renders one directory at a time: it enumerates the entries, then
//! resolves and renders each one before moving to the next. Entry-level
//! failures are written inline and never stop the directory. Only failing to
//! open the directory itself ends that target.

use crate::core::fm::{AccountLookup, resolve_entry};
use crate::core::formatter::Formatter;
use crate::core::layout::separator_for;
use crate::error::{CoreError, CoreResult};

use chrono::{DateTime, Local};

use std::fs;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Listing mode, fixed for a whole invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Compact,
    Detailed,
}

impl RenderMode {
    pub fn from_detailed(detailed: bool) -> Self {
        if detailed {
            RenderMode::Detailed
        } else {
            RenderMode::Compact
        }
    }
}

/// Outcome of [Lister::list_targets].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSummary {
    pub listed: usize,
    pub failed: usize,
}

impl ListSummary {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub struct Lister<'a> {
    mode: RenderMode,
    formatter: Formatter,
    accounts: &'a dyn AccountLookup,
    now: DateTime<Local>,
}

impl<'a> Lister<'a> {
    pub fn new(mode: RenderMode, formatter: Formatter, accounts: &'a dyn AccountLookup) -> Self {
        Self {
            mode,
            formatter,
            accounts,
            now: Local::now(),
        }
    }

    /// Overrides the reference time used for recency decisions.
    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    #[inline]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Lists every target in order. An empty slice lists the current directory.
    ///
    /// Targets get a `path:` label when there is more than one. A target that
    /// cannot be opened gets a one line description and is counted as failed.
    ///
    /// # Errors
    /// Only when writing to `out` fails.
    pub fn list_targets<W: Write>(
        &self,
        targets: &[PathBuf],
        out: &mut W,
    ) -> io::Result<ListSummary> {
        let implicit = [PathBuf::from(".")];
        let targets = if targets.is_empty() { &implicit[..] } else { targets };
        let labeled = targets.len() > 1;
        let mut summary = ListSummary::default();

        for target in targets {
            if labeled {
                writeln!(out, "{}:", target.display())?;
            }
            match self.list_directory(target, out) {
                Ok(()) => summary.listed += 1,
                Err(CoreError::Io(e)) => return Err(e),
                Err(e) => {
                    tracing::warn!("cannot list {}: {}", target.display(), e);
                    writeln!(out, "{}", e)?;
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }

    /// Lists a single directory into `out`.
    ///
    /// # Errors
    /// A path-carrying [CoreError] when the directory cannot be opened,
    /// [CoreError::LostEntry] on an internal rendering bug, and
    /// [CoreError::Io] when writing fails.
    pub fn list_directory<W: Write>(&self, dir: &Path, out: &mut W) -> CoreResult<()> {
        tracing::debug!(mode = ?self.mode, "listing {}", dir.display());
        let mut paths = self.enumerate(dir, out)?;

        match self.mode {
            RenderMode::Compact => {
                self.formatter.sort_entries(&mut paths);
                self.render_compact(&paths, out)?;
            }
            RenderMode::Detailed => {
                self.formatter.filter_entries(&mut paths);
                self.render_detailed(&paths, out)?;
            }
        }

        tracing::debug!(entries = paths.len(), "done with {}", dir.display());
        Ok(())
    }

    /// Full pass over the directory handle. The handle is dropped on return.
    /// Entries the iterator itself fails on are reported and skipped.
    fn enumerate<W: Write>(&self, dir: &Path, out: &mut W) -> CoreResult<Vec<PathBuf>> {
        let read = fs::read_dir(dir).map_err(|e| CoreError::for_target(dir, e))?;

        let mut paths = Vec::new();
        for entry in read {
            match entry {
                Ok(e) => paths.push(e.path()),
                Err(e) => {
                    tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                    writeln!(out, "{}", e)?;
                }
            }
        }
        Ok(paths)
    }

    fn render_compact<W: Write>(&self, paths: &[PathBuf], out: &mut W) -> CoreResult<()> {
        let sep = separator_for(paths.len()).as_str();
        for path in paths {
            let name = path.file_name().unwrap_or_default();
            out.write_all(name.as_bytes())?;
            out.write_all(sep.as_bytes())?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn render_detailed<W: Write>(&self, paths: &[PathBuf], out: &mut W) -> CoreResult<()> {
        for path in paths {
            match resolve_entry(path, self.accounts) {
                Ok(entry) => {
                    let line = self.formatter.detail_line(&entry, &self.now)?;
                    out.write_all(&line)?;
                    writeln!(out)?;
                }
                Err(err) => {
                    tracing::warn!("cannot stat {}: {}", path.display(), err);
                    writeln!(out, "{}", err)?;
                    out.write_all(err.name().as_bytes())?;
                    writeln!(out)?;
                }
            }
        }
        writeln!(out)?;
        Ok(())
    }
}
