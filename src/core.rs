//! Core listing engine for lister.
//!
//! This module contains everything between "here is a directory" and "here is text":
//! - [fm]: per-entry metadata resolution (see [resolve_entry], [DirectoryEntry], [FileKind]).
//! - [formatter]: permission strings, modification times, sizes and detailed lines.
//! - [color]: name colorization by file kind ([ColorClass]).
//! - [layout]: the separator policy for compact listings.
//! - [walker]: walks directories and writes the listing ([Lister]).
//!
//! Most callers only need [Lister], [Formatter], [RenderMode] and [SystemAccounts].

pub mod color;
pub mod fm;
pub mod formatter;
pub mod layout;
pub mod walker;

pub use color::ColorClass;
pub use fm::{
    AccountLookup, DirectoryEntry, FileKind, LinkTarget, Mode, SystemAccounts, is_hidden,
    resolve_entry,
};
pub use formatter::{
    Formatter, RECENT_WINDOW_SECS, format_attributes, format_file_size, format_file_time,
    kind_char,
};
pub use layout::{COMPACT_LINE_THRESHOLD, Separator, separator_for};
pub use walker::{ListSummary, Lister, RenderMode};
