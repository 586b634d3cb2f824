//! Separator policy for compact listings.
//!
//! No terminal width measurement and no grid: small directories print on one
//! running line, large ones one name per line.

/// Directories with more entries than this print one name per line.
pub const COMPACT_LINE_THRESHOLD: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// Two spaces, all names on one line.
    Inline,
    /// One name per line.
    Newline,
}

impl Separator {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Inline => "  ",
            Separator::Newline => "\n",
        }
    }
}

/// Picks the separator for a directory holding `count` entries.
pub fn separator_for(count: usize) -> Separator {
    if count > COMPACT_LINE_THRESHOLD {
        Separator::Newline
    } else {
        Separator::Inline
    }
}
