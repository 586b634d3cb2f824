//! Name colorization by file kind.
//!
//! Each name is classified into a [ColorClass] from its kind and permission
//! bits, and the class maps to a fixed terminal color. First matching rule wins:
//! symlink, directory, executable, otherwise plain.

use crate::core::fm::{FileKind, Mode};

use crossterm::queue;
use crossterm::style::{Color, ResetColor, SetForegroundColor};

use std::io::{self, Write};

/// Display decoration category of a name. Derived per render, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Symlink,
    Directory,
    Executable,
    Plain,
    /// The kind could not be determined (eg. a dangling link target).
    Unknown,
}

impl ColorClass {
    pub fn classify(kind: FileKind, mode: Mode) -> Self {
        match kind {
            FileKind::Symlink => ColorClass::Symlink,
            FileKind::Directory => ColorClass::Directory,
            FileKind::NotFound => ColorClass::Unknown,
            _ if mode.is_executable() => ColorClass::Executable,
            _ => ColorClass::Plain,
        }
    }

    /// Foreground color for the class, `None` when the name stays undecorated.
    pub fn color(self) -> Option<Color> {
        match self {
            ColorClass::Symlink => Some(Color::DarkCyan),
            ColorClass::Directory => Some(Color::DarkBlue),
            ColorClass::Executable => Some(Color::DarkGreen),
            ColorClass::Plain | ColorClass::Unknown => None,
        }
    }

    /// Writes the raw `name` bytes wrapped in the class color. With `enabled`
    /// false, or for classes without a color, the bytes are written as is.
    pub fn paint<W: Write>(self, out: &mut W, name: &[u8], enabled: bool) -> io::Result<()> {
        match self.color() {
            Some(color) if enabled => {
                queue!(out, SetForegroundColor(color))?;
                out.write_all(name)?;
                queue!(out, ResetColor)
            }
            _ => out.write_all(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(class: ColorClass, name: &[u8], enabled: bool) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        class.paint(&mut out, name, enabled)?;
        Ok(out)
    }

    #[test]
    fn precedence_directory_before_executable() {
        let class = ColorClass::classify(FileKind::Directory, Mode::from_bits(0o755));
        assert_eq!(class, ColorClass::Directory);
        assert_eq!(class.color(), Some(Color::DarkBlue));
    }

    #[test]
    fn precedence_symlink_first() {
        let class = ColorClass::classify(FileKind::Symlink, Mode::from_bits(0o777));
        assert_eq!(class, ColorClass::Symlink);
    }

    #[test]
    fn executable_any_bit() {
        for bits in [0o100, 0o010, 0o001] {
            assert_eq!(
                ColorClass::classify(FileKind::Regular, Mode::from_bits(bits)),
                ColorClass::Executable
            );
        }
        assert_eq!(
            ColorClass::classify(FileKind::Regular, Mode::from_bits(0o644)),
            ColorClass::Plain
        );
    }

    #[test]
    fn not_found_is_unknown_and_uncolored() -> io::Result<()> {
        let class = ColorClass::classify(FileKind::NotFound, Mode::from_bits(0o755));
        assert_eq!(class, ColorClass::Unknown);
        assert_eq!(painted(class, b"gone", true)?, b"gone");
        Ok(())
    }

    #[test]
    fn paint_wraps_only_when_enabled() -> io::Result<()> {
        let out = painted(ColorClass::Directory, b"sub dir", true)?;
        assert!(out.starts_with(b"\x1b["));
        assert!(out.ends_with(b"sub dir\x1b[0m"));

        assert_eq!(painted(ColorClass::Directory, b"sub dir", false)?, b"sub dir");
        assert_eq!(painted(ColorClass::Plain, b"notes", true)?, b"notes");
        Ok(())
    }

    #[test]
    fn paint_keeps_non_utf8_bytes() -> io::Result<()> {
        let out = painted(ColorClass::Executable, b"a\xffb", true)?;
        assert!(out.windows(3).any(|w| w == b"a\xffb"));
        assert_eq!(painted(ColorClass::Executable, b"a\xffb", false)?, b"a\xffb");
        Ok(())
    }
}
