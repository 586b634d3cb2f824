//! Filtering, sorting, and display formatting for directory entries in lister.
//!
//! The [Formatter] struct holds the per-invocation display rules (hidden entries,
//! sorting, colors, id fallback, size units) and assembles detailed lines.
//!
//! Also provides the standalone renderers used by those lines: the permission
//! string ([format_attributes]), the recency-aware modification time
//! ([format_file_time]) and the size column ([format_file_size]).

use crate::core::color::ColorClass;
use crate::core::fm::{DirectoryEntry, FileKind, Mode, is_hidden};
use crate::error::{CoreError, CoreResult};

use chrono::{DateTime, Duration, Local, TimeZone};
use humansize::{DECIMAL, format_size};

use std::fmt::Display;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

/// Half of an average Gregorian year (365.2425 days) in seconds.
/// Modification times newer than `now - RECENT_WINDOW_SECS` show the time of
/// day, older ones show the year.
pub const RECENT_WINDOW_SECS: i64 = 31_556_952 / 2;

// rwx flags in display order, owner first
const PERMISSION_BITS: [(u32, char); 9] = [
    (0o400, 'r'),
    (0o200, 'w'),
    (0o100, 'x'),
    (0o040, 'r'),
    (0o020, 'w'),
    (0o010, 'x'),
    (0o004, 'r'),
    (0o002, 'w'),
    (0o001, 'x'),
];

/// Formatter struct to handle filtering, sorting and formatting of entries
/// based on user preferences.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    show_hidden: bool,
    sort: bool,
    colors: bool,
    numeric_ids: bool,
    human_sizes: bool,
}

impl Formatter {
    pub fn new(
        show_hidden: bool,
        sort: bool,
        colors: bool,
        numeric_ids: bool,
        human_sizes: bool,
    ) -> Self {
        Self {
            show_hidden,
            sort,
            colors,
            numeric_ids,
            human_sizes,
        }
    }

    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn colors(&self) -> bool {
        self.colors
    }

    /// Sorts the given paths by file name when sorting is enabled.
    /// Otherwise the enumeration order is left untouched.
    pub fn sort_entries(&self, paths: &mut [PathBuf]) {
        if self.sort {
            paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }
    }

    /// Drops hidden entries (unless they are shown) and then sorts.
    pub fn filter_entries(&self, paths: &mut Vec<PathBuf>) {
        if !self.show_hidden {
            paths.retain(|p| !is_hidden(p.file_name().unwrap_or_default()));
        }
        self.sort_entries(paths);
    }

    /// Builds one detailed line for `entry`, without the trailing newline.
    ///
    /// Columns: mode string, link count, owner, group, size, time, name and
    /// for symlinks `-> target`. Names and link targets are copied as raw
    /// bytes, so the line is not necessarily valid UTF-8.
    pub fn detail_line(
        &self,
        entry: &DirectoryEntry,
        now: &DateTime<Local>,
    ) -> CoreResult<Vec<u8>> {
        let mut line: Vec<u8> = Vec::with_capacity(80);

        let attributes = format_attributes(entry.kind(), entry.mode())?;
        write!(line, "{} {:>5} ", attributes, entry.nlink())?;

        if let Some(owner) = self.id_column(entry.owner(), entry.uid()) {
            write!(line, "{:<5} ", owner)?;
        }
        if let Some(group) = self.id_column(entry.group(), entry.gid()) {
            write!(line, "{:<5} ", group)?;
        }

        let modified: DateTime<Local> = DateTime::from(entry.modified());
        write!(
            line,
            "{:>7} {:<12} ",
            format_file_size(entry.size(), self.human_sizes),
            format_file_time(&modified, now)
        )?;

        let class = ColorClass::classify(entry.kind(), entry.mode());
        class.paint(&mut line, entry.name().as_bytes(), self.colors)?;

        if let Some(link) = entry.link() {
            let target = link
                .path()
                .map(|p| p.as_os_str().as_bytes())
                .unwrap_or(b"?".as_slice());
            let class = ColorClass::classify(link.kind(), link.mode());
            line.extend_from_slice(b" -> ");
            class.paint(&mut line, target, self.colors)?;
        }

        Ok(line)
    }

    /// Owner/group column text. Unresolved names are omitted unless numeric
    /// fallback is enabled.
    fn id_column(&self, name: Option<&str>, id: u32) -> Option<String> {
        match name {
            Some(n) => Some(n.to_string()),
            None if self.numeric_ids => Some(id.to_string()),
            None => None,
        }
    }
}

/// Maps a kind onto the leading character of the mode string.
///
/// # Errors
/// [CoreError::LostEntry] for [FileKind::NotFound]: such an entry must never
/// reach rendering.
pub fn kind_char(kind: FileKind) -> CoreResult<char> {
    match kind {
        FileKind::Directory => Ok('d'),
        FileKind::Fifo => Ok('p'),
        FileKind::BlockDevice => Ok('b'),
        FileKind::Socket => Ok('s'),
        FileKind::Symlink => Ok('l'),
        FileKind::CharDevice => Ok('c'),
        FileKind::Regular | FileKind::Unknown => Ok('-'),
        FileKind::NotFound => Err(CoreError::LostEntry(
            "not-found kind reached the permission renderer".into(),
        )),
    }
}

/// Formats the kind and permission bits in a unix-like format.
///
/// # Returns
/// A 10 character string like `drwxr-xr-x`.
pub fn format_attributes(kind: FileKind, mode: Mode) -> CoreResult<String> {
    let mut chars = [kind_char(kind)?, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    for (i, &(bit, letter)) in PERMISSION_BITS.iter().enumerate() {
        if mode.has(bit) {
            chars[i + 1] = letter;
        }
    }
    Ok(chars.iter().collect())
}

/// Formats the modification time relative to `now`.
///
/// Recent times (strictly newer than `now - RECENT_WINDOW_SECS`) render as
/// `Mon dd HH:MM`, everything else as `Mon dd YYYY`. The day is space padded.
pub fn format_file_time<Tz: TimeZone>(modified: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let cutoff = now.clone() - Duration::seconds(RECENT_WINDOW_SECS);
    if *modified > cutoff {
        modified.format("%b %e %H:%M").to_string()
    } else {
        modified.format("%b %e %Y").to_string()
    }
}

/// Formats the size column: raw bytes, or decimal units when `human` is set.
pub fn format_file_size(size: u64, human: bool) -> String {
    if human {
        format_size(size, DECIMAL)
    } else {
        size.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fm::resolve_entry;
    use crate::core::fm::tests::FakeAccounts;

    use chrono::Utc;
    use std::ffi::OsStr;
    use std::fs;
    use std::os::unix::fs::{MetadataExt, PermissionsExt, symlink};
    use tempfile::tempdir;

    #[test]
    fn attributes_cover_every_permission_combination() -> Result<(), Box<dyn std::error::Error>>
    {
        let letters = ['r', 'w', 'x'];
        for bits in 0u32..0o1000 {
            let out = format_attributes(FileKind::Regular, Mode::from_bits(bits))?;
            assert_eq!(out.chars().count(), 10, "bad length for {:o}", bits);

            for (i, c) in out.chars().skip(1).enumerate() {
                let set = bits & (0o400 >> i) != 0;
                let expected = if set { letters[i % 3] } else { '-' };
                assert_eq!(c, expected, "position {} for {:o}", i, bits);
            }
        }
        Ok(())
    }

    #[test]
    fn attributes_kind_chars() -> Result<(), Box<dyn std::error::Error>> {
        let cases = [
            (FileKind::Directory, 'd'),
            (FileKind::Fifo, 'p'),
            (FileKind::BlockDevice, 'b'),
            (FileKind::Socket, 's'),
            (FileKind::Symlink, 'l'),
            (FileKind::CharDevice, 'c'),
            (FileKind::Regular, '-'),
            (FileKind::Unknown, '-'),
        ];
        for (kind, expected) in cases {
            assert_eq!(kind_char(kind)?, expected);
        }
        assert_eq!(
            format_attributes(FileKind::Directory, Mode::from_bits(0o755))?,
            "drwxr-xr-x"
        );
        assert_eq!(
            format_attributes(FileKind::Regular, Mode::from_bits(0o644))?,
            "-rw-r--r--"
        );
        Ok(())
    }

    #[test]
    fn not_found_kind_is_an_error() {
        let res = format_attributes(FileKind::NotFound, Mode::from_bits(0o644));
        assert!(matches!(res, Err(CoreError::LostEntry(_))));
    }

    #[test]
    fn time_recency_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();

        let just_inside = now - Duration::seconds(RECENT_WINDOW_SECS - 1);
        let at_cutoff = now - Duration::seconds(RECENT_WINDOW_SECS);

        // 2024-07-15 12:00 minus 15_778_475s = 2024-01-14 21:05:25
        assert_eq!(format_file_time(&just_inside, &now), "Jan 14 21:05");
        assert_eq!(format_file_time(&at_cutoff, &now), "Jan 14 2024");
    }

    #[test]
    fn time_recency_uses_sub_second_precision() {
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        let cutoff = now - Duration::seconds(RECENT_WINDOW_SECS);

        let after = cutoff + Duration::milliseconds(500);
        let before = cutoff - Duration::milliseconds(500);

        assert_eq!(format_file_time(&after, &now), "Jan 14 21:05");
        assert_eq!(format_file_time(&before, &now), "Jan 14 2024");
    }

    #[test]
    fn time_day_is_space_padded() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap();
        let recent = Utc.with_ymd_and_hms(2024, 3, 5, 8, 7, 0).unwrap();
        let old = Utc.with_ymd_and_hms(2019, 11, 2, 8, 7, 0).unwrap();

        assert_eq!(format_file_time(&recent, &now), "Mar  5 08:07");
        assert_eq!(format_file_time(&old, &now), "Nov  2 2019");
    }

    #[test]
    fn size_column() {
        assert_eq!(format_file_size(120, false), "120");
        assert_eq!(format_file_size(1500, true), "1.50 kB");
    }

    #[test]
    fn filter_drops_hidden_and_keeps_order() {
        let mut paths = vec![
            PathBuf::from("/d/zeta"),
            PathBuf::from("/d/.hidden"),
            PathBuf::from("/d/alpha"),
        ];
        Formatter::default().filter_entries(&mut paths);
        assert_eq!(paths, vec![PathBuf::from("/d/zeta"), PathBuf::from("/d/alpha")]);

        let mut paths = vec![PathBuf::from("/d/zeta"), PathBuf::from("/d/.hidden")];
        Formatter::new(true, true, false, false, false).filter_entries(&mut paths);
        assert_eq!(paths, vec![PathBuf::from("/d/.hidden"), PathBuf::from("/d/zeta")]);
    }

    #[test]
    fn detail_line_columns() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("readme.txt");
        fs::write(&path, vec![b'a'; 120])?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))?;

        let meta = fs::symlink_metadata(&path)?;
        let mut accounts = FakeAccounts::default();
        accounts.users.insert(meta.uid(), "bob".into());

        let entry = resolve_entry(&path, &accounts)?;
        let now = Local::now();
        let line = String::from_utf8(Formatter::default().detail_line(&entry, &now)?)?;

        let modified: DateTime<Local> = DateTime::from(entry.modified());
        let expected = format!(
            "-rw-r--r--     1 bob       120 {:<12} readme.txt",
            format_file_time(&modified, &now)
        );
        assert_eq!(line, expected);
        Ok(())
    }

    #[test]
    fn detail_line_numeric_fallback() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("f");
        fs::write(&path, "")?;

        let entry = resolve_entry(&path, &FakeAccounts::default())?;
        let now = Local::now();
        let line = Formatter::new(false, false, false, true, false).detail_line(&entry, &now)?;
        let line = String::from_utf8(line)?;
        let uid = entry.uid().to_string();
        assert!(line.contains(&format!(" {:<5} ", uid)), "{}", line);
        Ok(())
    }

    #[test]
    fn detail_line_dangling_symlink() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let link = dir.path().join("broken");
        symlink("missing-target", &link)?;

        let entry = resolve_entry(&link, &FakeAccounts::default())?;
        let line =
            Formatter::new(false, false, true, false, false).detail_line(&entry, &Local::now())?;
        let line = String::from_utf8(line)?;

        assert!(line.starts_with('l'));
        assert_eq!(line.chars().take(10).count(), 10);
        let (_, target) = line.split_once(" -> ").ok_or("missing arrow")?;
        assert_eq!(target, "missing-target");
        Ok(())
    }

    #[test]
    fn detail_line_keeps_raw_name_and_target_bytes() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let link = dir.path().join(OsStr::from_bytes(b"l\xfen"));
        symlink(OsStr::from_bytes(b"t\xffx"), &link)?;

        let entry = resolve_entry(&link, &FakeAccounts::default())?;
        let line = Formatter::default().detail_line(&entry, &Local::now())?;

        assert!(line.ends_with(b" l\xfen -> t\xffx"), "{:?}", line);
        assert!(String::from_utf8(line).is_err());
        Ok(())
    }
}
