//! Per-entry metadata resolution for lister.
//!
//! Provides the [DirectoryEntry] struct built fresh for every enumerated name,
//! the [FileKind] and [Mode] types the renderers work from, and the
//! [AccountLookup] capability used to turn numeric owner/group IDs into names.

use crate::error::EntryError;

use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use users::{Groups, Users, UsersCache};

/// Structural category of an entry, independent of its permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    Fifo,
    BlockDevice,
    CharDevice,
    Socket,
    Unknown,
    /// The entry vanished between enumeration and stat.
    NotFound,
}

impl From<fs::FileType> for FileKind {
    fn from(ft: fs::FileType) -> Self {
        if ft.is_symlink() {
            FileKind::Symlink
        } else if ft.is_dir() {
            FileKind::Directory
        } else if ft.is_file() {
            FileKind::Regular
        } else if ft.is_fifo() {
            FileKind::Fifo
        } else if ft.is_block_device() {
            FileKind::BlockDevice
        } else if ft.is_char_device() {
            FileKind::CharDevice
        } else if ft.is_socket() {
            FileKind::Socket
        } else {
            FileKind::Unknown
        }
    }
}

/// Permission bits of an entry as reported by `st_mode`.
///
/// Only the low twelve bits are kept: the nine rwx flags plus
/// setuid/setgid/sticky.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mode(u32);

impl Mode {
    const MASK: u32 = 0o7777;
    const EXEC_BITS: u32 = 0o111;

    pub const fn from_bits(bits: u32) -> Self {
        Mode(bits & Self::MASK)
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether `bit` (eg. `0o400` for owner read) is set.
    #[inline]
    pub fn has(self, bit: u32) -> bool {
        self.0 & bit != 0
    }

    /// True when any of owner/group/other may execute.
    #[inline]
    pub fn is_executable(self) -> bool {
        self.has(Self::EXEC_BITS)
    }
}

impl From<&Metadata> for Mode {
    fn from(meta: &Metadata) -> Self {
        Mode::from_bits(meta.mode())
    }
}

/// Where a symbolic link points and what lives there.
///
/// `path` is `None` only when the link itself could not be read.
/// `kind` is [FileKind::NotFound] for dangling links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    path: Option<PathBuf>,
    kind: FileKind,
    mode: Mode,
}

impl LinkTarget {
    pub fn new(path: Option<PathBuf>, kind: FileKind, mode: Mode) -> Self {
        Self { path, kind, mode }
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// A single resolved directory entry.
///
/// Holds the entry's own (non-dereferenced) attributes. For symlinks the
/// dereferenced target is kept separately in [LinkTarget].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    path: PathBuf,
    name: OsString,
    kind: FileKind,
    mode: Mode,
    nlink: u64,
    uid: u32,
    gid: u32,
    owner: Option<String>,
    group: Option<String>,
    size: u64,
    modified: SystemTime,
    link: Option<LinkTarget>,
}

impl DirectoryEntry {
    // Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn nlink(&self) -> u64 {
        self.nlink
    }

    #[inline]
    pub fn uid(&self) -> u32 {
        self.uid
    }

    #[inline]
    pub fn gid(&self) -> u32 {
        self.gid
    }

    #[inline]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[inline]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.kind == FileKind::Symlink
    }

    #[inline]
    pub fn link(&self) -> Option<&LinkTarget> {
        self.link.as_ref()
    }
}

/// Best-effort mapping from numeric IDs to account names.
pub trait AccountLookup {
    fn user_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;
}

/// [AccountLookup] backed by the system user and group databases.
///
/// Lookups are cached for the lifetime of the value, so one instance should be
/// shared across all targets of an invocation.
pub struct SystemAccounts {
    cache: UsersCache,
}

impl SystemAccounts {
    pub fn new() -> Self {
        Self {
            cache: UsersCache::new(),
        }
    }
}

impl Default for SystemAccounts {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountLookup for SystemAccounts {
    fn user_name(&self, uid: u32) -> Option<String> {
        self.cache
            .get_user_by_uid(uid)
            .map(|u| u.name().to_string_lossy().into_owned())
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        self.cache
            .get_group_by_gid(gid)
            .map(|g| g.name().to_string_lossy().into_owned())
    }
}

/// Names starting with `.` are hidden.
#[inline]
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_bytes().first() == Some(&b'.')
}

/// Reads the attributes of `path` without following a final symlink.
///
/// Symlinks additionally get their target read and dereferenced; failures
/// there only degrade the [LinkTarget], never the entry.
///
/// # Returns
/// The resolved entry, or an [EntryError] holding the bare name when the
/// entry's own status cannot be read.
pub fn resolve_entry(
    path: &Path,
    accounts: &dyn AccountLookup,
) -> Result<DirectoryEntry, EntryError> {
    let name = path
        .file_name()
        .unwrap_or(path.as_os_str())
        .to_os_string();

    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => return Err(EntryError::new(name, e)),
    };
    let modified = match meta.modified() {
        Ok(t) => t,
        Err(e) => return Err(EntryError::new(name, e)),
    };

    let kind = FileKind::from(meta.file_type());
    let link = (kind == FileKind::Symlink).then(|| resolve_link(path));

    let uid = meta.uid();
    let gid = meta.gid();
    let owner = accounts.user_name(uid);
    let group = accounts.group_name(gid);
    if owner.is_none() || group.is_none() {
        tracing::debug!(uid, gid, "no account name for {}", path.display());
    }

    Ok(DirectoryEntry {
        path: path.to_path_buf(),
        name,
        kind,
        mode: Mode::from(&meta),
        nlink: meta.nlink(),
        uid,
        gid,
        owner,
        group,
        size: meta.size(),
        modified,
        link,
    })
}

fn resolve_link(path: &Path) -> LinkTarget {
    let target = match fs::read_link(path) {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::warn!("cannot read link {}: {}", path.display(), e);
            None
        }
    };

    match fs::metadata(path) {
        Ok(meta) => LinkTarget::new(target, FileKind::from(meta.file_type()), Mode::from(&meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("dangling link {}", path.display());
            LinkTarget::new(target, FileKind::NotFound, Mode::default())
        }
        Err(e) => {
            tracing::debug!("cannot follow link {}: {}", path.display(), e);
            LinkTarget::new(target, FileKind::Unknown, Mode::default())
        }
    }
}
