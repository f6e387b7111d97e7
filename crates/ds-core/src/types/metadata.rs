//! Filesystem metadata captured while walking.

use std::fs;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Size, modification time and kind of a path, captured once at visit time.
///
/// The values are never refreshed, so they can go stale relative to the
/// real filesystem.
///
/// # Examples
///
/// ```
/// use ds_core::FileMetadata;
///
/// let meta = FileMetadata::file(42);
/// assert_eq!(meta.size, 42);
/// assert!(!meta.is_dir);
/// assert!(!meta.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, if the platform reports one.
    pub modified: Option<SystemTime>,
    /// Whether the path is a directory.
    pub is_dir: bool,
}

impl FileMetadata {
    /// Metadata for a regular file of `size` bytes with no known mtime.
    #[must_use]
    pub const fn file(size: u64) -> Self {
        Self {
            size,
            modified: None,
            is_dir: false,
        }
    }

    /// Metadata for a directory with no known mtime.
    #[must_use]
    pub const fn directory() -> Self {
        Self {
            size: 0,
            modified: None,
            is_dir: true,
        }
    }

    /// Returns `true` for zero-byte non-directories.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.is_dir && self.size == 0
    }
}

impl From<&fs::Metadata> for FileMetadata {
    fn from(meta: &fs::Metadata) -> Self {
        Self {
            size: meta.len(),
            modified: meta.modified().ok(),
            is_dir: meta.is_dir(),
        }
    }
}
