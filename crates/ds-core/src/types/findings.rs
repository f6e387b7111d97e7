//! The aggregated result of one directory walk.
//!
//! [`Findings`] is filled by the walker's workers and handed to the caller
//! once the walk has finished. Every recorded path ends up in exactly one of
//! the regular or ignored lists; the metadata map holds one entry per
//! recorded path.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use super::metadata::FileMetadata;
use crate::FxHashMap;

/// Source-control information discovered in a `.git` directory.
///
/// # Examples
///
/// ```
/// use ds_core::GitInfo;
///
/// let git = GitInfo::new("https://github.com/acme/widgets");
/// assert_eq!(git.url, "https://github.com/acme/widgets");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitInfo {
    /// Remote URL, rewritten to HTTPS form when it was an SSH shorthand.
    pub url: String,
}

impl GitInfo {
    /// Creates git info for the given remote URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Regular files, ignored files, per-path metadata and optional git info.
///
/// Paths are relative to the walk root.
///
/// # Examples
///
/// ```
/// use ds_core::{FileMetadata, Findings};
/// use camino::{Utf8Path, Utf8PathBuf};
///
/// let mut findings = Findings::new();
/// findings.record_regular(Utf8PathBuf::from("a.py"), FileMetadata::file(10));
/// findings.record_ignored(Utf8PathBuf::from("vendor"), FileMetadata::directory());
///
/// assert_eq!(findings.regular_files().len(), 1);
/// assert_eq!(findings.ignored_files().len(), 1);
/// assert_eq!(findings.metadata(Utf8Path::new("a.py")).map(|m| m.size), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    regular_files: Vec<Utf8PathBuf>,
    ignored_files: Vec<Utf8PathBuf>,
    info: FxHashMap<Utf8PathBuf, FileMetadata>,
    git: Option<GitInfo>,
}

impl Findings {
    /// Creates an empty set of findings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a candidate regular file.
    pub fn record_regular(&mut self, path: Utf8PathBuf, meta: FileMetadata) {
        self.info.insert(path.clone(), meta);
        self.regular_files.push(path);
    }

    /// Records an ignored path.
    pub fn record_ignored(&mut self, path: Utf8PathBuf, meta: FileMetadata) {
        self.info.insert(path.clone(), meta);
        self.ignored_files.push(path);
    }

    /// Stores git info unless some is already present.
    ///
    /// Returns `true` if `git` was stored.
    pub fn set_git(&mut self, git: GitInfo) -> bool {
        if self.git.is_some() {
            return false;
        }
        self.git = Some(git);
        true
    }

    /// Moves everything from `other` into `self`.
    ///
    /// Git info from `other` is only taken when `self` has none.
    pub fn absorb(&mut self, other: Self) {
        self.regular_files.extend(other.regular_files);
        self.ignored_files.extend(other.ignored_files);
        self.info.extend(other.info);
        if let Some(git) = other.git {
            self.set_git(git);
        }
    }

    /// Moves every regular file for which `is_ignored` returns `true` to the
    /// ignored list. Returns the number of files moved.
    ///
    /// The relative order of the remaining regular files is not preserved.
    pub fn reclassify_as_ignored<F>(&mut self, mut is_ignored: F) -> usize
    where
        F: FnMut(&Utf8Path) -> bool,
    {
        let mut moved = 0;
        let mut index = 0;
        while index < self.regular_files.len() {
            if is_ignored(&self.regular_files[index]) {
                let path = self.regular_files.swap_remove(index);
                self.ignored_files.push(path);
                moved += 1;
            } else {
                index += 1;
            }
        }
        moved
    }

    /// Sorts both path lists, for stable presentation.
    pub fn sort(&mut self) {
        self.regular_files.sort_unstable();
        self.ignored_files.sort_unstable();
    }

    /// Regular files, in no particular order.
    #[inline]
    #[must_use]
    pub fn regular_files(&self) -> &[Utf8PathBuf] {
        &self.regular_files
    }

    /// Ignored paths, in no particular order.
    #[inline]
    #[must_use]
    pub fn ignored_files(&self) -> &[Utf8PathBuf] {
        &self.ignored_files
    }

    /// Metadata captured for `path`, if it was recorded.
    #[inline]
    #[must_use]
    pub fn metadata(&self, path: &Utf8Path) -> Option<&FileMetadata> {
        self.info.get(path)
    }

    /// All captured metadata, keyed by path.
    #[inline]
    #[must_use]
    pub const fn info(&self) -> &FxHashMap<Utf8PathBuf, FileMetadata> {
        &self.info
    }

    /// Git info, if a `.git` directory with a remote URL was found.
    #[inline]
    #[must_use]
    pub const fn git(&self) -> Option<&GitInfo> {
        self.git.as_ref()
    }

    /// Total number of recorded paths.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.regular_files.len() + self.ignored_files.len()
    }

    /// Returns `true` if nothing was recorded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
