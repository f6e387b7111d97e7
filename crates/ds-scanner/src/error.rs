//! Error types for the ds-scanner crate.
//!
//! [`ScanError`] covers everything that aborts a walk. [`GitError`] covers the
//! `.git` lookup, which never aborts a walk; the walker drops it and records
//! no git info.

use camino::Utf8PathBuf;
use ds_core::ConfigError;

/// Errors that abort a scan.
///
/// # Error Recovery Strategy
///
/// Every variant is fatal. Per-file problems during classification (a file
/// that cannot be read) are not errors; the file is classified from its name
/// and counted as unreadable in the statistics.
///
/// # Examples
///
/// ```
/// use ds_scanner::ScanError;
///
/// fn describe(err: &ScanError) -> String {
///     match err {
///         ScanError::NotADirectory(path) => format!("bad root: {path}"),
///         ScanError::Walk(e) => format!("walk failed: {e}"),
///         ScanError::Metadata { path, .. } => format!("no metadata: {path}"),
///         ScanError::Config(e) => format!("config: {e}"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The walk root does not exist or is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(Utf8PathBuf),

    /// The underlying traversal failed.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Metadata for a visited path could not be read.
    #[error("failed to read metadata for {path}: {source}")]
    Metadata {
        /// The relative path that was being visited.
        path: Utf8PathBuf,
        /// The underlying walk error.
        #[source]
        source: ignore::Error,
    },

    /// The scan configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ScanError {
    /// Creates a new [`ScanError::Metadata`] error.
    #[inline]
    pub fn metadata(path: impl Into<Utf8PathBuf>, source: ignore::Error) -> Self {
        Self::Metadata {
            path: path.into(),
            source,
        }
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::NotADirectory(path) | Self::Metadata { path, .. } => Some(path),
            Self::Walk(_) | Self::Config(_) => None,
        }
    }
}

/// Errors from reading a `.git` directory.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The path is not a directory.
    #[error("not a .git directory: {0}")]
    NotADirectory(Utf8PathBuf),

    /// `config` inside the `.git` directory could not be read.
    #[error("could not read {path}: {source}")]
    ReadConfig {
        /// Path of the config file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config has no `url = ...` line.
    #[error("no remote url in {0}")]
    NoRemoteUrl(Utf8PathBuf),
}
