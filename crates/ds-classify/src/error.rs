//! Error types for the ds-classify crate.
//!
//! Classification itself never fails; the only fallible operation is loading
//! a MIME table from disk.

use camino::Utf8PathBuf;

/// Errors that can occur while loading a [`MimeTable`](crate::MimeTable).
///
/// # Examples
///
/// ```
/// use ds_classify::{MimeError, MimeTable};
/// use camino::Utf8Path;
///
/// let err = MimeTable::load(Utf8Path::new("/nonexistent/mime.types")).unwrap_err();
/// assert!(matches!(err, MimeError::Read { .. }));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MimeError {
    /// The MIME table file could not be read.
    #[error("failed to read MIME table {path}: {source}")]
    Read {
        /// The path of the table that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
