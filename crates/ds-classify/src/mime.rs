//! Extension to MIME type lookup.
//!
//! A [`MimeTable`] is built once by the caller and handed to the
//! [`Classifier`](crate::Classifier); there is no process-wide table.

use std::fs;

use camino::Utf8Path;
use ds_core::FxHashMap;

use crate::error::MimeError;
use crate::filename::extension_of;

const BUILTIN: &str = include_str!("../data/mime.types");

/// Maps lowercase file extensions to MIME types.
///
/// # Examples
///
/// ```
/// use ds_classify::MimeTable;
///
/// let table = MimeTable::parse("application/x-tar tar\nimage/png png apng\n");
/// assert_eq!(table.get("tar"), Some("application/x-tar"));
/// assert_eq!(table.get(".PNG"), Some("image/png"));
/// assert_eq!(table.get("gif"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MimeTable {
    by_extension: FxHashMap<String, String>,
}

impl MimeTable {
    /// A table with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table embedded in the binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self::parse(BUILTIN)
    }

    /// Parses `mime.types` text.
    ///
    /// Each line is either `type/subtype ext...` or `ext type/subtype`.
    /// Blank lines, `#` comments and lines that fit neither form are
    /// skipped. The first mapping seen for an extension wins.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut by_extension = FxHashMap::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(first), Some(second)) = (fields.next(), fields.next()) else {
                continue;
            };

            if first.contains('/') {
                for ext in std::iter::once(second).chain(fields) {
                    by_extension
                        .entry(normalize(ext))
                        .or_insert_with(|| first.to_owned());
                }
            } else if second.contains('/') {
                by_extension
                    .entry(normalize(first))
                    .or_insert_with(|| second.to_owned());
            }
        }

        Self { by_extension }
    }

    /// Reads and parses a `mime.types` file.
    ///
    /// # Errors
    ///
    /// Returns [`MimeError::Read`] if the file cannot be read.
    pub fn load(path: &Utf8Path) -> Result<Self, MimeError> {
        let text = fs::read_to_string(path).map_err(|source| MimeError::Read {
            path: path.to_owned(),
            source,
        })?;
        let table = Self::parse(&text);
        tracing::debug!(path = %path, entries = table.len(), "loaded MIME table");
        Ok(table)
    }

    /// Looks up an extension, with or without a leading dot, ignoring case.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&str> {
        self.by_extension
            .get(&normalize(extension))
            .map(String::as_str)
    }

    /// Describes `path` from its extension: the MIME subtype with any `x-`
    /// prefix removed and the first letter capitalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_classify::MimeTable;
    /// use camino::Utf8Path;
    ///
    /// let table = MimeTable::parse("application/x-tar tar\n");
    /// assert_eq!(table.describe(Utf8Path::new("backup.tar")).as_deref(), Some("Tar"));
    /// assert_eq!(table.describe(Utf8Path::new("backup")), None);
    /// ```
    #[must_use]
    pub fn describe(&self, path: &Utf8Path) -> Option<String> {
        let name = path.file_name()?.to_ascii_lowercase();
        let mime = self.get(extension_of(&name)?)?;
        describe_mime(mime)
    }

    /// Number of extensions in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

fn describe_mime(mime: &str) -> Option<String> {
    let subtype = mime.split_once('/').map_or(mime, |(_, sub)| sub);
    let subtype = subtype.strip_prefix("x-").unwrap_or(subtype);

    let mut chars = subtype.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
