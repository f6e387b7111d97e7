//! Per-file classification results.

use serde::{Deserialize, Serialize};

use super::mode::Mode;

/// A color tag the presentation layer may use when rendering a file.
///
/// The core never renders colors itself; these are hints only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum DisplayHint {
    Magenta,
    LightCyan,
    Red,
    LightRed,
    Cyan,
    Yellow,
    Green,
    LightGreen,
    Gray,
    White,
}

impl DisplayHint {
    /// Returns the lowercase color name, as used by terminal markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Magenta => "magenta",
            Self::LightCyan => "lightcyan",
            Self::Red => "red",
            Self::LightRed => "lightred",
            Self::Cyan => "cyan",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::LightGreen => "lightgreen",
            Self::Gray => "gray",
            Self::White => "white",
        }
    }
}

/// What the classifier concluded about a single file.
///
/// `line_count` is `None` when lines were not counted: the file is binary,
/// is a directory, or its content was not available.
///
/// # Examples
///
/// ```
/// use ds_core::{ClassificationResult, Mode};
///
/// let dir = ClassificationResult::directory();
/// assert_eq!(dir.description, "Directory");
/// assert_eq!(dir.mode, Mode::Blank);
/// assert!(dir.line_count.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The content-type label.
    pub mode: Mode,
    /// Whether the content looked binary.
    pub is_binary: bool,
    /// Number of `\n` bytes, when counted.
    pub line_count: Option<usize>,
    /// Human-readable description ("Rust", "Binary", "Empty", "Png", ...).
    pub description: String,
    /// Hint for rendering the description.
    pub type_hint: DisplayHint,
    /// Hint for rendering the file name.
    pub name_hint: DisplayHint,
}

impl ClassificationResult {
    /// The fixed result for directories.
    #[must_use]
    pub fn directory() -> Self {
        Self {
            mode: Mode::Blank,
            is_binary: false,
            line_count: None,
            description: "Directory".to_owned(),
            type_hint: DisplayHint::Magenta,
            name_hint: DisplayHint::LightCyan,
        }
    }

    /// Returns `true` if this result describes a directory.
    #[inline]
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.description == "Directory" && self.mode.is_blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_result() {
        let result = ClassificationResult::directory();
        assert!(result.is_directory());
        assert!(!result.is_binary);
        assert_eq!(result.type_hint, DisplayHint::Magenta);
        assert_eq!(result.name_hint, DisplayHint::LightCyan);
    }

    #[test]
    fn test_display_hint_names() {
        assert_eq!(DisplayHint::LightGreen.as_str(), "lightgreen");
        assert_eq!(DisplayHint::Gray.as_str(), "gray");
    }

    #[test]
    fn test_classification_serialization() {
        let result = ClassificationResult::directory();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""line_count":null"#));
        assert!(json.contains(r#""type_hint":"magenta""#));
    }
}
