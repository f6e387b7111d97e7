//! Content-type labels.
//!
//! A [`Mode`] is the label a file receives from classification. The set is
//! closed: anything the classifier cannot place stays [`Mode::Blank`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// The content-type label of a file.
///
/// # Examples
///
/// ```
/// use ds_core::{Mode, ModeFamily};
///
/// assert_eq!(Mode::Cpp.name(), "C++");
/// assert_eq!(Mode::Markdown.family(), ModeFamily::Document);
/// assert!(Mode::Blank.is_blank());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum Mode {
    /// No label could be determined.
    #[default]
    Blank,
    Text,
    Markdown,
    ReStructured,
    Scdoc,
    AsciiDoc,
    /// Generic configuration file (`.conf`, `.cfg`, rc files).
    Config,
    Ini,
    Toml,
    Yaml,
    Json,
    Xml,
    Python,
    Go,
    Rust,
    C,
    Cpp,
    Zig,
    Java,
    Kotlin,
    CSharp,
    Swift,
    Haskell,
    OCaml,
    Lua,
    Php,
    Html,
    Css,
    JavaScript,
    TypeScript,
    Shell,
    Perl,
    Ruby,
    Prolog,
    /// Assembly of an undetermined dialect (GNU `as` syntax by default).
    Assembly,
    /// Plan 9 style assembly used by the Go toolchain.
    GoAssembly,
    /// Intel syntax assembly for NASM/YASM.
    Nasm,
    Make,
    CMake,
    Docker,
    Sql,
    Diff,
    /// Git metadata files (`.gitignore`, `.gitattributes`, commit messages).
    Git,
}

/// Broad grouping of modes, used to pick display hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeFamily {
    /// No label.
    Blank,
    /// Prose and markup documents.
    Document,
    /// Configuration formats.
    Config,
    /// Compiled and systems languages.
    Systems,
    /// Browser-facing languages.
    Web,
    /// Interpreted scripting languages.
    Scripting,
    /// Git metadata.
    Git,
    /// Everything else with a known label.
    Other,
}

impl Mode {
    /// Returns the human-readable name of this mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blank => "Blank",
            Self::Text => "Text",
            Self::Markdown => "Markdown",
            Self::ReStructured => "reStructuredText",
            Self::Scdoc => "scdoc",
            Self::AsciiDoc => "AsciiDoc",
            Self::Config => "Config",
            Self::Ini => "INI",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Python => "Python",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Zig => "Zig",
            Self::Java => "Java",
            Self::Kotlin => "Kotlin",
            Self::CSharp => "C#",
            Self::Swift => "Swift",
            Self::Haskell => "Haskell",
            Self::OCaml => "OCaml",
            Self::Lua => "Lua",
            Self::Php => "PHP",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Shell => "Shell",
            Self::Perl => "Perl",
            Self::Ruby => "Ruby",
            Self::Prolog => "Prolog",
            Self::Assembly => "Assembly",
            Self::GoAssembly => "Go Assembly",
            Self::Nasm => "NASM",
            Self::Make => "Make",
            Self::CMake => "CMake",
            Self::Docker => "Dockerfile",
            Self::Sql => "SQL",
            Self::Diff => "Diff",
            Self::Git => "Git",
        }
    }

    /// Returns the family this mode belongs to.
    #[must_use]
    pub const fn family(self) -> ModeFamily {
        match self {
            Self::Blank => ModeFamily::Blank,
            Self::Text | Self::Markdown | Self::ReStructured | Self::Scdoc | Self::AsciiDoc => {
                ModeFamily::Document
            }
            Self::Config | Self::Ini | Self::Toml | Self::Yaml | Self::Json => ModeFamily::Config,
            Self::Python | Self::Go | Self::Rust | Self::C | Self::Cpp => ModeFamily::Systems,
            Self::Html | Self::Css | Self::JavaScript => ModeFamily::Web,
            Self::Shell | Self::Perl | Self::Ruby => ModeFamily::Scripting,
            Self::Git => ModeFamily::Git,
            _ => ModeFamily::Other,
        }
    }

    /// Returns `true` for [`Mode::Blank`].
    #[inline]
    #[must_use]
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Returns `true` for any assembly dialect.
    #[inline]
    #[must_use]
    pub const fn is_assembly(self) -> bool {
        matches!(self, Self::Assembly | Self::GoAssembly | Self::Nasm)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
