//! Mode to description and display hints.

use ds_core::{DisplayHint, Mode, ModeFamily};

/// Description used for files whose mode stayed [`Mode::Blank`].
pub const UNKNOWN: &str = "Unknown";

/// Returns `(description, type_hint, name_hint)` for a classified path.
///
/// Directories win over binaries, binaries win over the mode.
///
/// # Examples
///
/// ```
/// use ds_classify::describe;
/// use ds_core::{DisplayHint, Mode};
///
/// assert_eq!(
///     describe(Mode::Rust, false, false),
///     ("Rust", DisplayHint::Cyan, DisplayHint::LightGreen)
/// );
/// assert_eq!(describe(Mode::Rust, true, false).0, "Binary");
/// assert_eq!(describe(Mode::Blank, false, false).0, "Unknown");
/// ```
#[must_use]
pub const fn describe(
    mode: Mode,
    is_binary: bool,
    is_dir: bool,
) -> (&'static str, DisplayHint, DisplayHint) {
    if is_dir {
        return ("Directory", DisplayHint::Magenta, DisplayHint::LightCyan);
    }
    if is_binary {
        return ("Binary", DisplayHint::Red, DisplayHint::LightRed);
    }

    let name_hint = match mode.family() {
        ModeFamily::Blank => return (UNKNOWN, DisplayHint::Gray, DisplayHint::White),
        ModeFamily::Document => DisplayHint::Magenta,
        ModeFamily::Config | ModeFamily::Web => DisplayHint::Yellow,
        ModeFamily::Systems | ModeFamily::Other => DisplayHint::LightGreen,
        ModeFamily::Scripting => DisplayHint::LightRed,
        ModeFamily::Git => DisplayHint::Green,
    };
    (mode.name(), DisplayHint::Cyan, name_hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_beats_everything() {
        let (desc, ty, name) = describe(Mode::Rust, true, true);
        assert_eq!(desc, "Directory");
        assert_eq!((ty, name), (DisplayHint::Magenta, DisplayHint::LightCyan));
    }

    #[test]
    fn test_binary() {
        assert_eq!(
            describe(Mode::Blank, true, false),
            ("Binary", DisplayHint::Red, DisplayHint::LightRed)
        );
    }

    #[test]
    fn test_families() {
        assert_eq!(describe(Mode::Markdown, false, false).2, DisplayHint::Magenta);
        assert_eq!(describe(Mode::Yaml, false, false).2, DisplayHint::Yellow);
        assert_eq!(describe(Mode::Css, false, false).2, DisplayHint::Yellow);
        assert_eq!(describe(Mode::Go, false, false).2, DisplayHint::LightGreen);
        assert_eq!(describe(Mode::Shell, false, false).2, DisplayHint::LightRed);
        assert_eq!(describe(Mode::Git, false, false).2, DisplayHint::Green);
        assert_eq!(
            describe(Mode::Nasm, false, false),
            ("NASM", DisplayHint::Cyan, DisplayHint::LightGreen)
        );
    }

    #[test]
    fn test_blank_is_unknown() {
        assert_eq!(
            describe(Mode::Blank, false, false),
            (UNKNOWN, DisplayHint::Gray, DisplayHint::White)
        );
    }
}
