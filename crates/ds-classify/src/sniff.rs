//! Content sniffing detectors.
//!
//! A filename only gives a first guess. Some guesses are weak (`Blank`,
//! `Config`, `Prolog`, a `README` without `.md`) and are refined from the
//! first line of the content; `Assembly` is refined to a dialect from the
//! whole content. Each refinement step is a [`ModeDetector`] and the
//! [`DetectorChain`] runs them in a fixed order, first match wins, and
//! starts over whenever a match changed the mode.

use ds_core::Mode;

/// Maximum number of bytes of the first line that are inspected.
pub const FIRST_LINE_LIMIT: usize = 512;

/// Outcome of a single detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// The detector is confident the content has this mode.
    Matched(Mode),
    /// The detector has no opinion; try the next one.
    Defer,
}

/// The evidence a detector sees.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    /// Lowercased final path component.
    pub file_name: &'a str,
    /// The mode guessed so far.
    pub mode: Mode,
    /// First line of the content, without the line terminator, capped at
    /// [`FIRST_LINE_LIMIT`] bytes.
    pub first_line: &'a str,
    /// The full content that was supplied.
    pub content: &'a [u8],
}

impl<'a> Sample<'a> {
    /// Builds a sample from a lowercased file name, the current guess and
    /// the content.
    ///
    /// A first line that is not valid UTF-8 is cut at the last valid
    /// boundary.
    #[must_use]
    pub fn new(file_name: &'a str, mode: Mode, content: &'a [u8]) -> Self {
        Self {
            file_name,
            mode,
            first_line: first_line(content),
            content,
        }
    }
}

/// A single content-sniffing strategy.
pub trait ModeDetector: Send + Sync {
    /// Short name, used in trace output.
    fn name(&self) -> &'static str;

    /// Inspects the sample and either commits to a mode or defers.
    fn detect(&self, sample: &Sample<'_>) -> Detection;
}

/// Returns `true` if a filename-derived mode should be re-derived from the
/// first line of content.
///
/// # Examples
///
/// ```
/// use ds_classify::is_ambiguous;
/// use ds_core::Mode;
///
/// assert!(is_ambiguous(Mode::Blank, "script"));
/// assert!(is_ambiguous(Mode::Markdown, "readme"));
/// assert!(!is_ambiguous(Mode::Markdown, "readme.md"));
/// assert!(!is_ambiguous(Mode::Rust, "main.rs"));
/// ```
#[must_use]
pub fn is_ambiguous(mode: Mode, lowercase_name: &str) -> bool {
    match mode {
        Mode::Blank | Mode::Prolog | Mode::Config => true,
        Mode::Markdown => !lowercase_name.ends_with(".md"),
        _ => false,
    }
}

/// Refines ambiguous modes from the first line of content.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLineSniffer;

impl ModeDetector for FirstLineSniffer {
    fn name(&self) -> &'static str {
        "first-line"
    }

    fn detect(&self, sample: &Sample<'_>) -> Detection {
        if !is_ambiguous(sample.mode, sample.file_name) {
            return Detection::Defer;
        }
        let line = sample.first_line.trim();
        if line.is_empty() {
            return Detection::Defer;
        }

        let found = sniff_shebang(line)
            .or_else(|| sniff_markup(line))
            .or_else(|| sniff_emacs_mode_line(line))
            .or_else(|| sniff_directives(line, sample.mode));

        found.map_or(Detection::Defer, Detection::Matched)
    }
}

/// Picks an assembly dialect by scanning all lines of the content.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssemblyDialect;

impl ModeDetector for AssemblyDialect {
    fn name(&self) -> &'static str {
        "assembly-dialect"
    }

    fn detect(&self, sample: &Sample<'_>) -> Detection {
        if sample.mode != Mode::Assembly {
            return Detection::Defer;
        }

        let text = String::from_utf8_lossy(sample.content);
        for line in text.lines() {
            let line = line.trim_start();
            if line.starts_with("TEXT ") && line.contains("(SB)") {
                return Detection::Matched(Mode::GoAssembly);
            }
            let lower = line.to_ascii_lowercase();
            if NASM_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
                return Detection::Matched(Mode::Nasm);
            }
        }
        Detection::Defer
    }
}

const NASM_PREFIXES: &[&str] = &["section .", "global ", "bits ", "%define", "%include"];

/// An ordered list of detectors.
pub struct DetectorChain {
    detectors: Vec<Box<dyn ModeDetector>>,
}

impl DetectorChain {
    /// The chain used by the default classifier: first-line sniffing, then
    /// assembly dialects.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            detectors: vec![Box::new(FirstLineSniffer), Box::new(AssemblyDialect)],
        }
    }

    /// A chain with no detectors; refinement always keeps the input mode.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Appends a detector at the end of the chain.
    #[must_use]
    pub fn with(mut self, detector: impl ModeDetector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// Number of detectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Returns `true` if the chain has no detectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Runs the detectors in order and returns the first match, or the
    /// sample's current mode when every detector defers.
    ///
    /// A match can make another detector applicable (a first line that says
    /// `asm` makes the dialect detector relevant), so the chain runs again
    /// after every change of mode, at most once per detector.
    #[must_use]
    pub fn refine(&self, sample: &Sample<'_>) -> Mode {
        let mut current = *sample;
        for _ in 0..self.detectors.len() {
            match self.first_match(&current) {
                Some(mode) if mode != current.mode => current.mode = mode,
                _ => break,
            }
        }
        current.mode
    }

    fn first_match(&self, sample: &Sample<'_>) -> Option<Mode> {
        self.detectors.iter().find_map(|detector| {
            let Detection::Matched(mode) = detector.detect(sample) else {
                return None;
            };
            tracing::trace!(
                detector = detector.name(),
                from = %sample.mode,
                to = %mode,
                "mode refined"
            );
            Some(mode)
        })
    }
}

impl Default for DetectorChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for DetectorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.detectors.iter().map(|d| d.name()))
            .finish()
    }
}

/// Maps an interpreter or editor mode name to a mode.
///
/// # Examples
///
/// ```
/// use ds_classify::mode_from_name;
/// use ds_core::Mode;
///
/// assert_eq!(mode_from_name("python3"), Some(Mode::Python));
/// assert_eq!(mode_from_name("bash"), Some(Mode::Shell));
/// assert_eq!(mode_from_name("cobol"), None);
/// ```
#[must_use]
pub fn mode_from_name(name: &str) -> Option<Mode> {
    let name = name.to_ascii_lowercase();
    let base = name.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    let mode = match base {
        "python" | "pypy" => Mode::Python,
        "sh" | "bash" | "zsh" | "dash" | "ksh" | "ash" | "fish" | "shell-script" => Mode::Shell,
        "perl" | "cperl" => Mode::Perl,
        "ruby" => Mode::Ruby,
        "node" | "nodejs" | "deno" | "bun" | "js" | "javascript" => Mode::JavaScript,
        "ts-node" | "typescript" => Mode::TypeScript,
        "lua" => Mode::Lua,
        "php" => Mode::Php,
        "swipl" | "prolog" => Mode::Prolog,
        "make" | "makefile" => Mode::Make,
        "markdown" | "gfm" => Mode::Markdown,
        "conf" | "conf-unix" => Mode::Config,
        "yaml" => Mode::Yaml,
        "toml" => Mode::Toml,
        "json" => Mode::Json,
        "xml" | "nxml" => Mode::Xml,
        "html" => Mode::Html,
        "css" => Mode::Css,
        "c" => Mode::C,
        "c++" => Mode::Cpp,
        "rust" => Mode::Rust,
        "go" => Mode::Go,
        "text" => Mode::Text,
        "asm" => Mode::Assembly,
        _ => return None,
    };
    Some(mode)
}

fn first_line(content: &[u8]) -> &str {
    let capped = &content[..content.len().min(FIRST_LINE_LIMIT)];
    let end = capped
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(capped.len());
    let line = &capped[..end];
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    match std::str::from_utf8(line) {
        Ok(s) => s,
        // cut at the last valid char boundary
        Err(err) => std::str::from_utf8(&line[..err.valid_up_to()]).unwrap_or_default(),
    }
}

fn sniff_shebang(line: &str) -> Option<Mode> {
    let rest = line.strip_prefix("#!")?.trim_start();
    let mut words = rest.split_whitespace();
    let program = words.next()?;
    let mut interpreter = program.rsplit('/').next()?;

    if interpreter == "env" {
        interpreter = words.find(|w| !w.starts_with('-') && !w.contains('='))?;
    }
    mode_from_name(interpreter)
}

fn sniff_markup(line: &str) -> Option<Mode> {
    let lower = line.to_ascii_lowercase();
    if lower.starts_with("<?xml") {
        Some(Mode::Xml)
    } else if lower.starts_with("<!doctype html") || lower.starts_with("<html") {
        Some(Mode::Html)
    } else {
        None
    }
}

/// `-*- mode: python -*-` or the short form `-*- python -*-`.
fn sniff_emacs_mode_line(line: &str) -> Option<Mode> {
    let start = line.find("-*-")? + 3;
    let inner_len = line[start..].find("-*-")?;
    let inner = line[start..start + inner_len].trim();

    for part in inner.split(';') {
        let part = part.trim();
        match part.split_once(':') {
            Some((key, value)) if key.trim().eq_ignore_ascii_case("mode") => {
                return mode_from_name(value.trim());
            }
            None if !part.is_empty() => return mode_from_name(part),
            _ => {}
        }
    }
    None
}

fn sniff_directives(line: &str, current: Mode) -> Option<Mode> {
    if line.starts_with(":-") || (current == Mode::Prolog && line.starts_with('%')) {
        return Some(Mode::Prolog);
    }
    if line.starts_with("use strict") || line.starts_with("use warnings") {
        return Some(Mode::Perl);
    }
    if line.starts_with("diff --git") {
        return Some(Mode::Diff);
    }
    if line == "---" && matches!(current, Mode::Blank | Mode::Config) {
        return Some(Mode::Yaml);
    }
    if line.len() > 2
        && line.starts_with('[')
        && line.ends_with(']')
        && !line[1..line.len() - 1].contains(['[', ']'])
    {
        return Some(Mode::Ini);
    }
    None
}
