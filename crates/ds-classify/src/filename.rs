//! Filename and extension based mode detection.
//!
//! This is the first guess of the classification cascade and needs no file
//! content. Exact filenames are checked before extensions; both lookups are
//! case-insensitive.

use camino::Utf8Path;
use ds_core::Mode;

/// Well-known filenames that carry no (useful) extension.
const EXACT_NAMES: &[(&str, Mode)] = &[
    ("makefile", Mode::Make),
    ("gnumakefile", Mode::Make),
    ("cmakelists.txt", Mode::CMake),
    ("dockerfile", Mode::Docker),
    ("containerfile", Mode::Docker),
    ("readme", Mode::Markdown),
    ("changelog", Mode::Markdown),
    ("contributing", Mode::Markdown),
    ("authors", Mode::Markdown),
    ("todo", Mode::Markdown),
    ("license", Mode::Text),
    ("copying", Mode::Text),
    ("notice", Mode::Text),
    (".gitignore", Mode::Git),
    (".gitattributes", Mode::Git),
    (".gitmodules", Mode::Git),
    (".mailmap", Mode::Git),
    ("commit_editmsg", Mode::Git),
    ("merge_msg", Mode::Git),
    ("git-rebase-todo", Mode::Git),
    (".ignore", Mode::Config),
    (".editorconfig", Mode::Ini),
    (".bashrc", Mode::Shell),
    (".bash_profile", Mode::Shell),
    (".zshrc", Mode::Shell),
    (".profile", Mode::Shell),
    ("pkgbuild", Mode::Shell),
    ("apkbuild", Mode::Shell),
    ("gemfile", Mode::Ruby),
    ("rakefile", Mode::Ruby),
    ("vagrantfile", Mode::Ruby),
    ("cargo.lock", Mode::Toml),
];

/// Extension table, lowercase and without the leading dot.
const EXTENSIONS: &[(&str, Mode)] = &[
    ("md", Mode::Markdown),
    ("markdown", Mode::Markdown),
    ("mdown", Mode::Markdown),
    ("txt", Mode::Text),
    ("text", Mode::Text),
    ("rst", Mode::ReStructured),
    ("scd", Mode::Scdoc),
    ("adoc", Mode::AsciiDoc),
    ("asciidoc", Mode::AsciiDoc),
    ("conf", Mode::Config),
    ("cfg", Mode::Config),
    ("config", Mode::Config),
    ("cnf", Mode::Config),
    ("ini", Mode::Ini),
    ("toml", Mode::Toml),
    ("yml", Mode::Yaml),
    ("yaml", Mode::Yaml),
    ("json", Mode::Json),
    ("jsonc", Mode::Json),
    ("xml", Mode::Xml),
    ("xsd", Mode::Xml),
    ("xsl", Mode::Xml),
    ("svg", Mode::Xml),
    ("py", Mode::Python),
    ("pyw", Mode::Python),
    ("pyi", Mode::Python),
    ("go", Mode::Go),
    ("rs", Mode::Rust),
    ("c", Mode::C),
    ("h", Mode::C),
    ("cpp", Mode::Cpp),
    ("cc", Mode::Cpp),
    ("cxx", Mode::Cpp),
    ("c++", Mode::Cpp),
    ("hpp", Mode::Cpp),
    ("hh", Mode::Cpp),
    ("hxx", Mode::Cpp),
    ("zig", Mode::Zig),
    ("java", Mode::Java),
    ("kt", Mode::Kotlin),
    ("kts", Mode::Kotlin),
    ("cs", Mode::CSharp),
    ("swift", Mode::Swift),
    ("hs", Mode::Haskell),
    ("lhs", Mode::Haskell),
    ("ml", Mode::OCaml),
    ("mli", Mode::OCaml),
    ("lua", Mode::Lua),
    ("php", Mode::Php),
    ("html", Mode::Html),
    ("htm", Mode::Html),
    ("xhtml", Mode::Html),
    ("css", Mode::Css),
    ("scss", Mode::Css),
    ("js", Mode::JavaScript),
    ("mjs", Mode::JavaScript),
    ("cjs", Mode::JavaScript),
    ("jsx", Mode::JavaScript),
    ("ts", Mode::TypeScript),
    ("tsx", Mode::TypeScript),
    ("mts", Mode::TypeScript),
    ("sh", Mode::Shell),
    ("bash", Mode::Shell),
    ("zsh", Mode::Shell),
    ("ksh", Mode::Shell),
    ("fish", Mode::Shell),
    // `.pl` is shared by Prolog and Perl; content sniffing settles it.
    ("pl", Mode::Prolog),
    ("pro", Mode::Prolog),
    ("pm", Mode::Perl),
    ("rb", Mode::Ruby),
    ("s", Mode::Assembly),
    ("asm", Mode::Assembly),
    ("mk", Mode::Make),
    ("mak", Mode::Make),
    ("cmake", Mode::CMake),
    ("sql", Mode::Sql),
    ("diff", Mode::Diff),
    ("patch", Mode::Diff),
];

/// Guesses a mode from the final component of `path`.
///
/// # Examples
///
/// ```
/// use ds_classify::detect_from_filename;
/// use ds_core::Mode;
/// use camino::Utf8Path;
///
/// assert_eq!(detect_from_filename(Utf8Path::new("src/main.rs")), Mode::Rust);
/// assert_eq!(detect_from_filename(Utf8Path::new("Makefile")), Mode::Make);
/// assert_eq!(detect_from_filename(Utf8Path::new("mystery")), Mode::Blank);
/// ```
#[must_use]
pub fn detect_from_filename(path: &Utf8Path) -> Mode {
    let Some(name) = path.file_name() else {
        return Mode::Blank;
    };
    let name = name.to_ascii_lowercase();

    if let Some(mode) = lookup(EXACT_NAMES, &name) {
        return mode;
    }

    extension_of(&name)
        .and_then(|ext| lookup(EXTENSIONS, ext))
        .unwrap_or(Mode::Blank)
}

/// Returns the extension of a file name, treating a leading dot as part of
/// the stem (`.bashrc` has no extension).
pub(crate) fn extension_of(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

fn lookup(table: &[(&str, Mode)], key: &str) -> Option<Mode> {
    table
        .iter()
        .find_map(|&(candidate, mode)| (candidate == key).then_some(mode))
}
