//! Integration tests for the concurrent walk over temporary trees.

use std::collections::BTreeSet;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use ds_scanner::{ScanError, WalkOptions, examine};
use tempfile::TempDir;

/// Builds a tree from `(relative path, content)` pairs. A path ending in `/`
/// creates an empty directory.
fn tree(entries: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in entries {
        let full = dir.path().join(path);
        if path.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
            continue;
        }
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
    }
    dir
}

fn root(dir: &TempDir) -> &Utf8Path {
    Utf8Path::from_path(dir.path()).unwrap()
}

fn set(paths: &[Utf8PathBuf]) -> BTreeSet<&str> {
    paths.iter().map(|p| p.as_str()).collect()
}

fn permissive(max_depth: usize) -> WalkOptions {
    WalkOptions::default()
        .with_max_depth(max_depth)
        .with_ignore_files(false)
        .with_hidden_files(false)
}

#[test]
fn test_gitignore_rule_moves_subtree_to_ignored() {
    let dir = tree(&[
        ("a.py", "print('a')\n"),
        ("sub/b.md", "# b\n"),
        (".git/config", "[remote \"origin\"]\n\turl = git@github.com:acme/widgets\n"),
        (".gitignore", "sub\n"),
    ]);

    let options = WalkOptions::default().with_max_depth(2);
    let findings = examine(root(&dir), &options).unwrap();

    assert_eq!(set(findings.regular_files()), BTreeSet::from(["a.py"]));
    let ignored = set(findings.ignored_files());
    assert!(ignored.contains("sub/b.md"));
    assert!(ignored.contains("sub"));
    assert!(ignored.contains(".git"));
    assert!(ignored.contains(".git/config"));
    assert!(ignored.contains(".gitignore"));

    assert_eq!(
        findings.git().map(|g| g.url.as_str()),
        Some("https://github.com/acme/widgets")
    );
}

#[test]
fn test_every_path_recorded_exactly_once() {
    let dir = tree(&[
        ("a.txt", "a"),
        ("b/c.txt", "c"),
        ("b/d/e.txt", "e"),
        (".hidden/f.txt", "f"),
        ("vendor/g.go", "package g"),
        ("empty/", ""),
    ]);

    let findings = examine(root(&dir), &permissive(10)).unwrap();

    let mut all: Vec<&str> = findings
        .regular_files()
        .iter()
        .chain(findings.ignored_files())
        .map(|p| p.as_str())
        .collect();
    all.sort_unstable();

    let expected = [
        ".hidden",
        ".hidden/f.txt",
        "a.txt",
        "b",
        "b/c.txt",
        "b/d",
        "b/d/e.txt",
        "empty",
        "vendor",
        "vendor/g.go",
    ];
    assert_eq!(all, expected);
    assert_eq!(findings.info().len(), expected.len());
}

#[test]
fn test_vendor_is_always_ignored() {
    let dir = tree(&[("vendor/lib/x.go", "package x"), ("Vendor2/y.go", "package y")]);

    let findings = examine(root(&dir), &permissive(5)).unwrap();

    let ignored = set(findings.ignored_files());
    assert!(ignored.contains("vendor"));
    assert!(ignored.contains("vendor/lib/x.go"));
    assert!(set(findings.regular_files()).contains("Vendor2/y.go"));
}

#[test]
fn test_depth_limit() {
    let dir = tree(&[("a/b/c.txt", "deep"), ("a/top.txt", "top")]);

    let findings = examine(root(&dir), &permissive(2)).unwrap();
    let regular = set(findings.regular_files());

    assert!(regular.contains("a/b"));
    assert!(regular.contains("a/top.txt"));
    assert!(!regular.contains("a/b/c.txt"));
    assert!(findings.metadata(Utf8Path::new("a/b/c.txt")).is_none());
}

#[test]
fn test_default_depth_is_top_level_only() {
    let dir = tree(&[("a.rs", ""), ("src/lib.rs", "")]);

    let findings = examine(root(&dir), &WalkOptions::default()).unwrap();
    assert_eq!(set(findings.regular_files()), BTreeSet::from(["a.rs", "src"]));
}

#[test]
fn test_nested_dotfiles_are_skipped() {
    let dir = tree(&[("sub/.env", "SECRET=1"), ("sub/ok.txt", "ok")]);

    let hidden = examine(root(&dir), &WalkOptions::default().with_max_depth(3)).unwrap();
    assert!(!set(hidden.regular_files()).contains("sub/.env"));
    assert!(!set(hidden.ignored_files()).contains("sub/.env"));
    assert!(set(hidden.regular_files()).contains("sub/ok.txt"));

    let shown = examine(root(&dir), &permissive(3)).unwrap();
    assert!(set(shown.regular_files()).contains("sub/.env"));
}

#[test]
fn test_top_level_dotfiles_become_ignored() {
    let dir = tree(&[(".env", "A=1"), ("main.go", "package main")]);

    let findings = examine(root(&dir), &WalkOptions::default()).unwrap();
    assert_eq!(set(findings.regular_files()), BTreeSet::from(["main.go"]));
    assert_eq!(set(findings.ignored_files()), BTreeSet::from([".env"]));
}

#[test]
fn test_ignore_file_rules_are_literal_prefixes() {
    let dir = tree(&[
        (".ignore", "# generated\n\n/build/\n*.log\n"),
        ("build/out.o", ""),
        ("builder.rs", ""),
        ("debug.log", ""),
        ("subway.txt", ""),
    ]);

    let options = WalkOptions::default()
        .with_max_depth(2)
        .with_hidden_files(false);
    let findings = examine(root(&dir), &options).unwrap();

    let regular = set(findings.regular_files());
    assert!(regular.contains("builder.rs"));
    assert!(regular.contains("debug.log"));
    assert!(regular.contains("subway.txt"));
    // not hidden, so the ignore file itself stays regular
    assert!(regular.contains(".ignore"));

    let ignored = set(findings.ignored_files());
    assert!(ignored.contains("build"));
    assert!(ignored.contains("build/out.o"));
}

#[test]
fn test_ignore_files_not_respected() {
    let dir = tree(&[(".gitignore", "sub\n"), ("sub/b.md", "")]);

    let options = WalkOptions::default()
        .with_max_depth(2)
        .with_ignore_files(false);
    let findings = examine(root(&dir), &options).unwrap();

    let regular = set(findings.regular_files());
    assert!(regular.contains("sub"));
    assert!(regular.contains("sub/b.md"));
}

#[test]
fn test_git_without_url() {
    let dir = tree(&[(".git/config", "[core]\n\tbare = false\n"), ("a.txt", "")]);

    let findings = examine(root(&dir), &WalkOptions::default().with_max_depth(2)).unwrap();
    assert!(findings.git().is_none());
    assert!(set(findings.ignored_files()).contains(".git/config"));
}

#[test]
fn test_git_found_at_depth_one() {
    let dir = tree(&[(".git/config", "url = https://example.com/r.git\n")]);

    let findings = examine(root(&dir), &WalkOptions::default()).unwrap();
    assert_eq!(
        findings.git().map(|g| g.url.as_str()),
        Some("https://example.com/r.git")
    );
    assert_eq!(set(findings.ignored_files()), BTreeSet::from([".git"]));
}

#[test]
fn test_repeated_walks_are_identical() {
    let mut entries = Vec::new();
    let names: Vec<String> = (0..40)
        .map(|i| format!("d{}/f{i}.txt", i % 7))
        .collect();
    for name in &names {
        entries.push((name.as_str(), "x"));
    }
    entries.push((".gitignore", "d3\n"));
    let dir = tree(&entries);

    let options = WalkOptions::default().with_max_depth(3).with_threads(4);
    let first = examine(root(&dir), &options).unwrap();

    for _ in 0..5 {
        let again = examine(root(&dir), &options).unwrap();
        assert_eq!(set(again.regular_files()), set(first.regular_files()));
        assert_eq!(set(again.ignored_files()), set(first.ignored_files()));
    }
}

#[test]
fn test_root_must_be_directory() {
    let dir = tree(&[("file.txt", "x")]);
    let file = root(&dir).join("file.txt");

    let err = examine(&file, &WalkOptions::default()).unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory(_)));

    let err = examine(&root(&dir).join("missing"), &WalkOptions::default()).unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory(_)));
}

#[test]
fn test_metadata_is_captured() {
    let dir = tree(&[("five.txt", "12345"), ("sub/", "")]);

    let findings = examine(root(&dir), &WalkOptions::default()).unwrap();

    let file = findings.metadata(Utf8Path::new("five.txt")).unwrap();
    assert_eq!(file.size, 5);
    assert!(!file.is_dir);
    assert!(findings.metadata(Utf8Path::new("sub")).unwrap().is_dir);
}

#[test]
fn test_only_top_level_git_is_reported() {
    let dir = tree(&[
        (".git/config", "[remote \"origin\"]\n\turl = git@github.com:acme/top\n"),
        ("sub/.git/config", "[remote \"origin\"]\n\turl = git@github.com:acme/nested\n"),
        ("sub/lib.rs", ""),
    ]);

    let findings = examine(root(&dir), &permissive(3).with_threads(4)).unwrap();

    assert_eq!(
        findings.git().map(|g| g.url.as_str()),
        Some("https://github.com/acme/top")
    );
    // only the top-level segment decides; a nested .git is an ordinary path
    let regular = set(findings.regular_files());
    assert!(regular.contains("sub/.git"));
    assert!(regular.contains("sub/.git/config"));
    assert!(set(findings.ignored_files()).contains(".git/config"));
}

#[test]
fn test_nested_git_alone_gives_no_url() {
    let dir = tree(&[("sub/.git/config", "url = https://example.com/nested.git\n")]);

    let findings = examine(root(&dir), &permissive(3)).unwrap();
    assert!(findings.git().is_none());
}

#[cfg(unix)]
#[test]
fn test_non_utf8_name_is_recorded_lossily() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tree(&[("a.py", "print('a')\n")]);
    fs::write(dir.path().join(OsStr::from_bytes(b"caf\xE9.txt")), "x").unwrap();

    let findings = examine(root(&dir), &WalkOptions::default()).unwrap();

    assert_eq!(
        set(findings.regular_files()),
        BTreeSet::from(["a.py", "caf\u{FFFD}.txt"])
    );
    assert_eq!(findings.info().len(), 2);
}

#[cfg(unix)]
#[test]
fn test_traversal_error_aborts_walk() {
    let dir = tree(&[("a.txt", "a"), ("b/c.txt", "c")]);
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("dangling")).unwrap();

    let options = permissive(3).with_follow_links(true);
    let result = examine(root(&dir), &options);
    assert!(matches!(result, Err(ScanError::Walk(_))), "{result:?}");

    // without following, the link itself is an ordinary entry
    let findings = examine(root(&dir), &permissive(3)).unwrap();
    assert!(set(findings.regular_files()).contains("dangling"));
}
