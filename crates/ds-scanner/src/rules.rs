//! Literal ignore rules collected during a walk.
//!
//! Rules come from the lines of a top-level `.ignore`/`.gitignore` and from
//! top-level dotfile names. They are plain relative paths: no globs, no
//! negation. A rule matches a path when the rule is a whole-segment prefix of
//! it, so `sub` matches `sub` and `sub/b.md` but not `subway.txt`.

use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::Mutex;

/// Thread-safe, append-only set of ignore rules.
///
/// Workers add rules in batches when they finish; once all workers are done
/// the walker moves every regular path that [`matches`](Self::matches) a rule
/// to the ignored list.
///
/// # Examples
///
/// ```
/// use ds_scanner::IgnoreRuleSet;
/// use camino::Utf8Path;
///
/// let rules = IgnoreRuleSet::new();
/// rules.extend(["/build/"]);
/// assert!(rules.matches(Utf8Path::new("build/out.o")));
/// assert!(!rules.matches(Utf8Path::new("builder.rs")));
/// ```
#[derive(Debug, Default)]
pub struct IgnoreRuleSet {
    rules: Mutex<Vec<Utf8PathBuf>>,
}

impl IgnoreRuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a batch of rules under a single lock acquisition.
    pub fn extend<I, S>(&self, rules: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized: Vec<_> = rules
            .into_iter()
            .filter_map(|r| normalize_rule(r.as_ref()))
            .collect();
        if !normalized.is_empty() {
            self.rules.lock().extend(normalized);
        }
    }

    /// Returns `true` if any rule is a segment prefix of `path`.
    #[must_use]
    pub fn matches(&self, path: &Utf8Path) -> bool {
        self.rules.lock().iter().any(|rule| path.starts_with(rule))
    }

    /// Sorted, deduplicated copy of the rules.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Utf8PathBuf> {
        let mut rules = self.rules.lock().clone();
        rules.sort_unstable();
        rules.dedup();
        rules
    }
}

/// Yields the rule lines of an ignore file: trimmed, without blank lines and
/// `#` comments.
///
/// # Examples
///
/// ```
/// use ds_scanner::rule_lines;
///
/// let lines: Vec<_> = rule_lines("# build output\n\ntarget\n  dist/  \n").collect();
/// assert_eq!(lines, ["target", "dist/"]);
/// ```
pub fn rule_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Strips a leading `/` or `./` and trailing `/` from a rule.
fn normalize_rule(rule: &str) -> Option<Utf8PathBuf> {
    let rule = rule.trim();
    let rule = rule
        .strip_prefix("./")
        .or_else(|| rule.strip_prefix('/'))
        .unwrap_or(rule);
    let rule = rule.trim_end_matches('/');
    (!rule.is_empty()).then(|| Utf8PathBuf::from(rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_normalize_rule() {
        assert_eq!(normalize_rule("sub"), Some(Utf8PathBuf::from("sub")));
        assert_eq!(normalize_rule("/sub/"), Some(Utf8PathBuf::from("sub")));
        assert_eq!(normalize_rule("./a/b"), Some(Utf8PathBuf::from("a/b")));
        assert_eq!(normalize_rule("/"), None);
        assert_eq!(normalize_rule("   "), None);
    }

    #[test]
    fn test_segment_prefix_matching() {
        let rules = IgnoreRuleSet::new();
        rules.extend(["sub"]);
        assert!(rules.matches(Utf8Path::new("sub")));
        assert!(rules.matches(Utf8Path::new("sub/b.md")));
        assert!(!rules.matches(Utf8Path::new("subway.txt")));
        assert!(!rules.matches(Utf8Path::new("other/sub")));
    }

    #[test]
    fn test_globs_are_literal() {
        let rules = IgnoreRuleSet::new();
        rules.extend(["*.log"]);
        assert!(!rules.matches(Utf8Path::new("debug.log")));
        assert!(rules.matches(Utf8Path::new("*.log")));
    }

    #[test]
    fn test_extend_and_snapshot() {
        let rules = IgnoreRuleSet::new();
        rules.extend(["b", "a", "/b/", ""]);
        assert!(rules.matches(Utf8Path::new("b/c")));
        assert_eq!(
            rules.snapshot(),
            vec![Utf8PathBuf::from("a"), Utf8PathBuf::from("b")]
        );
    }

    #[test]
    fn test_rule_lines() {
        let lines: Vec<_> = rule_lines("a\n#c\n\n\tb \r\n").collect();
        assert_eq!(lines, ["a", "b"]);
    }

    #[test]
    fn test_concurrent_adds() {
        let rules = Arc::new(IgnoreRuleSet::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let rules = Arc::clone(&rules);
                thread::spawn(move || {
                    for j in 0..50 {
                        rules.extend([format!("r{i}-{j}")]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(rules.snapshot().len(), 400);
        assert!(rules.matches(Utf8Path::new("r7-49/x")));
    }
}
