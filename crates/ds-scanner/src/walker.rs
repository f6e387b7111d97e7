//! Concurrent directory traversal.
//!
//! [`examine`] walks a tree with the `ignore` crate's parallel walker, all of
//! its own filtering disabled, and sorts every visited path into regular or
//! ignored.
//!
//! # Design
//!
//! Each walker thread owns a [`Worker`] that accumulates findings and ignore
//! rules locally. A worker touches shared state only twice: when it is
//! dropped (one merge into the shared [`Findings`], one into the
//! [`IgnoreRuleSet`]) and when it hits a fatal error (record the error,
//! quit). `WalkParallel::visit` joins every thread before returning, so once
//! it returns all workers have merged and the post-pass sees the complete
//! picture.
//!
//! ```text
//! examine
//!     │
//!     ├── WalkParallel (N threads)
//!     │       └── Worker ── local Findings + rules ──(drop)──► Shared
//!     │
//!     └── post-pass: rules move matching regular files to ignored
//! ```

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use ds_core::{FileMetadata, Findings, ScanConfig};
use ignore::{DirEntry, ParallelVisitor, ParallelVisitorBuilder, WalkBuilder, WalkState};
use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::error::ScanError;
use crate::git::GitRepoLocator;
use crate::rules::{IgnoreRuleSet, rule_lines};

/// Options for a single walk.
///
/// # Examples
///
/// ```
/// use ds_scanner::WalkOptions;
///
/// let options = WalkOptions::default().with_max_depth(3);
/// assert_eq!(options.max_depth, 3);
/// assert!(options.respect_hidden_files);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Read top-level `.ignore`/`.gitignore` files as ignore rules.
    pub respect_ignore_files: bool,
    /// Skip nested dotfiles and treat top-level dotfiles as ignored.
    pub respect_hidden_files: bool,
    /// Maximum number of path segments below the root.
    pub max_depth: usize,
    /// Walker threads; `None` lets the walker pick.
    pub threads: Option<usize>,
    /// Whether to follow symbolic links.
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

impl From<&ScanConfig> for WalkOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            respect_ignore_files: config.respect_ignore_files,
            respect_hidden_files: config.respect_hidden_files,
            max_depth: config.max_depth,
            threads: config.threads,
            follow_links: config.follow_links,
        }
    }
}

impl WalkOptions {
    /// Sets the maximum depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether ignore files are read.
    #[must_use]
    pub const fn with_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore_files = respect;
        self
    }

    /// Sets whether dotfiles are hidden.
    #[must_use]
    pub const fn with_hidden_files(mut self, respect: bool) -> Self {
        self.respect_hidden_files = respect;
        self
    }

    /// Sets the number of walker threads.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets whether symbolic links are followed.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

/// Walks `root` and returns what was found.
///
/// Paths in the result are relative to `root`. A path's depth is its number
/// of segments; the root itself is never recorded. Names that are not valid
/// UTF-8 are recorded with invalid sequences replaced by `U+FFFD`.
///
/// # Errors
///
/// - [`ScanError::NotADirectory`] if `root` is not a directory
/// - [`ScanError::Walk`] if the traversal reports an error
/// - [`ScanError::Metadata`] if a visited path cannot be stat'ed
///
/// The first error stops every walker thread and is returned; later ones
/// are dropped.
///
/// # Examples
///
/// ```no_run
/// use ds_scanner::{examine, WalkOptions};
/// use camino::Utf8Path;
///
/// let findings = examine(Utf8Path::new("."), &WalkOptions::default())?;
/// for path in findings.regular_files() {
///     println!("{path}");
/// }
/// # Ok::<(), ds_scanner::ScanError>(())
/// ```
pub fn examine(root: &Utf8Path, options: &WalkOptions) -> Result<Findings, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_owned()));
    }

    info!(
        root = %root,
        max_depth = options.max_depth,
        respect_ignore_files = options.respect_ignore_files,
        respect_hidden_files = options.respect_hidden_files,
        "Starting walk"
    );

    let shared = Shared {
        root: root.to_owned(),
        options: *options,
        findings: Mutex::new(Findings::new()),
        rules: IgnoreRuleSet::new(),
        git_claimed: AtomicBool::new(false),
        error: Mutex::new(None),
    };

    WalkBuilder::new(root)
        // the worker does all filtering itself
        .standard_filters(false)
        .follow_links(options.follow_links)
        .max_depth(Some(options.max_depth))
        .threads(options.threads.unwrap_or(0))
        .build_parallel()
        .visit(&mut WorkerBuilder { shared: &shared });

    let Shared {
        findings,
        rules,
        error,
        ..
    } = shared;

    if let Some(err) = error.into_inner() {
        return Err(err);
    }

    let mut findings = findings.into_inner();
    let moved = findings.reclassify_as_ignored(|path| rules.matches(path));

    info!(
        regular = findings.regular_files().len(),
        ignored = findings.ignored_files().len(),
        rules = rules.snapshot().len(),
        reclassified = moved,
        git = findings.git().is_some(),
        "Walk completed"
    );

    Ok(findings)
}

/// State shared by all workers of one walk.
struct Shared {
    root: Utf8PathBuf,
    options: WalkOptions,
    findings: Mutex<Findings>,
    rules: IgnoreRuleSet,
    git_claimed: AtomicBool,
    error: Mutex<Option<ScanError>>,
}

impl Shared {
    /// Keeps the first error only.
    fn fail(&self, err: ScanError) {
        let mut slot = self.error.lock();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    /// Returns `true` exactly once per walk.
    fn claim_git(&self) -> bool {
        !self.git_claimed.swap(true, Ordering::AcqRel)
    }
}

struct WorkerBuilder<'s> {
    shared: &'s Shared,
}

impl<'s> ParallelVisitorBuilder<'s> for WorkerBuilder<'s> {
    fn build(&mut self) -> Box<dyn ParallelVisitor + 's> {
        Box::new(Worker {
            shared: self.shared,
            findings: Findings::new(),
            rules: SmallVec::new(),
        })
    }
}

/// Per-thread accumulator, merged into [`Shared`] on drop.
struct Worker<'s> {
    shared: &'s Shared,
    findings: Findings,
    rules: SmallVec<[String; 4]>,
}

impl ParallelVisitor for Worker<'_> {
    fn visit(&mut self, entry: Result<DirEntry, ignore::Error>) -> WalkState {
        match self.handle(entry) {
            Ok(state) => state,
            Err(err) => {
                self.shared.fail(err);
                WalkState::Quit
            }
        }
    }
}

impl Worker<'_> {
    fn handle(&mut self, entry: Result<DirEntry, ignore::Error>) -> Result<WalkState, ScanError> {
        let entry = entry?;
        if entry.depth() == 0 {
            return Ok(WalkState::Continue);
        }

        let shared = self.shared;
        let options = &shared.options;
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        let prune = if is_dir {
            WalkState::Skip
        } else {
            WalkState::Continue
        };

        let rel = relative_path(&shared.root, entry.path());
        let mut segments = rel.components().map(|c| c.as_str());
        let Some(head) = segments.next() else {
            return Ok(WalkState::Continue);
        };

        if options.respect_hidden_files && segments.any(|s| s.starts_with('.')) {
            return Ok(prune);
        }
        if entry.depth() > options.max_depth {
            return Ok(prune);
        }

        let meta = entry
            .metadata()
            .map(|m| FileMetadata::from(&m))
            .map_err(|e| ScanError::metadata(rel.clone(), e))?;

        match head.to_ascii_lowercase().as_str() {
            "vendor" => {
                self.findings.record_ignored(rel.clone(), meta);
                return Ok(WalkState::Continue);
            }
            ".git" => {
                self.findings.record_ignored(rel.clone(), meta);
                if shared.claim_git() {
                    self.locate_git(head);
                }
                return Ok(WalkState::Continue);
            }
            _ => {}
        }

        if options.respect_ignore_files && (head == ".ignore" || head == ".gitignore") {
            self.read_ignore_file(head);
        }
        if options.respect_hidden_files && head.starts_with('.') {
            self.rules.push(head.to_owned());
        }

        self.findings.record_regular(rel, meta);
        Ok(WalkState::Continue)
    }

    fn locate_git(&mut self, segment: &str) {
        let git_dir = self.shared.root.join(segment);
        match GitRepoLocator::locate(&git_dir) {
            Ok(info) => {
                debug!(git_dir = %git_dir, url = %info.url, "Found git remote");
                self.findings.set_git(info);
            }
            Err(err) => debug!(git_dir = %git_dir, error = %err, "No git info"),
        }
    }

    fn read_ignore_file(&mut self, segment: &str) {
        let path = self.shared.root.join(segment);
        match fs::read_to_string(&path) {
            Ok(text) => {
                let before = self.rules.len();
                self.rules.extend(rule_lines(&text).map(str::to_owned));
                debug!(path = %path, rules = self.rules.len() - before, "Read ignore file");
            }
            Err(err) => debug!(path = %path, error = %err, "Could not read ignore file"),
        }
    }
}

impl Drop for Worker<'_> {
    fn drop(&mut self) {
        let findings = std::mem::take(&mut self.findings);
        if !findings.is_empty() || findings.git().is_some() {
            self.shared.findings.lock().absorb(findings);
        }
        if !self.rules.is_empty() {
            for rule in &self.rules {
                debug!(rule = %rule, "Registered ignore rule");
            }
            self.shared.rules.extend(self.rules.drain(..));
        }
    }
}

/// Converts an entry path to a UTF-8 path relative to `root`, replacing
/// invalid sequences in names that are not UTF-8.
fn relative_path(root: &Utf8Path, path: &Path) -> Utf8PathBuf {
    let rel = path.strip_prefix(root.as_std_path()).unwrap_or(path);
    if let Some(rel) = Utf8Path::from_path(rel) {
        return rel.to_owned();
    }
    let lossy = Utf8PathBuf::from(rel.to_string_lossy().into_owned());
    warn!(path = %lossy, "Path is not valid UTF-8, recording a lossy name");
    lossy
}
