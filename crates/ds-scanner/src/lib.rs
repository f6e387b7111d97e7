//! Concurrent directory walker and file analysis for dirscope.
//!
//! This crate walks a directory tree with a bounded pool of threads, sorts
//! every path into regular or ignored, finds the git remote, and classifies
//! the regular files in parallel.
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - [`examine`]: the concurrent walk, producing [`Findings`]
//! - [`IgnoreRuleSet`]: literal rules from `.ignore`/`.gitignore` and dotfiles
//! - [`GitRepoLocator`]: remote URL from `.git/config`
//! - [`FileAnalyzer`]: parallel classification with rayon
//! - [`ScanStats`]: atomic statistics
//!
//! # Example
//!
//! ```no_run
//! use ds_classify::MimeTable;
//! use ds_core::Config;
//! use ds_scanner::Scanner;
//!
//! let scanner = Scanner::new(&Config::default(), MimeTable::builtin())?;
//! let report = scanner.scan()?;
//!
//! for (path, _meta, class) in report.files() {
//!     let description = class.map_or("Unknown", |c| c.description.as_str());
//!     println!("{path};[{description}]");
//! }
//! if let Some(git) = report.findings.git() {
//!     println!("Git URL: {}", git.url);
//! }
//! # Ok::<(), ds_scanner::ScanError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! Scanner (main entry point)
//!     │
//!     ├── examine (walk phase)
//!     │       │
//!     │       ├── WalkParallel (ignore crate, N threads)
//!     │       ├── per-thread Worker, merged on drop
//!     │       ├── GitRepoLocator (first .git only)
//!     │       └── IgnoreRuleSet post-pass
//!     │
//!     ├── FileAnalyzer (classification phase)
//!     │       │
//!     │       └── rayon par_iter + ds-classify::Classifier
//!     │
//!     └── ScanStats (atomic counters)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod analyzer;
mod error;
mod git;
mod rules;
mod stats;
mod walker;

pub use analyzer::FileAnalyzer;
pub use error::{GitError, ScanError};
pub use git::{GitRepoLocator, transform_git_url};
pub use rules::{IgnoreRuleSet, rule_lines};
pub use stats::{ScanStats, StatsSnapshot};
pub use walker::{WalkOptions, examine};

use camino::{Utf8Path, Utf8PathBuf};
use ds_classify::{Classifier, MimeTable};
use ds_core::{ClassificationResult, Config, FileMetadata, Findings, FxHashMap};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything one scan produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// The walk root, as configured.
    pub root: Utf8PathBuf,
    /// Regular and ignored paths, sorted.
    pub findings: Findings,
    /// Classification per regular path. Empty when classification is off.
    pub classifications: FxHashMap<Utf8PathBuf, ClassificationResult>,
    /// Counters at the end of the scan.
    pub stats: StatsSnapshot,
}

impl ScanReport {
    /// The classification of `path`, if it was classified.
    #[inline]
    #[must_use]
    pub fn classification(&self, path: &Utf8Path) -> Option<&ClassificationResult> {
        self.classifications.get(path)
    }

    /// Regular non-directory files, in path order, with their metadata and
    /// classification.
    pub fn files(
        &self,
    ) -> impl Iterator<Item = (&Utf8Path, FileMetadata, Option<&ClassificationResult>)> {
        self.regular_with_metadata()
            .filter(|(_, meta)| !meta.is_dir)
            .map(move |(path, meta)| (path, meta, self.classification(path)))
    }

    /// Regular directories, in path order.
    pub fn directories(&self) -> impl Iterator<Item = &Utf8Path> {
        self.regular_with_metadata()
            .filter(|(_, meta)| meta.is_dir)
            .map(|(path, _)| path)
    }

    fn regular_with_metadata(&self) -> impl Iterator<Item = (&Utf8Path, FileMetadata)> {
        self.findings.regular_files().iter().map(move |path| {
            let meta = self
                .findings
                .metadata(path)
                .copied()
                .unwrap_or_else(|| FileMetadata::file(0));
            (path.as_path(), meta)
        })
    }
}

/// Walks and classifies one directory tree.
///
/// # Examples
///
/// ```no_run
/// use ds_classify::MimeTable;
/// use ds_core::Config;
/// use ds_scanner::Scanner;
///
/// let mut config = Config::default();
/// config.scan.max_depth = 3;
///
/// let scanner = Scanner::new(&config, MimeTable::builtin())?;
/// let report = scanner.scan()?;
/// println!("{} regular, {} ignored", report.stats.regular, report.stats.ignored);
/// # Ok::<(), ds_scanner::ScanError>(())
/// ```
#[derive(Debug)]
pub struct Scanner {
    root: Utf8PathBuf,
    options: WalkOptions,
    analyzer: Option<FileAnalyzer>,
    stats: ScanStats,
}

impl Scanner {
    /// Creates a scanner from configuration and an already loaded MIME
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the scan configuration is invalid and
    /// [`ScanError::NotADirectory`] if the root is not a directory.
    pub fn new(config: &Config, mime: MimeTable) -> Result<Self, ScanError> {
        config.scan.validate()?;

        let root = config.scan.root_path.clone();
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        let analyzer = config.classify.enabled.then(|| {
            let classifier = Classifier::new(mime)
                .with_max_binary_detection_size(config.classify.max_binary_detection_size);
            FileAnalyzer::new(classifier)
                .with_read_size_threshold(config.classify.read_size_threshold)
        });

        info!(
            root = %root,
            max_depth = config.scan.max_depth,
            classify = config.classify.enabled,
            "Creating scanner"
        );

        Ok(Self {
            root,
            options: WalkOptions::from(&config.scan),
            analyzer,
            stats: ScanStats::new(),
        })
    }

    /// Performs a full scan of the configured directory.
    ///
    /// This method:
    /// 1. Walks the tree concurrently ([`examine`])
    /// 2. Sorts the findings
    /// 3. Classifies regular files in parallel, if classification is on
    /// 4. Updates statistics counters
    ///
    /// # Errors
    ///
    /// Returns the walk's error; classification never fails.
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        info!(root = %self.root, "Starting scan");
        self.stats.reset();

        let mut findings = examine(&self.root, &self.options)?;
        findings.sort();
        self.stats.record_walk(&findings);

        let classifications = self
            .analyzer
            .as_ref()
            .map(|analyzer| analyzer.analyze(&self.root, &findings, &self.stats))
            .unwrap_or_default();

        let stats = self.stats.snapshot();
        info!(
            visited = stats.visited,
            regular = stats.regular,
            ignored = stats.ignored,
            text = stats.text,
            binary = stats.binary,
            unread = stats.unread,
            unreadable = stats.unreadable,
            "Scan completed"
        );

        Ok(ScanReport {
            root: self.root.clone(),
            findings,
            classifications,
            stats,
        })
    }

    /// Returns current statistics.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Returns the walk root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the walk options in use.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &WalkOptions {
        &self.options
    }
}
