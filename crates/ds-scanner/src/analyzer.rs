//! Parallel classification of walked files.
//!
//! Uses the "collect-then-parallelize" pattern:
//!
//! 1. [`examine`](crate::examine) collects every path first
//! 2. [`FileAnalyzer`] classifies the surviving regular files with
//!    `rayon::par_iter()`
//! 3. Each rayon thread keeps one read buffer, set up via `map_init()`, so
//!    content reads don't allocate per file

use std::fs::File;
use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use ds_classify::Classifier;
use ds_core::config::DEFAULT_READ_SIZE_THRESHOLD;
use ds_core::{ClassificationResult, FileMetadata, Findings, FxHashMap};
use rayon::prelude::*;
use tracing::debug;

use crate::stats::ScanStats;

/// Classifies the regular files of a walk.
///
/// Files below the read threshold are read whole and classified from their
/// content. Larger files, and files that cannot be read, are classified from
/// their name alone.
///
/// # Examples
///
/// ```
/// use ds_classify::{Classifier, MimeTable};
/// use ds_scanner::{FileAnalyzer, ScanStats};
/// use ds_core::{FileMetadata, Findings};
/// use camino::{Utf8Path, Utf8PathBuf};
///
/// let mut findings = Findings::new();
/// findings.record_regular(Utf8PathBuf::from("src"), FileMetadata::directory());
///
/// let analyzer = FileAnalyzer::new(Classifier::new(MimeTable::empty()));
/// let stats = ScanStats::new();
/// let results = analyzer.analyze(Utf8Path::new("."), &findings, &stats);
///
/// assert!(results[Utf8Path::new("src")].is_directory());
/// ```
#[derive(Debug)]
pub struct FileAnalyzer {
    classifier: Classifier,
    read_size_threshold: u64,
}

impl FileAnalyzer {
    /// Creates an analyzer with the default read threshold.
    #[must_use]
    pub const fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            read_size_threshold: DEFAULT_READ_SIZE_THRESHOLD,
        }
    }

    /// Files at or above `threshold` bytes are not read.
    #[must_use]
    pub const fn with_read_size_threshold(mut self, threshold: u64) -> Self {
        self.read_size_threshold = threshold;
        self
    }

    /// The classifier in use.
    #[inline]
    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Classifies every regular path of `findings`. Paths are resolved
    /// against `root`; keys of the result are the relative paths.
    #[must_use]
    pub fn analyze(
        &self,
        root: &Utf8Path,
        findings: &Findings,
        stats: &ScanStats,
    ) -> FxHashMap<Utf8PathBuf, ClassificationResult> {
        findings
            .regular_files()
            .par_iter()
            .map_init(Vec::new, |buf, path| {
                let meta = findings
                    .metadata(path)
                    .copied()
                    .unwrap_or_else(|| FileMetadata::file(0));
                let result = self.analyze_one(root, path, &meta, buf, stats);
                (path.clone(), result)
            })
            .collect()
    }

    fn analyze_one(
        &self,
        root: &Utf8Path,
        path: &Utf8Path,
        meta: &FileMetadata,
        buf: &mut Vec<u8>,
        stats: &ScanStats,
    ) -> ClassificationResult {
        if meta.is_dir {
            return ClassificationResult::directory();
        }

        let full = root.join(path);
        let content = if meta.size < self.read_size_threshold {
            match read_into(&full, buf) {
                Ok(()) => Some(buf.as_slice()),
                Err(err) => {
                    stats.increment_unreadable();
                    debug!(path = %path, error = %err, "Could not read file");
                    None
                }
            }
        } else {
            None
        };

        let result = self.classifier.classify(&full, meta, content);
        stats.record_classification(&result);
        result
    }
}

/// Reads the whole file into `buf`, reusing its allocation.
fn read_into(path: &Utf8Path, buf: &mut Vec<u8>) -> io::Result<()> {
    buf.clear();
    File::open(path.as_std_path())?.read_to_end(buf)?;
    Ok(())
}
