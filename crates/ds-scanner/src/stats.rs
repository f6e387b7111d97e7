//! Scan statistics with atomic counters.
//!
//! This module provides [`ScanStats`] for counting while a scan runs and
//! [`StatsSnapshot`] for point-in-time views.
//!
//! # Thread Safety
//!
//! All counters use [`AtomicU64`] with [`Relaxed`](std::sync::atomic::Ordering::Relaxed)
//! ordering. Statistics are informational and don't require strict ordering
//! guarantees; the classification phase bumps them from rayon workers.
//!
//! # Examples
//!
//! ```
//! use ds_scanner::ScanStats;
//!
//! let stats = ScanStats::new();
//! stats.increment_text();
//! stats.increment_binary();
//!
//! let snapshot = stats.snapshot();
//! assert_eq!(snapshot.classified(), 2);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use ds_core::{ClassificationResult, Findings};
use serde::{Deserialize, Serialize};

/// Atomic counters for scan statistics.
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Paths recorded by the walk.
    visited: AtomicU64,
    /// Paths that ended up regular.
    regular: AtomicU64,
    /// Paths that ended up ignored.
    ignored: AtomicU64,
    /// Regular paths that are directories.
    directories: AtomicU64,
    /// Classified text files.
    text: AtomicU64,
    /// Classified binary files.
    binary: AtomicU64,
    /// Zero-byte files.
    empty: AtomicU64,
    /// Files classified from their name alone.
    unread: AtomicU64,
    /// Files whose content could not be read.
    unreadable: AtomicU64,
}

impl ScanStats {
    /// Creates a new [`ScanStats`] with all counters at zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_scanner::ScanStats;
    ///
    /// let stats = ScanStats::new();
    /// assert_eq!(stats.snapshot().visited, 0);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the outcome of a finished walk.
    pub fn record_walk(&self, findings: &Findings) {
        let directories = findings
            .regular_files()
            .iter()
            .filter(|p| findings.metadata(p).is_some_and(|m| m.is_dir))
            .count();

        self.visited.fetch_add(findings.len() as u64, Ordering::Relaxed);
        self.regular
            .fetch_add(findings.regular_files().len() as u64, Ordering::Relaxed);
        self.ignored
            .fetch_add(findings.ignored_files().len() as u64, Ordering::Relaxed);
        self.directories
            .fetch_add(directories as u64, Ordering::Relaxed);
    }

    /// Counts one classified non-directory file.
    ///
    /// A file only counts as text when its content was inspected, which is
    /// when it has a line count. Files above the read threshold and files
    /// that could not be read count as unread.
    pub fn record_classification(&self, result: &ClassificationResult) {
        if result.is_binary {
            self.increment_binary();
        } else if result.line_count.is_some() {
            self.increment_text();
        } else {
            self.unread.fetch_add(1, Ordering::Relaxed);
        }
        if result.description == "Empty" {
            self.empty.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Increments the text files counter.
    #[inline]
    pub fn increment_text(&self) {
        self.text.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the binary files counter.
    #[inline]
    pub fn increment_binary(&self) {
        self.binary.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the unreadable files counter.
    #[inline]
    pub fn increment_unreadable(&self) {
        self.unreadable.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all statistics.
    ///
    /// Values are read one by one with relaxed ordering, so a snapshot taken
    /// while a scan is running may be slightly inconsistent.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            visited: self.visited.load(Ordering::Relaxed),
            regular: self.regular.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            directories: self.directories.load(Ordering::Relaxed),
            text: self.text.load(Ordering::Relaxed),
            binary: self.binary.load(Ordering::Relaxed),
            empty: self.empty.load(Ordering::Relaxed),
            unread: self.unread.load(Ordering::Relaxed),
            unreadable: self.unreadable.load(Ordering::Relaxed),
        }
    }

    /// Resets all counters to zero.
    ///
    /// Useful for re-scanning.
    pub fn reset(&self) {
        for counter in [
            &self.visited,
            &self.regular,
            &self.ignored,
            &self.directories,
            &self.text,
            &self.binary,
            &self.empty,
            &self.unread,
            &self.unreadable,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// A point-in-time snapshot of scan statistics.
///
/// # Examples
///
/// ```
/// use ds_scanner::StatsSnapshot;
///
/// let snap = StatsSnapshot {
///     regular: 10,
///     directories: 2,
///     text: 6,
///     binary: 2,
///     ..Default::default()
/// };
/// assert_eq!(snap.files(), 8);
/// assert!((snap.binary_percent() - 25.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Paths recorded by the walk.
    pub visited: u64,
    /// Paths that ended up regular.
    pub regular: u64,
    /// Paths that ended up ignored.
    pub ignored: u64,
    /// Regular paths that are directories.
    pub directories: u64,
    /// Classified text files.
    pub text: u64,
    /// Classified binary files.
    pub binary: u64,
    /// Zero-byte files.
    pub empty: u64,
    /// Files classified from their name alone.
    pub unread: u64,
    /// Files whose content could not be read.
    pub unreadable: u64,
}

impl StatsSnapshot {
    /// Regular paths that are not directories.
    #[inline]
    #[must_use]
    pub const fn files(&self) -> u64 {
        self.regular.saturating_sub(self.directories)
    }

    /// Files that went through classification.
    #[inline]
    #[must_use]
    pub const fn classified(&self) -> u64 {
        self.text + self.binary + self.unread
    }

    /// Share of inspected files (text or binary) that are binary, in
    /// percent.
    ///
    /// Returns 0.0 if nothing was inspected.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable for statistics display
    pub fn binary_percent(&self) -> f64 {
        let inspected = self.text + self.binary;
        if inspected == 0 {
            return 0.0;
        }
        (self.binary as f64 / inspected as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use ds_core::{DisplayHint, FileMetadata, Mode};

    fn result(
        is_binary: bool,
        line_count: Option<usize>,
        description: &str,
    ) -> ClassificationResult {
        ClassificationResult {
            mode: Mode::Blank,
            is_binary,
            line_count,
            description: description.to_owned(),
            type_hint: DisplayHint::Gray,
            name_hint: DisplayHint::White,
        }
    }

    #[test]
    fn test_scan_stats_new() {
        assert_eq!(ScanStats::new().snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_record_walk() {
        let mut findings = Findings::new();
        findings.record_regular(Utf8PathBuf::from("a.py"), FileMetadata::file(3));
        findings.record_regular(Utf8PathBuf::from("src"), FileMetadata::directory());
        findings.record_ignored(Utf8PathBuf::from("vendor"), FileMetadata::directory());

        let stats = ScanStats::new();
        stats.record_walk(&findings);

        let snap = stats.snapshot();
        assert_eq!(snap.visited, 3);
        assert_eq!(snap.regular, 2);
        assert_eq!(snap.ignored, 1);
        assert_eq!(snap.directories, 1);
        assert_eq!(snap.files(), 1);
    }

    #[test]
    fn test_record_classification() {
        let stats = ScanStats::new();
        stats.record_classification(&result(false, Some(12), "Rust"));
        stats.record_classification(&result(false, Some(0), "Empty"));
        stats.record_classification(&result(true, None, "Binary"));
        stats.increment_unreadable();

        let snap = stats.snapshot();
        assert_eq!(snap.text, 2);
        assert_eq!(snap.binary, 1);
        assert_eq!(snap.empty, 1);
        assert_eq!(snap.unread, 0);
        assert_eq!(snap.unreadable, 1);
        assert_eq!(snap.classified(), 3);
    }

    #[test]
    fn test_files_without_content_are_not_text() {
        let stats = ScanStats::new();
        stats.record_classification(&result(false, None, "Rust"));
        stats.record_classification(&result(false, None, "Markdown"));
        stats.record_classification(&result(false, Some(3), "Go"));

        let snap = stats.snapshot();
        assert_eq!(snap.text, 1);
        assert_eq!(snap.unread, 2);
        assert_eq!(snap.binary, 0);
        assert_eq!(snap.classified(), 3);
        assert!(snap.binary_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn test_scan_stats_reset() {
        let stats = ScanStats::new();
        stats.increment_text();
        stats.increment_binary();
        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_binary_percent() {
        assert!(StatsSnapshot::default().binary_percent().abs() < f64::EPSILON);
        let snap = StatsSnapshot {
            text: 3,
            binary: 1,
            ..Default::default()
        };
        assert!((snap.binary_percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_snapshot_serialization() {
        let snap = StatsSnapshot {
            visited: 10,
            regular: 8,
            ignored: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&snap).expect("Serialization failed");
        let parsed: StatsSnapshot = serde_json::from_str(&json).expect("Deserialization failed");
        assert_eq!(snap, parsed);
    }
}
