//! File classification for dirscope.
//!
//! This crate decides, from a filename and optionally a content sample, what
//! kind of file something is:
//!
//! - A first guess from a static filename/extension table
//!   ([`detect_from_filename`])
//! - A binary/text decision and a line count ([`looks_binary`],
//!   [`count_lines`])
//! - Content sniffing that refines weak guesses ([`DetectorChain`])
//! - A human-readable description with display hints ([`describe`]), falling
//!   back to an injected [`MimeTable`] for unknown files
//!
//! # Overview
//!
//! ```
//! use ds_classify::{Classifier, MimeTable};
//! use ds_core::{FileMetadata, Mode};
//! use camino::Utf8Path;
//!
//! let classifier = Classifier::new(MimeTable::builtin());
//!
//! let content = b"#!/usr/bin/env python3\nprint('hi')\n";
//! let result = classifier.classify(
//!     Utf8Path::new("bin/tool"),
//!     &FileMetadata::file(content.len() as u64),
//!     Some(content),
//! );
//!
//! assert_eq!(result.mode, Mode::Python);
//! assert_eq!(result.description, "Python");
//! assert_eq!(result.line_count, Some(2));
//! ```
//!
//! Classification never fails. Content that cannot be read simply leaves the
//! filename guess in place.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod binary;
mod describe;
mod error;
mod filename;
mod mime;
mod sniff;

pub use binary::{BINARY_SAMPLE_LEN, count_lines, looks_binary};
pub use describe::{UNKNOWN, describe};
pub use error::MimeError;
pub use filename::detect_from_filename;
pub use mime::MimeTable;
pub use sniff::{
    AssemblyDialect, Detection, DetectorChain, FIRST_LINE_LIMIT, FirstLineSniffer, ModeDetector,
    Sample, is_ambiguous, mode_from_name,
};

use camino::Utf8Path;
use ds_core::config::DEFAULT_MAX_BINARY_DETECTION_SIZE;
use ds_core::{ClassificationResult, FileMetadata, Mode};

/// Classifies files from their name, metadata and optional content.
///
/// A classifier is immutable once built and can be shared across threads.
#[derive(Debug)]
pub struct Classifier {
    mime: MimeTable,
    chain: DetectorChain,
    max_binary_detection_size: u64,
}

impl Classifier {
    /// Creates a classifier with the standard detector chain.
    #[must_use]
    pub fn new(mime: MimeTable) -> Self {
        Self {
            mime,
            chain: DetectorChain::standard(),
            max_binary_detection_size: DEFAULT_MAX_BINARY_DETECTION_SIZE,
        }
    }

    /// Replaces the detector chain.
    #[must_use]
    pub fn with_chain(mut self, chain: DetectorChain) -> Self {
        self.chain = chain;
        self
    }

    /// Files at or above this size are never sampled from disk.
    #[must_use]
    pub const fn with_max_binary_detection_size(mut self, size: u64) -> Self {
        self.max_binary_detection_size = size;
        self
    }

    /// The MIME table used for unknown files.
    #[must_use]
    pub const fn mime(&self) -> &MimeTable {
        &self.mime
    }

    /// Classifies `path`.
    ///
    /// `path` is used for the filename guess, the MIME fallback and, when no
    /// `content` is given for an otherwise unlabelled file, a bounded sample
    /// read. Relative paths are resolved against the working directory.
    #[must_use]
    pub fn classify(
        &self,
        path: &Utf8Path,
        meta: &FileMetadata,
        content: Option<&[u8]>,
    ) -> ClassificationResult {
        if meta.is_dir {
            return ClassificationResult::directory();
        }

        let file_name = path.file_name().unwrap_or_default().to_ascii_lowercase();
        let mut mode = detect_from_filename(path);
        let mut is_binary = false;
        let mut line_count = None;

        match content {
            Some(data) => {
                is_binary = looks_binary(data);
                if !is_binary {
                    line_count = Some(count_lines(data));
                    mode = self.chain.refine(&Sample::new(&file_name, mode, data));
                }
            }
            None if mode == Mode::Blank && meta.size < self.max_binary_detection_size => {
                match binary::read_sample(path) {
                    Ok(sample) => is_binary = looks_binary(&sample),
                    Err(err) => tracing::trace!(path = %path, error = %err, "sample read failed"),
                }
            }
            None => {}
        }

        let (description, type_hint, name_hint) = describe(mode, is_binary, false);
        let description = if meta.is_empty() {
            "Empty".to_owned()
        } else if description == UNKNOWN {
            self.mime
                .describe(path)
                .unwrap_or_else(|| description.to_owned())
        } else {
            description.to_owned()
        };

        ClassificationResult {
            mode,
            is_binary,
            line_count,
            description,
            type_hint,
            name_hint,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(MimeTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::DisplayHint;
    use std::fs;

    fn classify(name: &str, content: &[u8]) -> ClassificationResult {
        Classifier::default().classify(
            Utf8Path::new(name),
            &FileMetadata::file(content.len() as u64),
            Some(content),
        )
    }

    #[test]
    fn test_directory() {
        let result = Classifier::default().classify(
            Utf8Path::new("src"),
            &FileMetadata::directory(),
            None,
        );
        assert!(result.is_directory());
    }

    #[test]
    fn test_text_file_counts_lines() {
        let result = classify("main.rs", b"fn main() {}\n\n");
        assert_eq!(result.mode, Mode::Rust);
        assert!(!result.is_binary);
        assert_eq!(result.line_count, Some(2));
        assert_eq!(result.description, "Rust");
        assert_eq!(result.name_hint, DisplayHint::LightGreen);
    }

    #[test]
    fn test_nul_byte_is_binary_without_lines() {
        let result = classify("data.rs", b"abc\0def\n");
        assert!(result.is_binary);
        assert_eq!(result.line_count, None);
        assert_eq!(result.description, "Binary");
        assert_eq!(result.type_hint, DisplayHint::Red);
    }

    #[test]
    fn test_empty_file_with_content() {
        let result = classify("empty.py", b"");
        assert_eq!(result.description, "Empty");
        assert_eq!(result.line_count, Some(0));
        assert_eq!(result.mode, Mode::Python);
        assert_eq!(result.name_hint, DisplayHint::LightGreen);
    }

    #[test]
    fn test_empty_file_without_content() {
        let result = Classifier::default().classify(
            Utf8Path::new("empty.py"),
            &FileMetadata::file(0),
            None,
        );
        assert_eq!(result.description, "Empty");
        assert_eq!(result.line_count, None);
    }

    #[test]
    fn test_unknown_falls_back_to_mime() {
        let classifier = Classifier::new(MimeTable::parse("application/x-tar tar\n"));
        let result = classifier.classify(
            Utf8Path::new("/nonexistent/backup.tar"),
            &FileMetadata::file(10),
            None,
        );
        assert_eq!(result.description, "Tar");
        assert_eq!(result.mode, Mode::Blank);
        assert_eq!(result.type_hint, DisplayHint::Gray);
    }

    #[test]
    fn test_unknown_without_mime_entry() {
        let classifier = Classifier::new(MimeTable::empty());
        let result = classifier.classify(
            Utf8Path::new("/nonexistent/backup.tar"),
            &FileMetadata::file(10),
            None,
        );
        assert_eq!(result.description, UNKNOWN);
    }

    #[test]
    fn test_shebang_refines_extensionless_file() {
        let result = classify("configure", b"#!/bin/bash\nset -e\n");
        assert_eq!(result.mode, Mode::Shell);
        assert_eq!(result.description, "Shell");
    }

    #[test]
    fn test_mode_line_assembly_is_refined_to_dialect() {
        let result = classify("boot", b"; -*- asm -*-\nsection .text\nglobal _start\n");
        assert_eq!(result.mode, Mode::Nasm);
        assert_eq!(result.description, "NASM");
        assert_eq!(result.line_count, Some(3));
    }

    #[test]
    fn test_fallback_sample_detects_binary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        fs::write(&path, [0u8, 1, 2, 3, 0, 5]).unwrap();
        let path = Utf8Path::from_path(&path).unwrap();

        let result = Classifier::default().classify(path, &FileMetadata::file(6), None);
        assert!(result.is_binary);
        assert_eq!(result.description, "Binary");
        assert_eq!(result.line_count, None);
    }

    #[test]
    fn test_fallback_respects_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        fs::write(&path, [0u8; 16]).unwrap();
        let path = Utf8Path::from_path(&path).unwrap();

        let classifier = Classifier::new(MimeTable::empty()).with_max_binary_detection_size(16);
        let result = classifier.classify(path, &FileMetadata::file(16), None);
        assert!(!result.is_binary);
        assert_eq!(result.description, UNKNOWN);
    }

    #[test]
    fn test_custom_chain() {
        let classifier = Classifier::default().with_chain(DetectorChain::empty());
        let result = classifier.classify(
            Utf8Path::new("configure"),
            &FileMetadata::file(12),
            Some(b"#!/bin/bash\n"),
        );
        assert_eq!(result.mode, Mode::Blank);
    }
}
