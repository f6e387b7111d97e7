//! Core types, errors, and configuration for the dirscope tool.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - Configuration structures ([`Config`], [`ScanConfig`], [`ClassifyConfig`])
//! - Error types ([`ConfigError`])
//! - Domain types ([`Findings`], [`FileMetadata`], [`GitInfo`], [`Mode`],
//!   [`ClassificationResult`])
//! - The `FxHashMap` alias (faster than std for path keys)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ClassifyConfig, Config, ScanConfig};
pub use error::ConfigError;
pub use types::{
    ClassificationResult, DisplayHint, FileMetadata, Findings, GitInfo, Mode, ModeFamily,
};

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
///
/// Keys in this workspace are short relative paths, where Fx is considerably
/// faster than SipHash. No denial-of-service resistance is needed.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
