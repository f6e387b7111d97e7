//! Domain types for the dirscope tool.
//!
//! # Module Organization
//!
//! - [`mode`] - Content-type labels and their families
//! - [`classification`] - Per-file classification results and display hints
//! - [`metadata`] - Filesystem metadata captured at visit time
//! - [`findings`] - The aggregated result of one directory walk
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use ds_core::{ClassificationResult, Findings, Mode};
//! ```

mod classification;
mod findings;
mod metadata;
mod mode;

pub use classification::{ClassificationResult, DisplayHint};
pub use findings::{Findings, GitInfo};
pub use metadata::FileMetadata;
pub use mode::{Mode, ModeFamily};
