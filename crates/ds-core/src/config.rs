//! Configuration structures for the dirscope tool.
//!
//! - [`ScanConfig`] - Walk settings (root, depth, hidden/ignore handling, threads)
//! - [`ClassifyConfig`] - Content classification settings (read limits, MIME table)
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] and deserialize with
//! `#[serde(default)]`, so a configuration file only needs the fields it
//! overrides.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest file that is sampled to settle the binary/text question when the
/// filename alone says nothing (1 GiB).
pub const DEFAULT_MAX_BINARY_DETECTION_SIZE: u64 = 1024 * 1024 * 1024;

/// Files at or above this size are not read for classification.
pub const DEFAULT_READ_SIZE_THRESHOLD: u64 = 1000 * 1024;

/// Configuration for the directory walk.
///
/// # Examples
///
/// ```
/// use ds_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert!(config.respect_ignore_files);
/// assert!(config.respect_hidden_files);
/// assert_eq!(config.max_depth, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Root directory of the walk.
    pub root_path: Utf8PathBuf,

    /// Treat lines of a top-level `.ignore`/`.gitignore` as ignore rules.
    pub respect_ignore_files: bool,

    /// Skip nested dotfiles and treat top-level dotfiles as ignored.
    pub respect_hidden_files: bool,

    /// Maximum number of path segments below the root that are recorded.
    pub max_depth: usize,

    /// Number of walker threads. `None` means use all available CPU cores.
    pub threads: Option<usize>,

    /// Whether to follow symbolic links.
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root_path: Utf8PathBuf::from("."),
            respect_ignore_files: true,
            respect_hidden_files: true,
            max_depth: 1,
            threads: None,
            follow_links: false,
        }
    }
}

impl ScanConfig {
    /// Checks option values that serde cannot reject on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_core::ScanConfig;
    ///
    /// let mut config = ScanConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.max_depth = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::invalid_option(
                "max_depth",
                "must be at least 1",
            ));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::invalid_option("threads", "must be positive"));
        }
        Ok(())
    }
}

/// Configuration for file classification.
///
/// # Examples
///
/// ```
/// use ds_core::ClassifyConfig;
///
/// let config = ClassifyConfig::default();
/// assert!(config.enabled);
/// assert!(config.mime_types_path.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Whether regular files are classified after the walk.
    pub enabled: bool,

    /// Files smaller than this many bytes have their content read.
    pub read_size_threshold: u64,

    /// Files smaller than this many bytes may be sampled when the filename
    /// gives no label.
    pub max_binary_detection_size: u64,

    /// Optional `mime.types` file replacing the built-in MIME table.
    pub mime_types_path: Option<Utf8PathBuf>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            read_size_threshold: DEFAULT_READ_SIZE_THRESHOLD,
            max_binary_detection_size: DEFAULT_MAX_BINARY_DETECTION_SIZE,
            mime_types_path: None,
        }
    }
}

/// Root configuration for the dirscope tool.
///
/// # Examples
///
/// ```
/// use ds_core::Config;
///
/// let config = Config::from_json_str(r#"{"scan": {"max_depth": 3}}"#)?;
/// assert_eq!(config.scan.max_depth, 3);
/// assert!(config.classify.enabled);
/// # Ok::<(), ds_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Walk configuration.
    pub scan: ScanConfig,

    /// Classification configuration.
    pub classify: ClassifyConfig,
}

impl Config {
    /// Parses a configuration from JSON, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.scan.validate()?;
        Ok(config)
    }

    /// Loads a configuration file from disk.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_std_path()).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
