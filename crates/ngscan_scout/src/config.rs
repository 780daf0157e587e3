//! Configuration for the Scout system

use crate::error::{Result, ScoutError};
use crate::types::{Dialect, Granularity};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Exclusions applied when nothing else is configured.
///
/// Vendored packages, build output, minified bundles and tool state.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "**/node_modules/**",
    "**/dist/**",
    "**/*.min.js",
    "**/.sonarqube/**",
    ".git/**",
];

/// Main configuration for a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Project root to walk
    pub root: PathBuf,

    /// Glob patterns excluding directories and files
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// File-level tagging or block-level splitting
    #[serde(default)]
    pub granularity: Granularity,

    /// Dialects to scan, in output order
    #[serde(default = "default_dialects")]
    pub dialects: Vec<Dialect>,
}

fn default_ignore_patterns() -> Vec<String> {
    DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect()
}

fn default_dialects() -> Vec<Dialect> {
    Dialect::ALL.to_vec()
}

impl ScanConfig {
    /// Config for `root` with the default ignore list, granularity and dialects.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_patterns: default_ignore_patterns(),
            granularity: Granularity::default(),
            dialects: default_dialects(),
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_dialects(mut self, dialects: Vec<Dialect>) -> Self {
        self.dialects = dialects;
        self
    }

    /// Split a comma-separated ignore list, dropping blank entries.
    pub fn parse_ignore_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ScanConfig =
            toml::from_str(&content).map_err(|e| ScoutError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ScoutError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Check that `root` exists, is a directory and can be listed.
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(ScoutError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScoutError::RootNotDirectory(root.to_path_buf()));
    }
    if std::fs::read_dir(root).is_err() {
        return Err(ScoutError::RootNotReadable(root.to_path_buf()));
    }
    Ok(())
}
