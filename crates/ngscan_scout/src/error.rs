//! Error types for the Scout system

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Scout error type
///
/// Only fatal conditions live here. Per-file problems are reported as
/// [`crate::types::ScanIssue`] values and never abort a scan.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("Cannot read root directory: {}", .0.display())]
    RootNotReadable(PathBuf),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ScoutError>;
