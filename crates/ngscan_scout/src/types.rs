//! Core types for the Scout system
//!
//! Scout is the **Discovery + Classification** layer.
//! It walks a front-end tree, classifies building blocks and measures them.
//! Charts and statistics are left to whatever consumes the exported table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ============================================================================
// Building Block Types
// ============================================================================

/// Declared type of a building block.
///
/// Declaration order is the order used by overviews and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Module,
    Controller,
    Service,
    Directive,
    Factory,
    Value,
    Constant,
    /// Whole-file markup record
    Html,
}

impl BlockType {
    pub const ALL: [BlockType; 8] = [
        Self::Module,
        Self::Controller,
        Self::Service,
        Self::Directive,
        Self::Factory,
        Self::Value,
        Self::Constant,
        Self::Html,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Directive => "directive",
            Self::Factory => "factory",
            Self::Value => "value",
            Self::Constant => "constant",
            Self::Html => "html",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "module" => Some(Self::Module),
            "controller" => Some(Self::Controller),
            "service" => Some(Self::Service),
            "directive" => Some(Self::Directive),
            "factory" => Some(Self::Factory),
            "value" => Some(Self::Value),
            "constant" => Some(Self::Constant),
            "html" => Some(Self::Html),
            _ => None,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Dialects
// ============================================================================

/// Source language variant of a file; selects the extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    JavaScript,
    CoffeeScript,
    Html,
}

impl Dialect {
    /// Default scan order: scripts first, markup last.
    pub const ALL: [Dialect; 3] = [Self::JavaScript, Self::CoffeeScript, Self::Html];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::CoffeeScript => "coffeescript",
            Self::Html => "html",
        }
    }

    /// Basename globs used by the discoverer for this dialect.
    ///
    /// Matched case-insensitively; accepts exactly the extensions of
    /// [`Dialect::from_path`].
    pub fn file_patterns(&self) -> &'static [&'static str] {
        match self {
            Self::JavaScript => &["*.js"],
            Self::CoffeeScript => &["*.coffee"],
            Self::Html => &["*.html", "*.htm"],
        }
    }

    /// Resolve a dialect from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "js" => Some(Self::JavaScript),
            "coffee" => Some(Self::CoffeeScript),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Measurement
// ============================================================================

/// Level at which script files are measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One record per recognised type per file, sized by the whole file
    #[default]
    File,
    /// One record per declaration, sized by its body segment
    Block,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Block => "block",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "file" => Some(Self::File),
            "block" => Some(Self::Block),
            _ => None,
        }
    }
}

/// Extractor output before the source path is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMeasure {
    pub block_type: BlockType,
    /// Always >= 1
    pub loc: usize,
}

impl BlockMeasure {
    pub fn new(block_type: BlockType, loc: usize) -> Self {
        Self { block_type, loc }
    }
}

// ============================================================================
// Issues
// ============================================================================

/// Category of a recoverable scan problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// File could not be read as UTF-8 text
    Read,
    /// Directory entry could not be listed
    Walk,
    /// Declaration keyword with no body following it
    DanglingSegment,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Walk => "walk",
            Self::DanglingSegment => "dangling_segment",
        }
    }
}

/// A recoverable problem recorded during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanIssue {
    pub path: String,
    pub kind: IssueKind,
    pub message: String,
}

impl ScanIssue {
    pub fn new(path: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}
