//! ngscan Scout - Building-Block Discovery & Classification
//!
//! Scout walks a legacy AngularJS-era front-end tree, classifies each source
//! file's building blocks (modules, controllers, services, directives,
//! factories, values, constants) by pattern matching over raw text, and
//! produces a flat inventory for downstream reporting.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌───────────────┐
//! │ Path Filter │     │ Discoverer  │     │  Extractor  │     │   Inventory   │
//! │  (ignore    │────▶│ (pruned     │────▶│ (dialect →  │────▶│ (path, type,  │
//! │   globs)    │     │   walk)     │     │   blocks)   │     │     loc)      │
//! └─────────────┘     └─────────────┘     └─────────────┘     └───────────────┘
//! ```
//!
//! # Core Concepts
//!
//! - **Dialect**: JavaScript, CoffeeScript or HTML; selects the extractor
//! - **Granularity**: file-level tagging or block-level splitting
//! - **BlockRecord**: one classified building block with its size in lines
//! - **Inventory**: ordered records plus a type → count overview

pub mod config;
pub mod discovery;
pub mod error;
pub mod extractor;
pub mod inventory;
pub mod patterns;
pub mod scanner;
pub mod types;

// Re-exports for convenience
pub use config::{validate_root, ScanConfig, DEFAULT_IGNORE_PATTERNS};
pub use discovery::{discover, find_files, Discovery, SourceFile};
pub use error::{Result, ScoutError};
pub use extractor::{count_lines, extractor_for, BlockSplit, DeclarationExtractor};
pub use inventory::{BlockRecord, Inventory, TypeSummary};
pub use patterns::{is_ignored, IgnoreSet};
pub use scanner::{ScanReport, ScanStats, Scanner};
pub use types::{BlockMeasure, BlockType, Dialect, Granularity, IssueKind, ScanIssue};
