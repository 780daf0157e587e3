//! Scan pipeline: discover → read → extract → inventory
//!
//! # Design
//!
//! - Configuration is validated before any file is opened
//! - The tree is walked once; files are grouped by dialect in configured order
//! - Every file is read once and its content dropped after extraction
//! - Unreadable files and dangling declarations become issues and are logged

use crate::config::{validate_root, ScanConfig};
use crate::discovery::{discover, SourceFile};
use crate::error::Result;
use crate::extractor::extractor_for;
use crate::inventory::{BlockRecord, Inventory};
use crate::patterns::IgnoreSet;
use crate::types::{Dialect, Granularity, IssueKind, ScanIssue};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files_discovered: u64,
    pub files_classified: u64,
    pub files_skipped: u64,
    pub dirs_pruned: u64,
    pub records: u64,
    pub duration_ms: u64,
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanReport {
    pub inventory: Inventory,
    /// Recoverable problems encountered during the scan
    pub issues: Vec<ScanIssue>,
    pub stats: ScanStats,
}

/// Building-block scanner for one project root
pub struct Scanner {
    config: ScanConfig,
    ignore: IgnoreSet,
}

impl Scanner {
    /// Validate the root and compile ignore patterns.
    pub fn new(config: ScanConfig) -> Result<Self> {
        validate_root(&config.root)?;
        let ignore = IgnoreSet::new(&config.ignore_patterns)?;
        Ok(Self { config, ignore })
    }

    /// Scan using the configured granularity.
    pub fn scan(&self) -> Result<ScanReport> {
        self.scan_with(self.config.granularity)
    }

    /// Scan at an explicit granularity.
    pub fn scan_with(&self, granularity: Granularity) -> Result<ScanReport> {
        let start = Instant::now();
        info!(
            root = %self.config.root.display(),
            granularity = granularity.as_str(),
            patterns = self.ignore.len(),
            "Starting scan"
        );
        debug!(ignore = ?self.ignore.patterns().collect::<Vec<_>>(), "Ignore patterns");

        let mut dialects: Vec<Dialect> = Vec::with_capacity(self.config.dialects.len());
        for dialect in &self.config.dialects {
            if !dialects.contains(dialect) {
                dialects.push(*dialect);
            }
        }

        let discovery = discover(&self.config.root, &dialects, &self.ignore)?;
        debug!(
            files = discovery.files.len(),
            pruned = discovery.pruned_dirs.len(),
            walk_issues = discovery.issues.len(),
            "Discovery complete"
        );

        let mut stats = ScanStats {
            files_discovered: discovery.files.len() as u64,
            dirs_pruned: discovery.pruned_dirs.len() as u64,
            ..ScanStats::default()
        };
        let mut issues = discovery.issues;
        let mut groups = Vec::with_capacity(dialects.len());

        for dialect in &dialects {
            let mut group = Vec::new();
            for file in discovery.files.iter().filter(|f| f.dialect == *dialect) {
                match classify_source(file, granularity, &mut issues) {
                    Some(records) => {
                        stats.files_classified += 1;
                        group.extend(records);
                    }
                    None => stats.files_skipped += 1,
                }
            }
            debug!(dialect = dialect.as_str(), records = group.len(), "Dialect classified");
            groups.push(group);
        }

        let inventory = Inventory::build(groups);
        stats.records = inventory.len() as u64;
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            discovered = stats.files_discovered,
            classified = stats.files_classified,
            skipped = stats.files_skipped,
            pruned = stats.dirs_pruned,
            records = stats.records,
            issues = issues.len(),
            duration_ms = stats.duration_ms,
            "Scan complete"
        );

        Ok(ScanReport {
            inventory,
            issues,
            stats,
        })
    }
}

/// Read and classify one file. `None` means the file was skipped.
pub fn classify_source(
    file: &SourceFile,
    granularity: Granularity,
    issues: &mut Vec<ScanIssue>,
) -> Option<Vec<BlockRecord>> {
    let content = match file.read_content() {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %file.rel_path, error = %e, "Skipping unreadable file");
            issues.push(ScanIssue::new(&file.rel_path, IssueKind::Read, e.to_string()));
            return None;
        }
    };

    let extractor = extractor_for(file.dialect);
    let measures = match granularity {
        Granularity::File => extractor.classify_file(&content),
        Granularity::Block => {
            let split = extractor.split_blocks(&content);
            for block_type in split.dangling {
                warn!(
                    path = %file.rel_path,
                    block_type = block_type.as_str(),
                    "Skipping declaration with no body"
                );
                issues.push(ScanIssue::new(
                    &file.rel_path,
                    IssueKind::DanglingSegment,
                    format!("{} declaration has no body", block_type),
                ));
            }
            split.blocks
        }
    };

    Some(BlockRecord::from_measures(&file.rel_path, measures))
}
