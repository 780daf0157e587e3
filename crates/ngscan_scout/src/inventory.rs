//! Inventory of classified building blocks
//!
//! The inventory is built once, in discovery order, and read-only afterwards.
//! It is the table handed to reporting: `path,type,loc`. Raw source text is
//! never part of it.

use crate::error::Result;
use crate::types::{BlockMeasure, BlockType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

/// Export column order
pub const CSV_HEADER: [&str; 3] = ["path", "type", "loc"];

/// One classified building block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Path relative to the project root
    pub path: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub loc: usize,
}

impl BlockRecord {
    pub fn new(path: impl Into<String>, block_type: BlockType, loc: usize) -> Self {
        Self {
            path: path.into(),
            block_type,
            loc,
        }
    }

    /// Attach a source path to extractor output.
    pub fn from_measures(path: &str, measures: Vec<BlockMeasure>) -> Vec<Self> {
        measures
            .into_iter()
            .map(|m| Self::new(path, m.block_type, m.loc))
            .collect()
    }
}

/// Per-type size statistics for the console summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSummary {
    pub count: usize,
    pub total_loc: usize,
    pub min_loc: usize,
    pub max_loc: usize,
    pub mean_loc: f64,
}

/// Ordered collection of building-block records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    records: Vec<BlockRecord>,
}

impl Inventory {
    /// Concatenate record groups, keeping group order and each group's order.
    pub fn build<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = Vec<BlockRecord>>,
    {
        Self {
            records: groups.into_iter().flatten().collect(),
        }
    }

    pub fn records(&self) -> &[BlockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Type → count, one per record regardless of `loc`.
    pub fn overview(&self) -> BTreeMap<BlockType, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.block_type).or_insert(0) += 1;
        }
        counts
    }

    /// Type → size statistics. Types with no records are absent.
    pub fn summary(&self) -> BTreeMap<BlockType, TypeSummary> {
        let mut grouped: BTreeMap<BlockType, Vec<usize>> = BTreeMap::new();
        for record in &self.records {
            grouped.entry(record.block_type).or_default().push(record.loc);
        }

        grouped
            .into_iter()
            .filter_map(|(block_type, locs)| {
                let count = locs.len();
                let total_loc: usize = locs.iter().sum();
                let min_loc = *locs.iter().min()?;
                let max_loc = *locs.iter().max()?;
                Some((
                    block_type,
                    TypeSummary {
                        count,
                        total_loc,
                        min_loc,
                        max_loc,
                        mean_loc: total_loc as f64 / count as f64,
                    },
                ))
            })
            .collect()
    }

    /// Write `path,type,loc` CSV. The header row is written even when empty.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;
        for record in &self.records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write `{ "overview": {...}, "records": [...] }` JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        #[derive(Serialize)]
        struct Export<'a> {
            overview: BTreeMap<BlockType, usize>,
            records: &'a [BlockRecord],
        }

        serde_json::to_writer_pretty(
            writer,
            &Export {
                overview: self.overview(),
                records: &self.records,
            },
        )?;
        Ok(())
    }
}

impl FromIterator<BlockRecord> for Inventory {
    fn from_iter<T: IntoIterator<Item = BlockRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
