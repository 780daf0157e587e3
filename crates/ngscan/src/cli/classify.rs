//! Classify command - Show the building blocks found in one file

use crate::cli::error::HelpfulError;
use crate::cli::output::{build_table, color_for_block_type};
use crate::cli::scan::GranularityArg;
use comfy_table::Cell;
use ngscan_scout::{extractor_for, BlockRecord, BlockType, Dialect, Granularity};
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the classify command
#[derive(Debug)]
pub struct ClassifyArgs {
    pub file: PathBuf,
    pub granularity: GranularityArg,
    pub json: bool,
}

/// Classification of a single file
#[derive(Debug, Serialize)]
pub struct ClassifyResult {
    pub path: String,
    pub dialect: Dialect,
    pub granularity: Granularity,
    pub records: Vec<BlockRecord>,
    /// Declarations with no body (block granularity only)
    pub dangling: Vec<BlockType>,
}

/// Execute the classify command
pub fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    let result = classify(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output_table(&result);
    }
    Ok(())
}

fn classify(args: &ClassifyArgs) -> anyhow::Result<ClassifyResult> {
    let path = &args.file;
    if !path.exists() {
        return Err(HelpfulError::file_not_found(path).into());
    }
    if path.is_dir() {
        return Err(HelpfulError::new(format!("Is a directory: {}", path.display()))
            .with_context("The classify command expects a single source file")
            .with_suggestion(format!("TRY: Scan the directory: ngscan scan {}", path.display()))
            .into());
    }

    let dialect = Dialect::from_path(path).ok_or_else(|| HelpfulError::unknown_dialect(path))?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| HelpfulError::cannot_read_file(path, &e.to_string()))?;

    let extractor = extractor_for(dialect);
    let granularity = Granularity::from(args.granularity);
    let (measures, dangling) = match granularity {
        Granularity::File => (extractor.classify_file(&content), Vec::new()),
        Granularity::Block => {
            let split = extractor.split_blocks(&content);
            (split.blocks, split.dangling)
        }
    };

    let display_path = path.to_string_lossy().replace('\\', "/");
    Ok(ClassifyResult {
        records: BlockRecord::from_measures(&display_path, measures),
        path: display_path,
        dialect,
        granularity,
        dangling,
    })
}

fn output_table(result: &ClassifyResult) {
    if result.records.is_empty() {
        println!("No building blocks found in: {}", result.path);
    } else {
        println!("{} ({}, {} granularity)", result.path, result.dialect, result.granularity.as_str());
        let mut table = build_table(&["Type", "LOC"], Vec::new());
        for record in &result.records {
            table.add_row(vec![
                Cell::new(record.block_type).fg(color_for_block_type(record.block_type)),
                Cell::new(record.loc),
            ]);
        }
        println!("{}", table);
    }

    for block_type in &result.dangling {
        eprintln!("Warning: {} declaration has no body", block_type);
    }
}
