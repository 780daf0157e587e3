//! Output formatting utilities for CLI commands

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use ngscan_scout::{BlockType, Inventory};

/// Build a table with the standard preset and cyan headers.
pub fn build_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    table
}

/// Per-type overview: count and line statistics, or `no data` when empty.
pub fn render_overview(inventory: &Inventory) -> String {
    let summary = inventory.summary();
    if summary.is_empty() {
        return "no data".to_string();
    }

    let rows = summary
        .iter()
        .map(|(block_type, stats)| {
            vec![
                block_type.to_string(),
                stats.count.to_string(),
                stats.total_loc.to_string(),
                format!("{:.1}", stats.mean_loc),
                stats.min_loc.to_string(),
                stats.max_loc.to_string(),
            ]
        })
        .collect();

    build_table(&["Type", "Count", "LOC", "Mean", "Min", "Max"], rows).to_string()
}

/// Display color for a block type
pub fn color_for_block_type(block_type: BlockType) -> Color {
    match block_type {
        BlockType::Module => Color::Magenta,
        BlockType::Controller => Color::Green,
        BlockType::Service | BlockType::Factory => Color::Blue,
        BlockType::Directive => Color::Yellow,
        BlockType::Value | BlockType::Constant => Color::Grey,
        BlockType::Html => Color::Cyan,
    }
}
