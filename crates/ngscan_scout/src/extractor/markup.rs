//! Markup extraction: every template is one `html` block.

use super::{count_lines, BlockSplit, DeclarationExtractor};
use crate::types::{BlockMeasure, BlockType, Dialect};

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupExtractor;

impl DeclarationExtractor for MarkupExtractor {
    fn dialect(&self) -> Dialect {
        Dialect::Html
    }

    fn classify_file(&self, content: &str) -> Vec<BlockMeasure> {
        vec![BlockMeasure::new(BlockType::Html, count_lines(content))]
    }

    fn split_blocks(&self, content: &str) -> BlockSplit {
        BlockSplit {
            blocks: self.classify_file(content),
            dangling: Vec::new(),
        }
    }
}
