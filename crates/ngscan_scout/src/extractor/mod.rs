//! Declaration extraction
//!
//! Each dialect provides a [`DeclarationExtractor`] with two measurement
//! levels:
//!
//! - [`DeclarationExtractor::classify_file`]: "does this file contain an X";
//!   one record per recognised type, sized by the whole file
//! - [`DeclarationExtractor::split_blocks`]: "how large is each X"; the text is
//!   cut at every declaration and each body is measured on its own
//!
//! Recognition is plain regex over raw text. No parsing happens here.

mod markup;
mod script;

pub use markup::MarkupExtractor;
pub use script::{ScriptExtractor, COFFEE_EXTRACTOR, JS_EXTRACTOR};

use crate::types::{BlockMeasure, BlockType, Dialect};

/// Block-level extraction output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSplit {
    pub blocks: Vec<BlockMeasure>,
    /// Declarations that had no body after them, in file order
    pub dangling: Vec<BlockType>,
}

/// Dialect-specific building-block extraction
pub trait DeclarationExtractor: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// File-level mode: each recognised type yields one record whose `loc`
    /// is the line count of the whole content.
    fn classify_file(&self, content: &str) -> Vec<BlockMeasure>;

    /// Block-level mode: one record per declaration, sized by the text that
    /// follows it up to the next declaration.
    fn split_blocks(&self, content: &str) -> BlockSplit;
}

/// Number of newline-separated segments: `count('\n') + 1`.
///
/// A file ending in a newline counts one more than its visible last line.
pub fn count_lines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count() + 1
}

static HTML_EXTRACTOR: MarkupExtractor = MarkupExtractor;

/// Extractor for a dialect.
pub fn extractor_for(dialect: Dialect) -> &'static dyn DeclarationExtractor {
    match dialect {
        Dialect::JavaScript => &JS_EXTRACTOR,
        Dialect::CoffeeScript => &COFFEE_EXTRACTOR,
        Dialect::Html => &HTML_EXTRACTOR,
    }
}
