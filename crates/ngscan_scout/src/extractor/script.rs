//! Script extraction for JavaScript and CoffeeScript.
//!
//! Both dialects share one strategy and differ only in their pattern tables.
//! CoffeeScript calls may drop parentheses and use `->`/`=>` instead of
//! `function`, and it also recognises `.constant`.

use super::{count_lines, BlockSplit, DeclarationExtractor};
use crate::types::{BlockMeasure, BlockType, Dialect};
use regex::Regex;
use std::sync::LazyLock;

type PatternTable = Vec<(BlockType, Regex)>;

// File-level idioms, checked independently against the whole file
static JS_PATTERNS: LazyLock<PatternTable> = LazyLock::new(|| {
    compile_table(&[
        (
            BlockType::Module,
            r#"(?s)angular\s*\.\s*module\(['"]([^'"]+)['"],\s*\[[^\]]*?\]\)"#,
        ),
        (
            BlockType::Controller,
            r#"(?s)\.controller\(['"]([^'"]+)['"],(\s*\[.*?,)?\s*function"#,
        ),
        (
            BlockType::Service,
            r#"(?s)\.service\(['"]([^'"]+)['"],(\s*\[.*?,)?\s*function"#,
        ),
        (
            BlockType::Directive,
            r#"(?s)\.directive\(['"]([^'"]+)['"],(\s*\[.*?,)?\s*function"#,
        ),
        (
            BlockType::Factory,
            r#"(?s)\.factory\(['"]([^'"]+)['"],(\s*\[.*?,)?\s*function"#,
        ),
        (
            BlockType::Value,
            r#"(?s)\.value\(['"]([^'"]+)['"],\s*\[[^\]]*?\]\)"#,
        ),
    ])
});

static COFFEE_PATTERNS: LazyLock<PatternTable> = LazyLock::new(|| {
    compile_table(&[
        (
            BlockType::Module,
            r#"(?s)angular\s*\.\s*module\s*\(?\s*['"]([^'"]+)['"]\s*,\s*\["#,
        ),
        (
            BlockType::Controller,
            r#"(?s)\.controller\s*\(?\s*['"]([^'"]+)['"]\s*,(\s*\[.*?,)?\s*(\([^)]*\)\s*)?[-=]>"#,
        ),
        (
            BlockType::Service,
            r#"(?s)\.service\s*\(?\s*['"]([^'"]+)['"]\s*,(\s*\[.*?,)?\s*(\([^)]*\)\s*)?[-=]>"#,
        ),
        (
            BlockType::Directive,
            r#"(?s)\.directive\s*\(?\s*['"]([^'"]+)['"]\s*,(\s*\[.*?,)?\s*(\([^)]*\)\s*)?[-=]>"#,
        ),
        (
            BlockType::Factory,
            r#"(?s)\.factory\s*\(?\s*['"]([^'"]+)['"]\s*,(\s*\[.*?,)?\s*(\([^)]*\)\s*)?[-=]>"#,
        ),
        (
            BlockType::Value,
            r#"(?s)\.value\s*\(?\s*['"]([^'"]+)['"]\s*,"#,
        ),
        (
            BlockType::Constant,
            r#"(?s)\.constant\s*\(?\s*['"]([^'"]+)['"]\s*,"#,
        ),
    ])
});

// Block-level split points: keyword, quoted name, start of the parameter list
static JS_SPLITTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.(module|controller|service|directive|factory|value)\(\s*['"][^'"]+['"]\s*,"#)
        .unwrap()
});

static COFFEE_SPLITTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\.(module|controller|service|directive|factory|value|constant)\s*\(?\s*['"][^'"]+['"]\s*,"#,
    )
    .unwrap()
});

fn compile_table(sources: &[(BlockType, &str)]) -> PatternTable {
    sources
        .iter()
        .map(|(block_type, src)| (*block_type, Regex::new(src).unwrap()))
        .collect()
}

pub static JS_EXTRACTOR: ScriptExtractor = ScriptExtractor {
    dialect: Dialect::JavaScript,
    patterns: &JS_PATTERNS,
    splitter: &JS_SPLITTER,
};

pub static COFFEE_EXTRACTOR: ScriptExtractor = ScriptExtractor {
    dialect: Dialect::CoffeeScript,
    patterns: &COFFEE_PATTERNS,
    splitter: &COFFEE_SPLITTER,
};

/// Pattern-table extractor for script dialects
pub struct ScriptExtractor {
    dialect: Dialect,
    patterns: &'static LazyLock<PatternTable>,
    splitter: &'static LazyLock<Regex>,
}

impl ScriptExtractor {
    /// Types whose idiom appears anywhere in `content`, in table order.
    pub fn matched_types(&self, content: &str) -> Vec<BlockType> {
        self.patterns
            .iter()
            .filter(|(_, pattern)| pattern.is_match(content))
            .map(|(block_type, _)| *block_type)
            .collect()
    }

    /// Alternating (keyword, body) pairs; text before the first declaration
    /// is dropped. Bodies are disjoint slices of `content`.
    pub fn segments<'a>(&self, content: &'a str) -> Vec<(BlockType, &'a str)> {
        let heads: Vec<(BlockType, usize, usize)> = self
            .splitter
            .captures_iter(content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let block_type = BlockType::parse(caps.get(1)?.as_str())?;
                Some((block_type, whole.start(), whole.end()))
            })
            .collect();

        heads
            .iter()
            .enumerate()
            .map(|(idx, (block_type, _, body_start))| {
                let body_end = heads.get(idx + 1).map_or(content.len(), |next| next.1);
                (*block_type, &content[*body_start..body_end])
            })
            .collect()
    }
}

impl DeclarationExtractor for ScriptExtractor {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn classify_file(&self, content: &str) -> Vec<BlockMeasure> {
        let loc = count_lines(content);
        self.matched_types(content)
            .into_iter()
            .map(|block_type| BlockMeasure::new(block_type, loc))
            .collect()
    }

    fn split_blocks(&self, content: &str) -> BlockSplit {
        let mut split = BlockSplit::default();
        for (block_type, body) in self.segments(content) {
            if body.trim().is_empty() {
                split.dangling.push(block_type);
                continue;
            }
            split.blocks.push(BlockMeasure::new(block_type, count_lines(body)));
        }
        split
    }
}
