//! Ignore-pattern compilation and matching.
//!
//! Patterns use `glob` with its default match options, so a single `*` also
//! crosses `/`. Candidates are matched as whole strings, which keeps
//! `**/node_modules/**`-style patterns forgiving about where the directory
//! sits in the path.
//!
//! `glob` only accepts `**` as a whole path component. `fnmatch`-style
//! patterns such as `**.min.js` or `node_modules**` are accepted by folding
//! every other run of `*` into a single `*`, which matches the same strings.

use crate::error::{Result, ScoutError};
use glob::Pattern;

/// Compile a single glob pattern, mapping syntax errors to [`ScoutError::Pattern`].
pub fn compile_pattern(raw: &str) -> Result<Pattern> {
    Pattern::new(&normalize_wildcards(raw)).map_err(|e| ScoutError::Pattern {
        pattern: raw.to_string(),
        message: e.to_string(),
    })
}

/// Collapse `*` runs: a run forming a whole path component stays `**`, any
/// other run becomes `*`. Character classes are copied untouched.
fn normalize_wildcards(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '[' => {
                // `]` directly after `[` or `[!` is a literal member
                let start = i;
                i += 1;
                if chars.get(i) == Some(&'!') {
                    i += 1;
                }
                if chars.get(i) == Some(&']') {
                    i += 1;
                }
                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }
                i = (i + 1).min(chars.len());
                out.extend(&chars[start..i]);
            }
            '*' => {
                let start = i;
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                let starts_component = start == 0 || chars[start - 1] == '/';
                let ends_component = i == chars.len() || chars[i] == '/';
                if i - start > 1 && starts_component && ends_component {
                    out.push_str("**");
                } else {
                    out.push('*');
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// A compiled set of ignore patterns
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    /// Compile every pattern up front; the first invalid one is an error.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let compiled = patterns
            .iter()
            .map(|p| compile_pattern(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns: compiled })
    }

    /// True iff `path` matches any pattern.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    /// True iff any candidate matches any pattern.
    pub fn is_any_ignored<'a>(&self, mut candidates: impl Iterator<Item = &'a str>) -> bool {
        candidates.any(|c| self.is_ignored(c))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Source text of the compiled patterns, in configuration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.as_str())
    }
}

/// One-off match of `path` against raw patterns.
pub fn is_ignored<S: AsRef<str>>(path: &str, patterns: &[S]) -> Result<bool> {
    Ok(IgnoreSet::new(patterns)?.is_ignored(path))
}
