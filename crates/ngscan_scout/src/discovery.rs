//! File discovery with ignore-pattern pruning
//!
//! # Design
//!
//! - Walk top-down with `walkdir`, sorted by file name for reproducible output
//! - Ignored directories are rejected in `filter_entry`, so they are never opened
//! - One walk serves every dialect; a file takes the first dialect whose
//!   basename globs match
//! - Files are kept when no ignore pattern matches the full or relative path
//! - Unreadable entries below the root become issues, not errors

use crate::error::Result;
use crate::patterns::{compile_pattern, IgnoreSet};
use crate::types::{Dialect, IssueKind, ScanIssue};
use glob::MatchOptions;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Normalize a path to use forward slashes consistently.
pub(crate) fn normalize_path_to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A discovered source file. Content is loaded later, once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute (or root-joined) path
    pub path: PathBuf,
    /// Forward-slash path relative to the walk root
    pub rel_path: String,
    pub dialect: Dialect,
}

impl SourceFile {
    /// Read the full content as UTF-8 text.
    pub fn read_content(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// Result of a discovery walk
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<SourceFile>,
    /// Relative paths of directories that were pruned
    pub pruned_dirs: Vec<String>,
    pub issues: Vec<ScanIssue>,
}

/// Basename matching is case-insensitive and ignores path separators.
const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Find files of every dialect in `dialects` with a single pruned walk.
///
/// Each file is tagged with the first dialect whose
/// [`Dialect::file_patterns`] match its basename.
pub fn discover(base_dir: &Path, dialects: &[Dialect], ignore: &IgnoreSet) -> Result<Discovery> {
    let mut matchers = Vec::with_capacity(dialects.len());
    for dialect in dialects {
        let patterns = dialect
            .file_patterns()
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>>>()?;
        matchers.push((*dialect, patterns));
    }

    Ok(walk(base_dir, ignore, |file_name| {
        matchers
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| p.matches_with(file_name, NAME_MATCH)))
            .map(|(dialect, _)| *dialect)
    }))
}

/// Find files of `dialect` under `base_dir`, pruning ignored subtrees.
///
/// `file_pattern` is matched against the basename only. Fails only on an
/// invalid `file_pattern`; walk problems are collected as issues.
pub fn find_files(
    base_dir: &Path,
    file_pattern: &str,
    dialect: Dialect,
    ignore: &IgnoreSet,
) -> Result<Discovery> {
    let name_pattern = compile_pattern(file_pattern)?;
    Ok(walk(base_dir, ignore, |file_name| {
        name_pattern
            .matches_with(file_name, NAME_MATCH)
            .then_some(dialect)
    }))
}

fn walk<F>(base_dir: &Path, ignore: &IgnoreSet, mut dialect_of: F) -> Discovery
where
    F: FnMut(&str) -> Option<Dialect>,
{
    let pruned: RefCell<Vec<String>> = RefCell::new(Vec::new());
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(base_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            if is_ignored_dir(entry, base_dir, ignore) {
                let rel = relative_to(entry.path(), base_dir);
                debug!(path = %rel, "Pruning ignored directory");
                pruned.borrow_mut().push(rel);
                return false;
            }
            true
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                warn!(path = %path, error = %e, "Skipping unreadable entry");
                discovery
                    .issues
                    .push(ScanIssue::new(path, IssueKind::Walk, e.to_string()));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(dialect) = dialect_of(&entry.file_name().to_string_lossy()) else {
            continue;
        };

        let full_path = entry.path().to_string_lossy().into_owned();
        let rel_path = relative_to(entry.path(), base_dir);
        if ignore.is_any_ignored([full_path.as_str(), rel_path.as_str()].into_iter()) {
            debug!(path = %rel_path, "Skipping ignored file");
            continue;
        }

        discovery.files.push(SourceFile {
            path: entry.path().to_path_buf(),
            rel_path,
            dialect,
        });
    }

    discovery.pruned_dirs = pruned.into_inner();
    discovery
}

/// Directory candidates carry a trailing `/` so `**/name/**` patterns match
/// the directory itself.
fn is_ignored_dir(entry: &DirEntry, base_dir: &Path, ignore: &IgnoreSet) -> bool {
    let rel = format!("{}/", relative_to(entry.path(), base_dir));
    let full = format!("{}/", entry.path().to_string_lossy().trim_end_matches('/'));
    ignore.is_any_ignored([rel.as_str(), full.as_str()].into_iter())
}

fn relative_to(path: &Path, base_dir: &Path) -> String {
    path.strip_prefix(base_dir)
        .map(normalize_path_to_forward_slashes)
        .unwrap_or_else(|_| normalize_path_to_forward_slashes(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_IGNORE_PATTERNS;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> std::io::Result<()> {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn rel_paths(discovery: &Discovery) -> Vec<&str> {
        discovery.files.iter().map(|f| f.rel_path.as_str()).collect()
    }

    #[test]
    fn test_find_empty_directory() {
        let temp = TempDir::new().unwrap();
        let ignore = IgnoreSet::new(DEFAULT_IGNORE_PATTERNS).unwrap();
        let found = find_files(temp.path(), "*.js", Dialect::JavaScript, &ignore).unwrap();
        assert!(found.files.is_empty());
        assert!(found.issues.is_empty());
    }

    #[test]
    fn test_find_matches_basename_pattern() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "app.js", "").unwrap();
        create_test_file(temp.path(), "src/ctrl.js", "").unwrap();
        create_test_file(temp.path(), "src/view.html", "").unwrap();
        create_test_file(temp.path(), "src/util.coffee", "").unwrap();

        let ignore = IgnoreSet::default();
        let found = find_files(temp.path(), "*.js", Dialect::JavaScript, &ignore).unwrap();
        assert_eq!(rel_paths(&found), vec!["app.js", "src/ctrl.js"]);
        assert!(found.files.iter().all(|f| f.dialect == Dialect::JavaScript));
        assert!(found.files[1].path.ends_with("src/ctrl.js"));
    }

    #[test]
    fn test_find_prunes_ignored_directories() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "src/app.js", "").unwrap();
        create_test_file(temp.path(), "dist/app.js", "").unwrap();
        create_test_file(temp.path(), "node_modules/angular/angular.js", "").unwrap();
        create_test_file(temp.path(), "src/vendor/jquery.min.js", "").unwrap();
        create_test_file(temp.path(), ".git/hooks/pre-commit.js", "").unwrap();

        let ignore = IgnoreSet::new(DEFAULT_IGNORE_PATTERNS).unwrap();
        let found = find_files(temp.path(), "*.js", Dialect::JavaScript, &ignore).unwrap();

        assert_eq!(rel_paths(&found), vec!["src/app.js"]);
        assert!(found.pruned_dirs.contains(&"dist".to_string()));
        assert!(found.pruned_dirs.contains(&"node_modules".to_string()));
        assert!(found.pruned_dirs.contains(&".git".to_string()));
    }

    #[test]
    fn test_find_prunes_nested_ignored_directory() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "packages/web/dist/bundle.js", "").unwrap();
        create_test_file(temp.path(), "packages/web/src/main.js", "").unwrap();

        let ignore = IgnoreSet::new(&["**/dist/**"]).unwrap();
        let found = find_files(temp.path(), "*.js", Dialect::JavaScript, &ignore).unwrap();
        assert_eq!(rel_paths(&found), vec!["packages/web/src/main.js"]);
        assert_eq!(found.pruned_dirs, vec!["packages/web/dist"]);
    }

    #[test]
    fn test_find_output_is_sorted_and_stable() {
        let temp = TempDir::new().unwrap();
        for name in ["zeta.js", "alpha.js", "mid/beta.js", "mid/aardvark.js"] {
            create_test_file(temp.path(), name, "").unwrap();
        }
        let ignore = IgnoreSet::default();
        let first = find_files(temp.path(), "*.js", Dialect::JavaScript, &ignore).unwrap();
        let second = find_files(temp.path(), "*.js", Dialect::JavaScript, &ignore).unwrap();
        assert_eq!(
            rel_paths(&first),
            vec!["alpha.js", "mid/aardvark.js", "mid/beta.js", "zeta.js"]
        );
        assert_eq!(first.files, second.files);
    }

    /// Make `dir` unlistable. Returns false when permission bits do not bind
    /// the current user (e.g. root), restoring the mode first.
    #[cfg(unix)]
    fn lock_dir(dir: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o000)).unwrap();
        if std::fs::read_dir(dir).is_ok() {
            unlock_dir(dir);
            return false;
        }
        true
    }

    #[cfg(unix)]
    fn unlock_dir(dir: &Path) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_find_never_opens_ignored_unreadable_directory() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "src/app.js", "").unwrap();
        create_test_file(temp.path(), "node_modules/poison/index.js", "").unwrap();
        let poisoned = temp.path().join("node_modules/poison");
        if !lock_dir(&poisoned) {
            return;
        }

        let ignore = IgnoreSet::new(DEFAULT_IGNORE_PATTERNS).unwrap();
        let found = find_files(temp.path(), "*.js", Dialect::JavaScript, &ignore);
        unlock_dir(&poisoned);

        let found = found.unwrap();
        assert_eq!(rel_paths(&found), vec!["src/app.js"]);
        assert!(found.issues.is_empty());
        assert_eq!(found.pruned_dirs, vec!["node_modules"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_a_single_walk_issue() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "src/app.js", "").unwrap();
        create_test_file(temp.path(), "locked/hidden.js", "").unwrap();
        let locked = temp.path().join("locked");
        if !lock_dir(&locked) {
            return;
        }

        let found = discover(temp.path(), &Dialect::ALL, &IgnoreSet::default());
        unlock_dir(&locked);

        let found = found.unwrap();
        assert_eq!(rel_paths(&found), vec!["src/app.js"]);
        assert_eq!(found.issues.len(), 1);
        assert_eq!(found.issues[0].kind, IssueKind::Walk);
        assert!(found.issues[0].path.ends_with("locked"));
    }

    #[test]
    fn test_discover_tags_all_dialects_in_one_walk() {
        let temp = TempDir::new().unwrap();
        for name in [
            "app.js",
            "LEGACY.JS",
            "dist/bundle.js",
            "b.coffee",
            "index.html",
            "old/page.htm",
            "style.css",
        ] {
            create_test_file(temp.path(), name, "").unwrap();
        }

        let ignore = IgnoreSet::new(DEFAULT_IGNORE_PATTERNS).unwrap();
        let found = discover(temp.path(), &Dialect::ALL, &ignore).unwrap();
        let tagged: Vec<(&str, Dialect)> = found
            .files
            .iter()
            .map(|f| (f.rel_path.as_str(), f.dialect))
            .collect();
        assert_eq!(
            tagged,
            vec![
                ("LEGACY.JS", Dialect::JavaScript),
                ("app.js", Dialect::JavaScript),
                ("b.coffee", Dialect::CoffeeScript),
                ("index.html", Dialect::Html),
                ("old/page.htm", Dialect::Html),
            ]
        );
        assert_eq!(found.pruned_dirs, vec!["dist"]);
    }

    #[test]
    fn test_discover_skips_unrequested_dialects() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "a.js", "").unwrap();
        create_test_file(temp.path(), "b.html", "").unwrap();

        let found = discover(temp.path(), &[Dialect::Html], &IgnoreSet::default()).unwrap();
        assert_eq!(rel_paths(&found), vec!["b.html"]);
    }

    #[test]
    fn test_invalid_file_pattern_is_error() {
        let temp = TempDir::new().unwrap();
        let ignore = IgnoreSet::default();
        assert!(find_files(temp.path(), "[unclosed", Dialect::JavaScript, &ignore).is_err());
    }
}
