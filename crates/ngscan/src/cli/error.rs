//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use ngscan_scout::ScoutError;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add multiple suggestions
    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions
            .extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Project root does not exist
    pub fn root_not_found(path: &Path) -> Self {
        Self::new(format!("Project root not found: {}", path.display()))
            .with_context("The directory to scan does not exist on the filesystem")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Check NGSCAN_ROOT and the `root` key of your --config file".to_string(),
            ])
    }

    /// Project root exists but is a file
    pub fn not_a_directory(path: &Path) -> Self {
        Self::new(format!("Not a directory: {}", path.display()))
            .with_context("The scan command expects a project directory, not a file")
            .with_suggestions([
                format!("TRY: Classify a single file: ngscan classify {}", path.display()),
                format!(
                    "TRY: Scan the parent directory: ngscan scan {}",
                    parent_display(path)
                ),
            ])
    }

    /// Project root cannot be listed
    pub fn root_not_readable(path: &Path) -> Self {
        Self::new(format!("Cannot read project root: {}", path.display()))
            .with_context("The directory exists but its entries cannot be listed")
            .with_suggestion(format!(
                "TRY: Check directory permissions: ls -ld {}",
                path.display()
            ))
    }

    /// Ignore glob does not compile
    pub fn invalid_pattern(pattern: &str, reason: &str) -> Self {
        Self::new(format!("Invalid ignore pattern: '{}'", pattern))
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: Close every character class: [abc]".to_string(),
                "TRY: Match a directory anywhere with **/dist/**".to_string(),
                "TRY: Separate patterns with commas: --ignore '**/dist/**,**/*.min.js'"
                    .to_string(),
            ])
    }

    /// Config file is malformed
    pub fn invalid_config(path: Option<&Path>, reason: &str) -> Self {
        let message = match path {
            Some(path) => format!("Invalid config file: {}", path.display()),
            None => "Invalid configuration".to_string(),
        };
        Self::new(message)
            .with_context(reason.to_string())
            .with_suggestion(
                "TRY: Keys are root, ignore_patterns, granularity (file|block), dialects",
            )
    }

    /// File does not exist
    pub fn file_not_found(path: &Path) -> Self {
        Self::new(format!("File not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                format!("TRY: Look for similar files: ls {}", parent_display(path)),
            ])
    }

    /// Extension does not map to a known dialect
    pub fn unknown_dialect(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(no extension)");

        Self::new(format!("Unknown source dialect: {}", ext))
            .with_context(format!("Cannot classify file: {}", path.display()))
            .with_suggestion("TRY: Supported extensions: js, coffee, html, htm")
    }

    /// File cannot be read (permission or encoding error)
    pub fn cannot_read_file(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot read file: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                format!("TRY: Check file permissions: ls -la {}", path.display()),
                "TRY: Source files must be UTF-8 encoded".to_string(),
            ])
    }

    /// Export destination cannot be written
    pub fn cannot_write_file(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot write file: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestion(format!(
                "TRY: Check that the directory exists and is writable: ls -ld {}",
                parent_display(path)
            ))
    }

    /// Map an engine error, keeping the path from `config` when one applies.
    pub fn from_scout(err: ScoutError, config: Option<&Path>) -> Self {
        match err {
            ScoutError::RootNotFound(path) => Self::root_not_found(&path),
            ScoutError::RootNotDirectory(path) => Self::not_a_directory(&path),
            ScoutError::RootNotReadable(path) => Self::root_not_readable(&path),
            ScoutError::Pattern { pattern, message } => Self::invalid_pattern(&pattern, &message),
            ScoutError::Config(reason) => Self::invalid_config(config, &reason),
            other => Self::new(other.to_string()),
        }
    }
}

fn parent_display(path: &Path) -> String {
    path.parent()
        .map(|p| p.display().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string())
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While scanning")
            .with_suggestion("Try again");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While scanning"));
        assert!(display.contains("  Try again"));
    }

    #[test]
    fn test_root_not_found() {
        let err = HelpfulError::root_not_found(&PathBuf::from("/nonexistent/app"));
        let display = format!("{}", err);
        assert!(display.contains("/nonexistent/app"));
        assert!(display.contains("TRY:"));
    }

    #[test]
    fn test_unknown_dialect_names_extension() {
        let err = HelpfulError::unknown_dialect(&PathBuf::from("src/app.ts"));
        assert!(err.message.contains("ts"));
        assert!(err.context.unwrap().contains("src/app.ts"));
    }

    #[test]
    fn test_parent_display_of_bare_name() {
        assert_eq!(parent_display(Path::new("app.js")), ".");
        assert_eq!(parent_display(Path::new("src/app.js")), "src");
    }

    #[test]
    fn test_from_scout_pattern_error() {
        let err = HelpfulError::from_scout(
            ScoutError::Pattern {
                pattern: "[unclosed".to_string(),
                message: "invalid range pattern".to_string(),
            },
            None,
        );
        assert!(err.message.contains("'[unclosed'"));
        assert!(err.context.unwrap().contains("invalid range"));
    }

    #[test]
    fn test_from_scout_config_error_keeps_path() {
        let err = HelpfulError::from_scout(
            ScoutError::Config("missing field `root`".to_string()),
            Some(Path::new("ngscan.toml")),
        );
        assert!(err.message.contains("ngscan.toml"));
        assert_eq!(err.context.as_deref(), Some("missing field `root`"));
    }
}
