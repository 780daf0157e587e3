//! Scan command - Inventory the building blocks of a project
//!
//! Resolves the scan configuration, runs the engine and exports the
//! `path,type,loc` inventory. Stdout carries only the export unless
//! `--output` moves it to a file.

use crate::cli::error::HelpfulError;
use crate::cli::output::render_overview;
use ngscan_scout::{Granularity, Inventory, ScanConfig, ScanReport, Scanner};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Granularity as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GranularityArg {
    File,
    Block,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::File => Granularity::File,
            GranularityArg::Block => Granularity::Block,
        }
    }
}

/// Export format for the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Arguments for the scan command
#[derive(Debug)]
pub struct ScanArgs {
    pub root: Option<PathBuf>,
    pub ignore: Option<String>,
    pub config: Option<PathBuf>,
    pub granularity: Option<GranularityArg>,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

/// Execute the scan command
pub fn run(args: ScanArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let config_path = args.config.as_deref();

    let scanner =
        Scanner::new(config).map_err(|e| HelpfulError::from_scout(e, config_path))?;
    let report = scanner
        .scan()
        .map_err(|e| HelpfulError::from_scout(e, config_path))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| HelpfulError::cannot_write_file(path, &e.to_string()))?;
            let mut writer = BufWriter::new(file);
            export(&report.inventory, args.format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| HelpfulError::cannot_write_file(path, &e.to_string()))?;
            info!(path = %path.display(), records = report.inventory.len(), "Export written");

            if !args.quiet {
                println!("{}", render_overview(&report.inventory));
                println!("{}", footer(&report, Some(path)));
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export(&report.inventory, args.format, &mut writer)?;
            writer.flush()?;

            if !args.quiet {
                eprintln!("{}", render_overview(&report.inventory));
                eprintln!("{}", footer(&report, None));
            }
        }
    }

    Ok(())
}

/// Merge flags, environment and the optional config file.
///
/// Flags and environment are already merged by clap; both override the file,
/// which overrides the built-in defaults.
pub fn resolve_config(args: &ScanArgs) -> anyhow::Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => ScanConfig::new("."),
    };

    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    if let Some(ignore) = &args.ignore {
        config.ignore_patterns = ScanConfig::parse_ignore_list(ignore);
    }
    if let Some(granularity) = args.granularity {
        config.granularity = granularity.into();
    }

    Ok(config)
}

fn load_config_file(path: &Path) -> anyhow::Result<ScanConfig> {
    if !path.is_file() {
        return Err(HelpfulError::file_not_found(path).into());
    }
    ScanConfig::load(path).map_err(|e| HelpfulError::from_scout(e, Some(path)).into())
}

fn export<W: Write>(inventory: &Inventory, format: ExportFormat, writer: &mut W) -> anyhow::Result<()> {
    match format {
        ExportFormat::Csv => inventory.write_csv(&mut *writer)?,
        ExportFormat::Json => {
            inventory.write_json(&mut *writer)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn footer(report: &ScanReport, output: Option<&Path>) -> String {
    let mut line = format!(
        "{} records from {} files ({} skipped, {} directories pruned) in {} ms",
        report.stats.records,
        report.stats.files_classified,
        report.stats.files_skipped,
        report.stats.dirs_pruned,
        report.stats.duration_ms
    );
    if !report.issues.is_empty() {
        line.push_str(&format!("; {} issues (rerun with -v for details)", report.issues.len()));
    }
    if let Some(path) = output {
        line.push_str(&format!("\nExport written to {}", path.display()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngscan_scout::DEFAULT_IGNORE_PATTERNS;
    use tempfile::TempDir;

    fn args() -> ScanArgs {
        ScanArgs {
            root: None,
            ignore: None,
            config: None,
            granularity: None,
            format: ExportFormat::Csv,
            output: None,
            quiet: true,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let config = resolve_config(&args()).unwrap();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.ignore_patterns.len(), DEFAULT_IGNORE_PATTERNS.len());
        assert_eq!(config.granularity, Granularity::File);
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ngscan.toml");
        std::fs::write(
            &path,
            "root = \"/srv/legacy\"\nignore_patterns = [\"**/vendor/**\"]\ngranularity = \"block\"\n",
        )
        .unwrap();

        let from_file = resolve_config(&ScanArgs {
            config: Some(path.clone()),
            ..args()
        })
        .unwrap();
        assert_eq!(from_file.root, PathBuf::from("/srv/legacy"));
        assert_eq!(from_file.ignore_patterns, vec!["**/vendor/**".to_string()]);
        assert_eq!(from_file.granularity, Granularity::Block);

        let overridden = resolve_config(&ScanArgs {
            root: Some(PathBuf::from("app")),
            ignore: Some("**/dist/**, ,**/*.min.js".to_string()),
            granularity: Some(GranularityArg::File),
            config: Some(path),
            ..args()
        })
        .unwrap();
        assert_eq!(overridden.root, PathBuf::from("app"));
        assert_eq!(
            overridden.ignore_patterns,
            vec!["**/dist/**".to_string(), "**/*.min.js".to_string()]
        );
        assert_eq!(overridden.granularity, Granularity::File);
    }

    #[test]
    fn test_missing_config_file() {
        let err = resolve_config(&ScanArgs {
            config: Some(PathBuf::from("/nonexistent/ngscan.toml")),
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_export_json_ends_with_newline() {
        let mut out = Vec::new();
        export(&Inventory::default(), ExportFormat::Json, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["records"].as_array().map(Vec::len), Some(0));
    }
}
