//! Shared logging utilities for ngscan binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "ngscan=info,ngscan_scout=info";
const QUIET_CONSOLE_FILTER: &str = "warn";

/// Logging configuration shared by ngscan binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    /// Console gets the full filter instead of warnings only
    pub verbose: bool,
    /// Also write a daily rolling log under [`logs_dir`]
    pub log_to_file: bool,
}

/// Keeps the background file writer alive; drop it at process exit.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize tracing with a stderr layer and an optional rolling file layer.
///
/// `RUST_LOG` overrides the default filter. Console output always goes to
/// stderr so stdout stays free for exported data.
pub fn init_logging(config: LogConfig<'_>) -> Result<LoggingGuard> {
    let file_filter = env_filter();

    let console_filter = if config.verbose {
        env_filter()
    } else {
        EnvFilter::new(QUIET_CONSOLE_FILTER)
    };

    let mut file_guard = None;
    let file_layer = if config.log_to_file {
        let log_dir = ensure_logs_dir().context("Failed to ensure log directory")?;
        let file_name = format!("{}.log", sanitize_name(config.app_name));
        let appender = tracing_appender::rolling::daily(log_dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Get the ngscan home directory: ~/.ngscan
///
/// `NGSCAN_HOME` overrides; falls back to the working directory when no home
/// directory can be determined.
pub fn ngscan_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("NGSCAN_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ngscan")
}

/// Get the logs directory: ~/.ngscan/logs
pub fn logs_dir() -> PathBuf {
    ngscan_home().join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("ngscan"), "ngscan");
        assert_eq!(sanitize_name("ng scan/v1.0"), "ng_scan_v1_0");
    }

    #[test]
    fn test_logs_dir_under_home() {
        assert!(logs_dir().ends_with("logs"));
        assert_eq!(logs_dir().parent(), Some(ngscan_home().as_path()));
    }
}
