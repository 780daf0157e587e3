//! ngscan command-line launcher
//!
//! - `scan`: inventory every AngularJS building block under a project root
//! - `classify`: show the blocks found in a single file

use clap::{Parser, Subcommand};
use ngscan_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

use cli::classify::ClassifyArgs;
use cli::scan::{ExportFormat, GranularityArg, ScanArgs};

#[derive(Parser, Debug)]
#[command(name = "ngscan")]
#[command(about = "Inventory AngularJS building blocks in a legacy front-end codebase")]
#[command(version)]
struct Cli {
    /// Show engine logs (info and debug) on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to ~/.ngscan/logs
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a project and export its building-block inventory
    Scan {
        /// Project root (defaults to the config file root, then ".")
        #[arg(env = "NGSCAN_ROOT")]
        root: Option<PathBuf>,

        /// Comma-separated ignore globs, replacing the defaults
        #[arg(short, long, env = "NGSCAN_IGNORE")]
        ignore: Option<String>,

        /// TOML scan configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Measure whole files or individual declarations
        #[arg(short, long, value_enum)]
        granularity: Option<GranularityArg>,

        /// Export format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Write the export to FILE instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not print the overview table
        #[arg(short, long)]
        quiet: bool,
    },

    /// Classify a single file
    Classify {
        /// File to classify (.js, .coffee, .html)
        file: PathBuf,

        /// Measure the whole file or individual declarations
        #[arg(short, long, value_enum, default_value_t = GranularityArg::File)]
        granularity: GranularityArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn run_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Scan {
            root,
            ignore,
            config,
            granularity,
            format,
            output,
            quiet,
        } => cli::scan::run(ScanArgs {
            root,
            ignore,
            config,
            granularity,
            format,
            output,
            quiet,
        }),
        Commands::Classify {
            file,
            granularity,
            json,
        } => cli::classify::run(ClassifyArgs {
            file,
            granularity,
            json,
        }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match init_logging(LogConfig {
        app_name: "ngscan",
        verbose: cli.verbose,
        log_to_file: cli.log_file,
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    match run_command(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}
