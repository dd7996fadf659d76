//! CLI entry point for the agricultural analytics tool.
//!
//! Fetches a batch of crop records from a file or URL, cleans it, and emits
//! the yearly production extremes and per-crop averages.

use agri_analytics::analyzers::analyzer::analyze;
use agri_analytics::{
    ingest::{fetch_or_empty, source_for},
    normalize::normalize,
    output::{print_tables, write_csv_tables, write_json, write_normalized_csv},
    parser::RecordFormat,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_SOURCE: &str = "data.json";

#[derive(Parser)]
#[command(name = "agri_analytics")]
#[command(about = "Summarize crop production, yield and area records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the yearly and per-crop summary tables
    Report {
        /// Path or URL of the record batch (defaults to $AGRI_DATA_SOURCE, then data.json)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Input format; detected from the extension when omitted
        #[arg(short, long)]
        input_format: Option<RecordFormat>,

        /// How to emit the tables
        #[arg(short, long, value_enum, default_value_t = OutputMode::Table)]
        mode: OutputMode,

        /// JSON file (json mode) or directory (csv mode) to write to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the cleaned records as CSV without aggregating
    Normalize {
        /// Path or URL of the record batch (defaults to $AGRI_DATA_SOURCE, then data.json)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Input format; detected from the extension when omitted
        #[arg(short, long)]
        input_format: Option<RecordFormat>,

        /// CSV file to write
        #[arg(short, long, default_value = "normalized.csv")]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// Log each row
    Table,
    /// Pretty JSON to stdout or --output
    Json,
    /// year_table.csv and crop_table.csv in --output (default: current dir)
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/agri_analytics.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("agri_analytics.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            source,
            input_format,
            mode,
            output,
        } => {
            let location = resolve_source(source);
            let source = source_for(&location, input_format);
            let raw = fetch_or_empty(source.as_ref()).await;

            let report = analyze(&raw).context("record batch rejected")?;

            match mode {
                OutputMode::Table => print_tables(&report),
                OutputMode::Json => write_json(&report, output.as_deref())?,
                OutputMode::Csv => {
                    let dir = output.unwrap_or_else(|| PathBuf::from("."));
                    write_csv_tables(&report, &dir)?;
                }
            }
        }
        Commands::Normalize {
            source,
            input_format,
            output,
        } => {
            let location = resolve_source(source);
            let source = source_for(&location, input_format);
            let raw = fetch_or_empty(source.as_ref()).await;

            let records = normalize(&raw).context("record batch rejected")?;
            write_normalized_csv(&records, &output)?;
        }
    }

    Ok(())
}

/// CLI argument, then `AGRI_DATA_SOURCE`, then `data.json`.
fn resolve_source(arg: Option<String>) -> String {
    let location = arg
        .or_else(|| std::env::var("AGRI_DATA_SOURCE").ok())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
    info!(source = %location, "Using record source");
    location
}
