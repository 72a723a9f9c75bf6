//! CLI entry point for quake_mapper.
//!
//! Fetches the earthquake summary feed, plots it on a world map and writes
//! `<base>.png` plus a `<base>.json` listing of the plotted events.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use quake_mapper::pipeline::{DEFAULT_FEED_URL, run};
use quake_mapper::{fetch::BasicClient, render::RasterMap};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "quake_mapper")]
#[command(about = "Plot recent earthquakes on a world map", long_about = None)]
struct Cli {
    /// Path to file or URL to fetch
    #[arg(value_name = "FILE_OR_URL", default_value = DEFAULT_FEED_URL)]
    source: String,

    /// Output base name; `.png` and `.json` are appended.
    /// Defaults to a name built from the current date and time.
    #[arg(short, long, value_name = "BASE")]
    output: Option<String>,

    /// Image width in pixels
    #[arg(long, default_value_t = RasterMap::DEFAULT_WIDTH)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = RasterMap::DEFAULT_HEIGHT)]
    height: u32,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing()?;

    let cli = Cli::parse();
    let base = cli.output.unwrap_or_else(default_base_name);

    let client = BasicClient::new();
    let mut canvas = RasterMap::new(cli.width, cli.height);
    let report = run(&client, &cli.source, &mut canvas, &base)?;

    info!(
        events = report.event_count,
        title = %report.title,
        png = %report.png_path.display(),
        json = %report.json_path.display(),
        "Done"
    );
    Ok(())
}

/// `earthquakes_report_<date>_<time>` with the time's colons as hyphens.
fn default_base_name() -> String {
    Local::now()
        .format("earthquakes_report_%Y-%m-%d_%H-%M-%S%.6f")
        .to_string()
}

/// Colored stderr output plus a JSON daily-rolling log file.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/quake_mapper.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("quake_mapper.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

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

    Ok(file_guard)
}
