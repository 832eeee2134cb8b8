//! CLI entry point for the bikeshare explorer.
//!
//! Provides an interactive `explore` session, a one-shot `stats` run that
//! prints a report (and optionally appends a CSV summary), and a `cities`
//! listing of where each city's dataset is expected.

mod shell;

use anyhow::{Context, Result};
use bikeshare_explorer::config::{CatalogConfig, ExplorerConfig};
use bikeshare_explorer::output::{
    ReportSummary, append_record, print_pretty, render_report, to_json,
};
use bikeshare_explorer::{
    Catalog, City, Day, Month, Selection, Selector, compute_statistics, filter, normalize,
};
use clap::{Parser, Subcommand, ValueEnum};
use shell::Prompter;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding the city CSV files
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file mapping city names to CSV paths
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: pick a city and filters, read the statistics
    Explore {
        /// Rows shown per page when browsing raw data
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Print statistics for one city and filter selection
    Stats {
        /// chicago, new york or washington
        #[arg(short, long)]
        city: City,

        /// all, or January to June
        #[arg(short, long, default_value = "all")]
        month: Selector<Month>,

        /// all, or a weekday name
        #[arg(short, long, default_value = "all")]
        day: Selector<Day>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// CSV file to append a summary row to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List supported cities and their dataset files
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();

    // Prompts share the terminal with stderr, so the session stays quiet.
    let stderr_level = match cli.command {
        Commands::Explore { .. } => "warn",
        _ => "info",
    };
    let _file_guard = init_tracing(stderr_level)?;

    let mut config = ExplorerConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(file) = cli.catalog {
        config.catalog_file = Some(file);
    }

    let catalog = build_catalog(&config)?;

    match cli.command {
        Commands::Explore { page_size } => {
            let page_size = page_size.filter(|n| *n > 0).unwrap_or(config.page_size);
            let mut prompter = Prompter::new(std::io::stdin().lock(), std::io::stdout());
            shell::run(&catalog, page_size, &mut prompter)?;
        }
        Commands::Stats {
            city,
            month,
            day,
            format,
            output,
        } => {
            let selection = Selection::new(month, day);
            run_stats(&catalog, city, &selection, format, output.as_deref())?;
        }
        Commands::Cities => {
            let mut stdout = std::io::stdout().lock();
            for city in City::ALL {
                let path = catalog.path_for(city);
                let status = if path.is_file() { "found" } else { "missing" };
                writeln!(stdout, "{:<12} {:<8} {}", city.name(), status, path.display())?;
            }
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing(stderr_level: &str) -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(stderr_level.parse()?));

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

fn build_catalog(config: &ExplorerConfig) -> Result<Catalog> {
    let catalog = Catalog::new(&config.data_dir);
    match &config.catalog_file {
        Some(path) => {
            let overrides = CatalogConfig::load(path)
                .with_context(|| format!("loading catalog file {}", path.display()))?;
            Ok(catalog.with_config(&overrides)?)
        }
        None => Ok(catalog),
    }
}

/// One non-interactive pass: load, normalize, filter, report.
#[tracing::instrument(
    skip_all,
    fields(city = %city, month = %selection.month, day = %selection.day)
)]
fn run_stats(
    catalog: &Catalog,
    city: City,
    selection: &Selection,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let raw = catalog.load(city)?;
    let dataset = normalize(&raw).with_context(|| format!("normalizing {city} dataset"))?;
    let view = filter(&dataset, selection);
    let report = compute_statistics(&view);
    print_pretty(&report);

    let mut stdout = std::io::stdout().lock();
    match format {
        Format::Text => write!(stdout, "{}", render_report(&report))?,
        Format::Json => writeln!(stdout, "{}", to_json(&report)?)?,
    }

    if let Some(path) = output {
        append_record(path, &ReportSummary::new(city, selection, &report))?;
        info!(path = %path.display(), "Summary appended");
    }

    Ok(())
}
