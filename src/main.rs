use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use supply_chain_dashboard::cache::EnrichedCache;
use supply_chain_dashboard::config::DashboardConfig;
use supply_chain_dashboard::dashboard::Dashboard;
use supply_chain_dashboard::ingestion::{LoadOptions, LogObserver};
use supply_chain_dashboard::processing::FilterOptions;

/// Build every dashboard view for the default selection and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "supply-dashboard", version, about, long_about = None)]
struct Cli {
    /// Order data file (.csv, or .tsv/.tab for tab-separated). Defaults to
    /// $SUPPLY_DASHBOARD_SOURCE, then "Refined and Cleansed_Supply_Chain_Data.csv".
    #[arg(long)]
    source: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn init_logging() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if std::env::var("RUST_LOG").is_err() {
        builder.filter_module("supply_chain_dashboard", LevelFilter::Info);
    }
    builder.format_timestamp_millis().init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli
        .source
        .as_ref()
        .map_or_else(DashboardConfig::from_env, DashboardConfig::new);
    let options = LoadOptions {
        observer: Some(Arc::new(LogObserver)),
        ..LoadOptions::default()
    };

    let cache = EnrichedCache::new();
    let enriched = cache.get_or_load(&config.source_path, &options)?;

    let spec = FilterOptions::from_table(&enriched)
        .context("Collecting filter options")?
        .default_spec();
    let dashboard = Dashboard::build(&enriched, &spec).context("Building dashboard views")?;
    info!("built {} views", dashboard.views.len());

    let json = if cli.pretty {
        serde_json::to_string_pretty(&dashboard)?
    } else {
        serde_json::to_string(&dashboard)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").context("Writing dashboard JSON")?;
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let not_found = err
                .downcast_ref::<supply_chain_dashboard::DashboardError>()
                .is_some_and(|e| e.is_source_not_found());
            if not_found {
                eprintln!("File not found. Please check the CSV path.");
            } else {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
