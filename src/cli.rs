//! CLI definition and dispatch.

use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::CsvHistoryAdapter;
use crate::adapters::csv_table_adapter::CsvTableAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::yahoo_adapter::YahooChartAdapter;
use crate::domain::error::MarketPerfError;
use crate::domain::instrument::catalog;
use crate::domain::run_config::{ProviderConfig, ProviderKind, RunConfig};
use crate::domain::table::{build_table, PerformanceRow};
use crate::ports::data_port::MarketDataPort;
use crate::ports::table_port::TableWriter;

#[derive(Parser, Debug)]
#[command(
    name = "marketperf",
    about = "Trailing performance snapshot for indices, yields, commodities and crypto"
)]
pub struct Cli {
    /// INI file with [output], [provider], [run] and [windows] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the CSV output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Fetch instruments concurrently
    #[arg(long)]
    pub parallel: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the instrument catalog
    Catalog,
    /// Print the lookback windows
    Windows,
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match resolve_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    match cli.command {
        Some(Command::Catalog) => run_catalog(),
        Some(Command::Windows) => run_windows(&config),
        None => run_fetch(&config),
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig, MarketPerfError> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| MarketPerfError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    RunConfig::from_config(&adapter)
}

/// Config file if given, then command-line overrides on top.
pub fn resolve_config(cli: &Cli) -> Result<RunConfig, MarketPerfError> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => RunConfig::default(),
    };
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if cli.parallel {
        config.parallel = true;
    }
    Ok(config)
}

pub fn build_provider(config: &ProviderConfig) -> Result<Box<dyn MarketDataPort>, MarketPerfError> {
    Ok(match config.kind {
        ProviderKind::Yahoo => Box::new(YahooChartAdapter::new(config)?),
        ProviderKind::Csv => Box::new(CsvHistoryAdapter::new(config.data_dir.clone())),
    })
}

/// Fetch, score and export. Per-instrument failures are already folded into
/// the rows; only the export can fail here.
pub fn run_pipeline(
    provider: &dyn MarketDataPort,
    writer: &dyn TableWriter,
    config: &RunConfig,
    now: DateTime<Utc>,
) -> Result<Vec<PerformanceRow>, MarketPerfError> {
    let rows = build_table(provider, catalog(), &config.windows, now, config.parallel);
    writer.write_table(&config.windows, &rows, &config.output_path)?;
    Ok(rows)
}

fn run_fetch(config: &RunConfig) -> ExitCode {
    info!("Fetching market data...");

    let provider = match build_provider(&config.provider) {
        Ok(p) => p,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    match run_pipeline(provider.as_ref(), &CsvTableAdapter, config, Utc::now()) {
        Ok(rows) => {
            info!("Data saved to {}", config.output_path.display());
            info!("Total assets: {}", rows.len());
            info!("Timestamp: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to write {}: {e}", config.output_path.display());
            (&e).into()
        }
    }
}

fn run_catalog() -> ExitCode {
    for inst in catalog() {
        println!(
            "{:<8} {:<10} {:<30} {:<14} {}",
            inst.symbol, inst.kind, inst.name, inst.region, inst.asset_class
        );
    }
    ExitCode::SUCCESS
}

fn run_windows(config: &RunConfig) -> ExitCode {
    for w in &config.windows {
        println!("{:<4} {}", w.label, w.lookback);
    }
    ExitCode::SUCCESS
}
