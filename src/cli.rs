//! Command-line interface
//!
//! The run itself is configured entirely through environment variables; the
//! CLI only selects an optional dotenv file and the log verbosity.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::{FetchStats, HistoryFetcher, KlinesClient};
use crate::output::CsvSink;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Historical klines downloader
#[derive(Parser, Debug)]
#[command(name = "klinedump")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load environment variables from this file before reading config
    #[arg(short, long)]
    pub env_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute one fetch run
    pub async fn run(&self) -> Result<FetchStats> {
        if let Some(path) = &self.cli.env_file {
            dotenv::from_path(path)
                .map_err(|e| Error::config(format!("failed to load {}: {e}", path.display())))?;
        } else {
            // pick up a .env in the working directory when present
            dotenv::dotenv().ok();
        }

        let config = Config::from_env()?;
        info!(
            "fetching {} {} candles from {} into {}",
            config.symbol,
            config.interval,
            config.start_time,
            config.output_file.display()
        );

        let client = KlinesClient::new(&config);
        let sink = CsvSink::new(&config.output_file);
        let fetcher = HistoryFetcher::new(client, sink, &config);

        let stats = fetcher.run().await?;
        if let Some(failure) = &stats.failure {
            warn!("run ended early: {failure}");
        }
        Ok(stats)
    }
}
