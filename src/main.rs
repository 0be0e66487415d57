//! klinedump CLI
//!
//! Fetches historical candles and writes them to a CSV file.

use clap::Parser;
use klinedump::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    let runner = Runner::new(cli);
    match runner.run().await {
        Ok(stats) => {
            println!(
                "done: {} candles in {} pages ({}ms)",
                stats.candles_written, stats.pages_fetched, stats.duration_ms
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
