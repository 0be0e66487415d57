// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! # klinedump
//!
//! Downloads historical candlestick data from the spot klines REST endpoint
//! and writes it to a single CSV file.
//!
//! The core is a cursor-advance pagination loop: fetch one page, map it,
//! advance the cursor past the last candle's close time, and stop on the
//! first error, an empty page, or a short page. Whatever was accumulated is
//! always flushed once at the end of the run.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use klinedump::config::Config;
//! use klinedump::fetch::{HistoryFetcher, KlinesClient};
//! use klinedump::output::CsvSink;
//!
//! #[tokio::main]
//! async fn main() -> klinedump::Result<()> {
//!     // SYMBOL, INTERVAL, LIMIT, REQ_DELAY_MS, START_DATE, OUTPUT_FILE
//!     let config = Config::from_env()?;
//!
//!     let fetcher = HistoryFetcher::new(
//!         KlinesClient::new(&config),
//!         CsvSink::new(&config.output_file),
//!         &config,
//!     );
//!
//!     let stats = fetcher.run().await?;
//!     println!("{} candles in {} pages", stats.candles_written, stats.pages_fetched);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Run configuration from environment variables
pub mod config;

/// Candle data model
pub mod candle;

/// HTTP client and inter-request pacing
pub mod http;

/// Pagination fetcher and upstream klines client
pub mod fetch;

/// CSV sink
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
