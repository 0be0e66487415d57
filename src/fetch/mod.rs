//! Historical fetch module
//!
//! Owns the cursor-advance pagination loop and the upstream klines client.
//!
//! # Overview
//!
//! [`HistoryFetcher`] walks an unbounded time range in fixed-size pages,
//! advancing the cursor past the last candle's close time until a short or
//! empty page signals exhaustion. The upstream and the destination sit
//! behind the [`PageFetcher`] and [`crate::output::CandleSink`] traits so
//! the loop is testable with deterministic fakes.

mod fetcher;
mod klines;
mod types;

pub use fetcher::HistoryFetcher;
pub use klines::{KlinesClient, KLINES_PATH};
pub use types::{FetchStats, PageFetcher, PageRequest};
