//! Fetch types and traits

use crate::candle::Candle;
use crate::error::Result;
use async_trait::async_trait;

/// Parameters for one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Lower bound of the page's time range, epoch milliseconds
    pub start_time: i64,
    /// Maximum number of candles the upstream should return
    pub limit: u32,
}

impl PageRequest {
    /// Create a page request
    pub fn new(start_time: i64, limit: u32) -> Self {
        Self { start_time, limit }
    }
}

/// Source of one page of history, oldest candle first
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page of candles starting at `request.start_time`
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Candle>>;
}

/// Statistics from one fetch run
#[derive(Debug, Clone, Default)]
pub struct FetchStats {
    /// Candles flushed to the sink
    pub candles_written: usize,
    /// Pages fetched from the upstream
    pub pages_fetched: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// The error that ended the run early, if any
    pub failure: Option<String>,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one fetched page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    /// True when the loop stopped on a fetch error rather than exhaustion
    pub fn stopped_on_error(&self) -> bool {
        self.failure.is_some()
    }
}
