//! Pagination fetcher
//!
//! The single-threaded fetch-all loop. Three things end it: a fetch error,
//! an empty page, or a page shorter than the requested limit. On every exit
//! path the sink receives the accumulated candles exactly once; an error
//! mid-run is reported in the stats, not raised.

use super::types::{FetchStats, PageFetcher, PageRequest};
use crate::candle::EnrichedCandle;
use crate::config::Config;
use crate::error::Result;
use crate::http::Pacer;
use crate::output::CandleSink;
use std::time::Instant;
use tracing::{error, info};

/// Drives the page loop and hands the accumulated candles to the sink
pub struct HistoryFetcher<F, S> {
    pages: F,
    sink: S,
    start_time: i64,
    limit: u32,
    pacer: Pacer,
}

impl<F: PageFetcher, S: CandleSink> HistoryFetcher<F, S> {
    /// Wire a page source and a sink together for one run
    pub fn new(pages: F, sink: S, config: &Config) -> Self {
        Self {
            pages,
            sink,
            start_time: config.start_time_ms(),
            limit: config.limit,
            pacer: Pacer::new(config.request_delay),
        }
    }

    /// Fetch every available page from the start instant onward, then write
    /// the result through the sink.
    ///
    /// A page failure stops the loop without retry, but the candles
    /// collected so far are still written; the failure is surfaced through
    /// [`FetchStats::failure`]. Only configuration and sink errors are
    /// fatal to the run.
    pub async fn run(&self) -> Result<FetchStats> {
        let started = Instant::now();
        let mut stats = FetchStats::new();
        let mut cursor = self.start_time;
        let mut accumulated: Vec<EnrichedCandle> = Vec::new();

        loop {
            let request = PageRequest::new(cursor, self.limit);
            let page = match self.pages.fetch_page(request).await {
                Ok(page) => page,
                Err(e) => {
                    error!("page fetch at startTime={cursor} failed: {e}");
                    stats.failure = Some(e.to_string());
                    break;
                }
            };
            stats.add_page();

            if page.is_empty() {
                break;
            }

            let page_len = page.len();
            let batch: Result<Vec<EnrichedCandle>> =
                page.into_iter().map(EnrichedCandle::from_candle).collect();
            let batch = match batch {
                Ok(batch) => batch,
                Err(e) => {
                    error!("mapping page at startTime={cursor} failed: {e}");
                    stats.failure = Some(e.to_string());
                    break;
                }
            };

            // An off-by-one here either refetches the candle whose close
            // time equals the next start time, or skips one entirely.
            cursor = batch.last().map_or(cursor, |last| last.close_time + 1);
            accumulated.extend(batch);

            // Short page: the upstream has no more history after this one.
            if page_len < self.limit as usize {
                break;
            }

            self.pacer.wait().await;
        }

        stats.candles_written = self.sink.write(&accumulated)?;
        stats.set_duration(started.elapsed().as_millis() as u64);

        info!(
            "fetched {} candles in {} pages ({}ms)",
            stats.candles_written, stats.pages_fetched, stats.duration_ms
        );
        Ok(stats)
    }
}
