//! Upstream klines client
//!
//! Talks to the spot klines endpoint. The response is a JSON array of
//! positional arrays; see [`Candle::from_raw`] for the record layout.

use super::types::{PageFetcher, PageRequest};
use crate::candle::Candle;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Path of the spot klines endpoint
pub const KLINES_PATH: &str = "/api/v3/klines";

/// [`PageFetcher`] backed by the real klines REST endpoint
pub struct KlinesClient {
    http: HttpClient,
    symbol: String,
    interval: String,
}

impl KlinesClient {
    /// Build a client for the configured host, symbol, and interval
    pub fn new(config: &Config) -> Self {
        let http = HttpClient::with_config(
            HttpClientConfig::builder()
                .base_url(config.base_url.as_str())
                .build(),
        );
        Self {
            http,
            symbol: config.symbol.clone(),
            interval: config.interval.clone(),
        }
    }
}

#[async_trait]
impl PageFetcher for KlinesClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Candle>> {
        let query = RequestConfig::new()
            .query("symbol", self.symbol.as_str())
            .query("interval", self.interval.as_str())
            .query("startTime", request.start_time.to_string())
            .query("limit", request.limit.to_string());

        let body: Value = self.http.get_json(KLINES_PATH, query).await?;
        let rows = body
            .as_array()
            .ok_or_else(|| Error::decode("klines response is not a JSON array"))?;

        debug!(
            "fetched {} raw records from startTime={}",
            rows.len(),
            request.start_time
        );
        rows.iter().map(Candle::from_raw).collect()
    }
}
