//! Integration tests using a mock HTTP server
//!
//! Tests the full end-to-end flow: env config → paginated klines requests →
//! CSV file on disk.

use klinedump::config::Config;
use klinedump::fetch::{HistoryFetcher, KlinesClient, KLINES_PATH};
use klinedump::output::{CsvSink, CSV_HEADER};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A raw kline record the way the upstream emits it: twelve positional
/// fields, of which only the first seven are retained.
fn kline(open_time: i64, close_time: i64) -> serde_json::Value {
    json!([
        open_time, "1.0", "2.0", "0.5", "1.5", "10.0", close_time,
        "15.0", 42, "5.0", "7.5", "0"
    ])
}

fn config_for(server_uri: &str, output: &Path, limit: u32) -> Config {
    Config::from_lookup(|key| match key {
        "SYMBOL" => Some("BTCUSDT".to_string()),
        "INTERVAL" => Some("1m".to_string()),
        "LIMIT" => Some(limit.to_string()),
        "REQ_DELAY_MS" => Some("1".to_string()),
        "START_DATE" => Some("1970-01-01T00:00:01Z".to_string()),
        "OUTPUT_FILE" => Some(output.to_string_lossy().into_owned()),
        "BASE_URL" => Some(server_uri.to_string()),
        _ => None,
    })
    .unwrap()
}

async fn run_fetch(config: &Config) -> klinedump::fetch::FetchStats {
    let fetcher = HistoryFetcher::new(
        KlinesClient::new(config),
        CsvSink::new(&config.output_file),
        config,
    );
    fetcher.run().await.unwrap()
}

// ============================================================================
// Happy Path
// ============================================================================

#[tokio::test]
async fn short_page_run_writes_expected_csv() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KLINES_PATH))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("interval", "1m"))
        .and(query_param("startTime", "1000"))
        .and(query_param("limit", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [1000, "1", "2", "0.5", "1.5", "10", 1299]
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("btcusdt.csv");
    let config = config_for(&mock_server.uri(), &output, 500);

    let stats = run_fetch(&config).await;

    assert_eq!(stats.candles_written, 1);
    assert_eq!(stats.pages_fetched, 1);
    assert!(stats.failure.is_none());

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        contents,
        format!(
            "{CSV_HEADER}\n1000,1,2,0.5,1.5,10,1299,\
             1970-01-01T00:00:01.000Z,1970-01-01T00:00:01.299Z\n"
        )
    );
}

#[tokio::test]
async fn paging_advances_cursor_across_full_pages() {
    let mock_server = MockServer::start().await;

    // Page 1 is full (limit = 2), so the loop continues from the candle
    // after its last close time.
    Mock::given(method("GET"))
        .and(path(KLINES_PATH))
        .and(query_param("startTime", "1000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([kline(1000, 1099), kline(1100, 1199)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Page 2 starts exactly at page 1's last close time + 1 and is short,
    // which ends the run.
    Mock::given(method("GET"))
        .and(path(KLINES_PATH))
        .and(query_param("startTime", "1200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([kline(1200, 1299)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("paged.csv");
    let config = config_for(&mock_server.uri(), &output, 2);

    let stats = run_fetch(&config).await;

    assert_eq!(stats.candles_written, 3);
    assert_eq!(stats.pages_fetched, 2);

    let contents = std::fs::read_to_string(&output).unwrap();
    let open_times: Vec<i64> = contents
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(open_times, vec![1000, 1100, 1200]);
}

// ============================================================================
// Termination Paths
// ============================================================================

#[tokio::test]
async fn empty_page_yields_header_only_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KLINES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("empty.csv");
    let config = config_for(&mock_server.uri(), &output, 500);

    let stats = run_fetch(&config).await;

    assert_eq!(stats.candles_written, 0);
    assert!(stats.failure.is_none());
    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents, format!("{CSV_HEADER}\n"));
}

#[tokio::test]
async fn upstream_failure_keeps_prior_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KLINES_PATH))
        .and(query_param("startTime", "1000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([kline(1000, 1099), kline(1100, 1199)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(KLINES_PATH))
        .and(query_param("startTime", "1200"))
        .respond_with(ResponseTemplate::new(500).set_body_string("maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("partial.csv");
    let config = config_for(&mock_server.uri(), &output, 2);

    let stats = run_fetch(&config).await;

    assert!(stats.failure.is_some(), "failure must be surfaced");
    assert_eq!(stats.candles_written, 2, "page 1 still flushes");

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents.lines().count(), 3, "header plus page 1");
}

#[tokio::test]
async fn malformed_payload_stops_run_but_flushes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KLINES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[1000, "1"]])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("malformed.csv");
    let config = config_for(&mock_server.uri(), &output, 500);

    let stats = run_fetch(&config).await;

    assert!(stats.failure.is_some());
    assert_eq!(stats.candles_written, 0);
    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents, format!("{CSV_HEADER}\n"));
}

// ============================================================================
// Configuration Failures
// ============================================================================

#[tokio::test]
async fn invalid_config_never_touches_network() {
    let mock_server = MockServer::start().await;

    // Expect exactly 0 requests; verified when the server is dropped
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let bad_values = [
        ("START_DATE", "not-a-date"),
        ("LIMIT", "0"),
        ("REQ_DELAY_MS", "-5"),
    ];
    for (bad_key, bad_value) in bad_values {
        let uri = mock_server.uri();
        let result = Config::from_lookup(|key| {
            if key == bad_key {
                return Some(bad_value.to_string());
            }
            match key {
                "SYMBOL" => Some("BTCUSDT".to_string()),
                "INTERVAL" => Some("1m".to_string()),
                "LIMIT" => Some("500".to_string()),
                "REQ_DELAY_MS" => Some("1".to_string()),
                "START_DATE" => Some("1970-01-01T00:00:01Z".to_string()),
                "OUTPUT_FILE" => Some("never-written.csv".to_string()),
                "BASE_URL" => Some(uri.clone()),
                _ => None,
            }
        });
        assert!(result.is_err(), "{bad_key}={bad_value} must be rejected");
        assert!(result.unwrap_err().is_config());
    }
}
