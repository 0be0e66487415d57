//! Candle data model
//!
//! The klines endpoint returns each candle as a positional JSON array. Only
//! the first seven elements are retained. Prices and volume stay decimal
//! strings end to end so no precision is lost to floating point.

use crate::error::{Error, Result};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimum number of positional fields a raw kline record must carry
pub const RAW_RECORD_MIN_FIELDS: usize = 7;

/// Retained projection of one raw kline record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Window open, epoch milliseconds
    pub open_time: i64,
    /// Open price, decimal string
    pub open: String,
    /// High price, decimal string
    pub high: String,
    /// Low price, decimal string
    pub low: String,
    /// Close price, decimal string
    pub close: String,
    /// Traded base volume, decimal string
    pub volume: String,
    /// Window close, epoch milliseconds
    pub close_time: i64,
}

impl Candle {
    /// Parse one raw positional record.
    ///
    /// Records shorter than [`RAW_RECORD_MIN_FIELDS`] or with wrongly typed
    /// retained fields are decode errors; trailing fields are ignored.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        let fields = raw
            .as_array()
            .ok_or_else(|| Error::decode("kline record is not an array"))?;
        if fields.len() < RAW_RECORD_MIN_FIELDS {
            return Err(Error::decode(format!(
                "kline record has {} fields, expected at least {RAW_RECORD_MIN_FIELDS}",
                fields.len()
            )));
        }

        Ok(Self {
            open_time: field_millis(fields, 0)?,
            open: field_decimal(fields, 1)?,
            high: field_decimal(fields, 2)?,
            low: field_decimal(fields, 3)?,
            close: field_decimal(fields, 4)?,
            volume: field_decimal(fields, 5)?,
            close_time: field_millis(fields, 6)?,
        })
    }
}

/// A candle plus ISO-8601 timestamps derived from its epoch fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCandle {
    /// Window open, epoch milliseconds
    pub open_time: i64,
    /// Open price, decimal string
    pub open: String,
    /// High price, decimal string
    pub high: String,
    /// Low price, decimal string
    pub low: String,
    /// Close price, decimal string
    pub close: String,
    /// Traded base volume, decimal string
    pub volume: String,
    /// Window close, epoch milliseconds
    pub close_time: i64,
    /// `open_time` as an ISO-8601 UTC string
    pub open_iso: String,
    /// `close_time` as an ISO-8601 UTC string
    pub close_iso: String,
}

impl EnrichedCandle {
    /// Derive the ISO fields once, at mapping time
    pub fn from_candle(candle: Candle) -> Result<Self> {
        let open_iso = format_utc_millis(candle.open_time)?;
        let close_iso = format_utc_millis(candle.close_time)?;
        Ok(Self {
            open_time: candle.open_time,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume,
            close_time: candle.close_time,
            open_iso,
            close_iso,
        })
    }
}

/// Render epoch milliseconds as an ISO-8601 UTC string with millisecond
/// precision, e.g. `1970-01-01T00:00:01.000Z`
pub fn format_utc_millis(ms: i64) -> Result<String> {
    let ts = DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| Error::decode(format!("timestamp out of range: {ms}")))?;
    Ok(ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

fn field_millis(fields: &[Value], index: usize) -> Result<i64> {
    fields[index].as_i64().ok_or_else(|| {
        Error::decode(format!("field {index} is not an epoch-millisecond integer"))
    })
}

fn field_decimal(fields: &[Value], index: usize) -> Result<String> {
    match &fields[index] {
        Value::String(s) => Ok(s.clone()),
        // some venues emit bare numbers; keep their textual form
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::decode(format!("field {index} is not a decimal string"))),
    }
}
