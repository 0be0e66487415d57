//! CSV file sink
//!
//! Writes the enriched candle sequence as a delimited UTF-8 file. None of
//! the fields can contain the delimiter, so no quoting or escaping is
//! applied.

use crate::candle::EnrichedCandle;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Header line, matching the per-row field order exactly
pub const CSV_HEADER: &str = "openTime,open,high,low,close,volume,closeTime,openISO,closeISO";

/// Destination for one run's accumulated candles, invoked exactly once
pub trait CandleSink: Send + Sync {
    /// Durably write the full sequence; returns the number of rows written
    fn write(&self, candles: &[EnrichedCandle]) -> Result<usize>;
}

/// Sink that writes a header plus one comma-joined row per candle
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Sink writing to `path`, creating or overwriting the file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CandleSink for CsvSink {
    fn write(&self, candles: &[EnrichedCandle]) -> Result<usize> {
        let file = File::create(&self.path).map_err(|e| {
            Error::output(format!("failed to create {}: {e}", self.path.display()))
        })?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{CSV_HEADER}")?;
        for candle in candles {
            writeln!(writer, "{}", csv_row(candle))?;
        }
        writer.flush()?;

        info!("wrote {} rows to {}", candles.len(), self.path.display());
        Ok(candles.len())
    }
}

/// Render one candle in header field order
pub fn csv_row(candle: &EnrichedCandle) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{}",
        candle.open_time,
        candle.open,
        candle.high,
        candle.low,
        candle.close,
        candle.volume,
        candle.close_time,
        candle.open_iso,
        candle.close_iso
    )
}
