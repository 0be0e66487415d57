//! Output module
//!
//! CSV sink for the accumulated candles. The destination file is created or
//! fully overwritten in one shot at the end of a run; there is no append or
//! merge behavior.

mod csv;

pub use csv::{csv_row, CandleSink, CsvSink, CSV_HEADER};
