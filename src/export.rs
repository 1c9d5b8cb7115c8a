//! CSV export of a quote batch: header `Quote,Author`, one row per record.

use crate::error::GateError;
use crate::types::QuoteRecord;
use csv::{ReaderBuilder, WriterBuilder};
use std::io;

pub const HEADER: [&str; 2] = ["Quote", "Author"];

/// Render records as CSV. The header row is written even when there are no records.
pub fn to_csv(records: &[QuoteRecord]) -> Result<String, GateError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([record.quote.as_str(), record.author.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|e| GateError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| GateError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Read an export back into records.
pub fn parse_csv(input: &str) -> Result<Vec<QuoteRecord>, GateError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());
    let records = reader
        .deserialize::<QuoteRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}
