//! Decoders for raw record batches.

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::IngestError;
use crate::record::RawRecord;

/// Wire format of a record batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RecordFormat {
    /// A JSON array of objects.
    #[default]
    Json,
    /// A CSV file with a header row naming the fields.
    Csv,
}

impl RecordFormat {
    /// Picks the format from a path or URL extension. Anything other than
    /// `.csv` is treated as JSON.
    pub fn detect(source: &str) -> Self {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => RecordFormat::Csv,
            _ => RecordFormat::Json,
        }
    }
}

/// Decodes a batch of raw records.
///
/// # Errors
///
/// Returns an error if the bytes are not a JSON array of objects, or not a
/// CSV document with a header row.
pub fn parse_records(bytes: &[u8], format: RecordFormat) -> Result<Vec<RawRecord>, IngestError> {
    match format {
        RecordFormat::Json => parse_json(bytes),
        RecordFormat::Csv => parse_csv(bytes),
    }
}

fn parse_json(bytes: &[u8]) -> Result<Vec<RawRecord>, IngestError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Each cell becomes a string value; empty cells stay empty strings.
fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRecord>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let fields: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name.to_string(), Value::String(cell.to_string())))
            .collect();
        records.push(RawRecord::from(fields));
    }

    Ok(records)
}
