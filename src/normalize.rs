//! Raw record cleaning.
//!
//! Numeric fields fall back to `0` when missing or unparsable. The year is
//! the aggregation key, so a year without four digits fails the batch.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::PipelineError;
use crate::record::{self, NormalizedRecord, RawRecord};

/// First run of four ASCII digits.
static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("Invalid year regex"));

/// Longest leading decimal literal, after leading whitespace is skipped.
static LEADING_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("Invalid number regex")
});

/// Normalizes a batch, preserving length and order.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedYear`] for the first record whose year
/// field has no 4-digit sequence. No partial output is returned.
pub fn normalize(raw: &[RawRecord]) -> Result<Vec<NormalizedRecord>, PipelineError> {
    let records = raw
        .iter()
        .enumerate()
        .map(|(index, row)| normalize_record(index, row))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(records = records.len(), "Normalized record batch");
    Ok(records)
}

/// Normalizes one record. `index` is only used for error reporting.
pub fn normalize_record(index: usize, raw: &RawRecord) -> Result<NormalizedRecord, PipelineError> {
    let year_text = raw.get(record::YEAR).map(value_text).unwrap_or_default();
    let year = extract_year(&year_text).ok_or_else(|| PipelineError::MalformedYear {
        index,
        value: year_text.clone(),
    })?;

    Ok(NormalizedRecord {
        crop: raw.get(record::CROP_NAME).map(value_text).unwrap_or_default(),
        year: year.to_string(),
        production: parse_numeric(raw.get(record::PRODUCTION)),
        area: parse_numeric(raw.get(record::AREA)),
        crop_yield: parse_numeric(raw.get(record::CROP_YIELD)),
    })
}

/// Returns the first 4-digit sequence in `text`.
pub fn extract_year(text: &str) -> Option<&str> {
    YEAR_REGEX.find(text).map(|m| m.as_str())
}

/// Reads a numeric field, defaulting to `0.0`.
///
/// Strings contribute their leading decimal literal (`"12.5 t"` is `12.5`).
/// Non-finite results, booleans, null, arrays and objects all give `0.0`.
pub fn parse_numeric(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_leading_float(s),
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn parse_leading_float(text: &str) -> Option<f64> {
    LEADING_NUMBER_REGEX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Text form of a grouping field. Strings pass through verbatim, null is
/// empty, anything else uses its JSON rendering.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
