//! Output formatting and persistence for the summary tables.
//!
//! Supports logging rows, JSON serialization, and CSV export.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::Report;
use crate::record::NormalizedRecord;
use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};

pub const YEAR_TABLE_FILE: &str = "year_table.csv";
pub const CROP_TABLE_FILE: &str = "crop_table.csv";

/// Column names, written explicitly so an empty table still has a header.
const YEAR_TABLE_HEADER: [&str; 5] = ["year", "maxCrop", "maxProduction", "minCrop", "minProduction"];
const CROP_TABLE_HEADER: [&str; 3] = ["crop", "avgYield", "avgArea"];
const NORMALIZED_HEADER: [&str; 5] = ["crop", "year", "production", "area", "crop_yield"];

/// Logs both tables row by row.
pub fn print_tables(report: &Report) {
    info!(rows = report.tables.year_table.len(), "Yearly crop production");
    for row in &report.tables.year_table {
        info!(
            year = %row.year,
            max_crop = %row.max_crop,
            max_production = row.max_production,
            min_crop = %row.min_crop,
            min_production = row.min_production,
            "Year"
        );
    }

    info!(rows = report.tables.crop_table.len(), "Crop averages");
    for row in &report.tables.crop_table {
        info!(
            crop = %row.crop,
            avg_yield = %row.avg_yield,
            avg_area = %row.avg_area,
            "Crop"
        );
    }
}

/// Serializes the report as pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the report as JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json(report: &Report, path: Option<&Path>) -> Result<()> {
    let json = to_json(report)?;
    match path {
        Some(path) => {
            fs::write(path, json)?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Writes `year_table.csv` and `crop_table.csv` into `dir`, creating it if
/// needed. Existing files are replaced.
pub fn write_csv_tables(report: &Report, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let year_path = dir.join(YEAR_TABLE_FILE);
    let crop_path = dir.join(CROP_TABLE_FILE);
    write_csv(&year_path, &YEAR_TABLE_HEADER, &report.tables.year_table)?;
    write_csv(&crop_path, &CROP_TABLE_HEADER, &report.tables.crop_table)?;

    info!(
        year_table = %year_path.display(),
        crop_table = %crop_path.display(),
        "CSV tables written"
    );
    Ok((year_path, crop_path))
}

/// Writes normalized records as CSV, for inspecting the cleaning step.
pub fn write_normalized_csv(records: &[NormalizedRecord], path: &Path) -> Result<()> {
    write_csv(path, &NORMALIZED_HEADER, records)?;
    info!(path = %path.display(), records = records.len(), "Normalized records written");
    Ok(())
}

/// `header` must match the serialized field names of `T`.
fn write_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV");

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
