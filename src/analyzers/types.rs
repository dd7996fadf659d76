//! Data types used by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::utility::fixed3;
use crate::record::NormalizedRecord;

/// Running max/min-by-production tracker for one year.
///
/// Borrows from the normalized batch; lives only for one fold.
#[derive(Debug, Clone, Copy)]
pub struct YearAggregate<'a> {
    pub(crate) max: &'a NormalizedRecord,
    pub(crate) min: &'a NormalizedRecord,
}

impl<'a> YearAggregate<'a> {
    pub fn seed(record: &'a NormalizedRecord) -> Self {
        Self {
            max: record,
            min: record,
        }
    }

    /// Ties keep the record already held.
    pub fn observe(&mut self, record: &'a NormalizedRecord) {
        if record.production > self.max.production {
            self.max = record;
        }
        if record.production < self.min.production {
            self.min = record;
        }
    }

    pub fn to_row(&self, year: &str) -> YearTableRow {
        YearTableRow {
            year: year.to_string(),
            max_crop: self.max.crop.clone(),
            max_production: self.max.production,
            min_crop: self.min.crop.clone(),
            min_production: self.min.production,
        }
    }
}

/// Running sums for one crop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CropAggregate {
    pub(crate) total_yield: f64,
    pub(crate) total_area: f64,
    pub(crate) count: usize,
}

impl CropAggregate {
    pub fn add(&mut self, record: &NormalizedRecord) {
        self.total_yield += record.crop_yield;
        self.total_area += record.area;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn avg_yield(&self) -> f64 {
        self.total_yield / self.count as f64
    }

    pub fn avg_area(&self) -> f64 {
        self.total_area / self.count as f64
    }

    pub fn to_row(&self, crop: &str) -> CropTableRow {
        CropTableRow {
            crop: crop.to_string(),
            avg_yield: fixed3(self.avg_yield()),
            avg_area: fixed3(self.avg_area()),
        }
    }
}

/// Crops with the highest and lowest production in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTableRow {
    pub year: String,
    pub max_crop: String,
    pub max_production: f64,
    pub min_crop: String,
    pub min_production: f64,
}

/// Average yield and cultivated area of one crop across all years,
/// rendered with three decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropTableRow {
    pub crop: String,
    pub avg_yield: String,
    pub avg_area: String,
}

/// Both output tables, rows in first-occurrence order of their key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tables {
    pub year_table: Vec<YearTableRow>,
    pub crop_table: Vec<CropTableRow>,
}

impl Tables {
    pub fn is_empty(&self) -> bool {
        self.year_table.is_empty() && self.crop_table.is_empty()
    }
}

/// Complete result of one pipeline run, as handed to presentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    #[serde(flatten)]
    pub tables: Tables,
}
