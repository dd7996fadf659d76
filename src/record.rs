//! Raw and normalized agricultural records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column carrying the crop name.
pub const CROP_NAME: &str = "Crop Name";
/// Free-text year column, e.g. `"1950-51"` or `"FY 2001"`.
pub const YEAR: &str = "Year";
pub const PRODUCTION: &str = "Crop Production (UOM:t(Tonnes))";
pub const AREA: &str = "Area Under Cultivation (UOM:Ha(Hectares))";
pub const CROP_YIELD: &str = "Yield Of Crops (UOM:Kg/Ha(KilogramperHectare))";

/// One untyped row as delivered by a record source.
///
/// Any field may be missing or hold a value of the wrong type; the
/// normalizer decides what each field turns into.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Builder-style setter, mostly for fixtures and CSV rows.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A cleaned record. Every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub crop: String,
    /// Four ASCII digits taken from the raw year text.
    pub year: String,
    pub production: f64,
    pub area: f64,
    pub crop_yield: f64,
}
