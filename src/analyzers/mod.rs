//! Crop aggregation over normalized records.
//!
//! Builds the per-year production extremes and the per-crop averages in one
//! pass, then projects them into the two output tables.

pub mod aggregate;
pub mod analyzer;
pub mod types;
pub mod utility;
