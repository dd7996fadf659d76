//! Error types for record ingestion and the normalize/aggregate pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failures acquiring a raw batch. Recovered at the boundary by
/// substituting an empty batch, see [`crate::ingest::fetch_or_empty`].
#[derive(Debug, Error)]
pub enum IngestError {
    /// Transport failure or non-success HTTP status.
    #[error("HTTP request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid source URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload is not a JSON array of objects.
    #[error("malformed JSON record batch: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV record batch: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The year field of the record at `index` holds no 4-digit sequence.
    #[error("record {index}: no 4-digit year in {value:?}")]
    MalformedYear { index: usize, value: String },
}
