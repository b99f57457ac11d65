//! Error taxonomy for the extraction pipeline.
//!
//! Every failure here is terminal for the operation that raised it; nothing
//! is retried automatically.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid profile reference: {0}")]
    InvalidProfileReference(String),
    #[error("an extraction is already in progress")]
    ExtractionInProgress,
    #[error("extraction cancelled")]
    Cancelled,
    #[error("source error: {0}")]
    Source(String),
    #[error("export failed: {0}")]
    Export(String),
}

impl From<csv::Error> for ExtractError {
    fn from(e: csv::Error) -> Self {
        ExtractError::Export(e.to_string())
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(e: serde_json::Error) -> Self {
        ExtractError::Export(e.to_string())
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(e: std::io::Error) -> Self {
        ExtractError::Export(e.to_string())
    }
}
