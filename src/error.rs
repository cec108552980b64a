//! Error type shared by every stage of the pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThirstyError>;

/// Failures that abort a run. There is no partial-success mode.
#[derive(Debug, Error)]
pub enum ThirstyError {
    /// The input track has no points to measure against
    #[error("route contains no track points")]
    EmptyRoute,

    /// Non-positive distance threshold, unknown POI category, ...
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Network failure or non-success HTTP status (download or Overpass)
    #[error("remote query failed: {0}")]
    RemoteQuery(String),

    /// Malformed GPX document or Overpass JSON response
    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ThirstyError {
    fn from(e: reqwest::Error) -> Self {
        ThirstyError::RemoteQuery(e.to_string())
    }
}

impl From<gpx::errors::GpxError> for ThirstyError {
    fn from(e: gpx::errors::GpxError) -> Self {
        ThirstyError::Parse(format!("invalid GPX: {}", e))
    }
}
