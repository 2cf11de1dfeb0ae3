//! Errors raised while loading ABI scenes.

use thiserror::Error;

/// Result type for ingestion operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors from reading a raw ABI scene file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid NetCDF data: {0}")]
    Format(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Band mismatch: expected band {expected}, file contains band {found}")]
    BandMismatch { expected: u8, found: u8 },

    #[error("Grid mismatch: {width}x{height} grid but {values} data values")]
    GridMismatch {
        width: usize,
        height: usize,
        values: usize,
    },

    #[error("Unrecognized ABI file name: {0}")]
    Filename(String),
}
