//! Errors for scene operations.

use campaign_common::{BoundingBox, Phase};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from spatial subsetting and reprojection.
#[derive(Debug, Error)]
pub enum SubsetError {
    /// The region does not intersect scene coverage. Covers both regions
    /// outside the scene's pixel window and regions entirely off the
    /// visible Earth disc.
    #[error("Region {region:?} does not intersect scene coverage")]
    RegionOutOfBounds { region: BoundingBox },

    #[error("Requested raster size {width}x{height} is empty")]
    EmptyRaster { width: usize, height: usize },
}

/// Errors from temporal phase selection.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error(
        "No scene available for phase '{phase}': target {target}, \
         tolerance {tolerance_minutes} min"
    )]
    NoScenesAvailable {
        phase: Phase,
        target: DateTime<Utc>,
        tolerance_minutes: i64,
    },

    #[error("Scene catalog is empty")]
    EmptyCatalog,
}

/// Errors from building a scene catalog. I/O failures during the scan
/// surface through the walkdir error's cause.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}
