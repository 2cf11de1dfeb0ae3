//! Spatial and temporal scene operations.
//!
//! Sits between ingestion and rendering: crops a [`goes_ingest::Scene`] to a
//! campaign region, reprojects the crop onto a regular lat/lon grid, and
//! picks the before/during/after scenes for a flight from a catalog of
//! available observation times.

pub mod catalog;
pub mod error;
pub mod resample;
pub mod select;
pub mod subset;
pub mod testdata;

pub use catalog::{CatalogEntry, SceneCatalog};
pub use error::{CatalogError, SelectError, SubsetError};
pub use resample::{reproject, GeoRaster, Resampling};
pub use select::{select_available, select_phases, PhaseOffsets, PhaseSelection};
pub use subset::crop_to_region;
