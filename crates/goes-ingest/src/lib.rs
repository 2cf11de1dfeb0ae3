//! GOES-R ABI scene ingestion.
//!
//! Reads GOES-19 ABI L2 Cloud and Moisture Imagery (CMIP) NetCDF files into
//! in-memory [`Scene`] rasters with their geostationary geocoding, and parses
//! ABI file names so scene catalogs can be built without opening every file.
//!
//! # GOES-R ABI Data Structure
//!
//! ABI files carry the main data variable `CMI` as packed 16-bit integers
//! with `scale_factor`/`add_offset` attributes. For the infrared bands
//! (7-16) the unpacked values are brightness temperatures in Kelvin. The
//! `x`/`y` coordinate variables hold scan angles in radians from the
//! satellite nadir, and `goes_imager_projection` holds the geostationary
//! projection parameters.

pub mod error;
pub mod filename;
pub mod loader;
pub mod projection;
pub mod scene;

pub use error::{LoadError, LoadResult};
pub use filename::AbiFilename;
pub use loader::{load_scene, silence_hdf5_errors};
pub use projection::GeosProjection;
pub use scene::{ScanGrid, Scene};

/// The ABI band used for convective monitoring (~10.3 um "clean" IR window).
pub const BAND_13: u8 = 13;
