//! ABI NetCDF scene loading.

use std::path::Path;
use std::sync::Once;

use chrono::{Duration, TimeZone, Utc};
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::filename::AbiFilename;
use crate::projection::GeosProjection;
use crate::scene::{ScanGrid, Scene};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose diagnostics to stderr even when errors
/// are handled gracefully by the Rust code (e.g. when probing for optional
/// attributes). This disables that output via H5Eset_auto2 with null
/// handlers. Safe to call any number of times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and null handlers are a
        // documented way to disable automatic error reporting.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Load one ABI L2 CMIP scene from a NetCDF file.
///
/// Unpacks the `CMI` variable (scale/offset applied, fill values become
/// NaN), reads the scan-angle geocoding and projection parameters, and
/// checks that the file carries `expected_band`.
pub fn load_scene<P: AsRef<Path>>(path: P, expected_band: u8) -> LoadResult<Scene> {
    let path = path.as_ref();
    silence_hdf5_errors();

    if !path.exists() {
        return Err(LoadError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            path.display().to_string(),
        )));
    }

    let nc_file = netcdf::open(path)
        .map_err(|e| LoadError::Format(format!("Failed to open NetCDF: {}", e)))?;

    let width = nc_file
        .dimension("x")
        .ok_or_else(|| LoadError::MissingData("x dimension".to_string()))?
        .len();
    let height = nc_file
        .dimension("y")
        .ok_or_else(|| LoadError::MissingData("y dimension".to_string()))?
        .len();

    // Band check before unpacking the full raster
    let band_var = nc_file
        .variable("band_id")
        .ok_or_else(|| LoadError::MissingData("band_id variable".to_string()))?;
    let bands: Vec<i32> = band_var
        .get_values(..)
        .map_err(|e| LoadError::Format(format!("Failed to read band_id: {}", e)))?;
    let found = *bands
        .first()
        .ok_or_else(|| LoadError::MissingData("band_id value".to_string()))? as u8;
    if found != expected_band {
        return Err(LoadError::BandMismatch {
            expected: expected_band,
            found,
        });
    }

    let cmi_var = nc_file
        .variable("CMI")
        .ok_or_else(|| LoadError::MissingData("CMI variable".to_string()))?;

    let raw_data: Vec<i16> = cmi_var
        .get_values(..)
        .map_err(|e| LoadError::Format(format!("Failed to read CMI: {}", e)))?;

    if raw_data.len() != width * height {
        return Err(LoadError::GridMismatch {
            width,
            height,
            values: raw_data.len(),
        });
    }

    let scale_factor = get_f32_attr(&cmi_var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f32_attr(&cmi_var, "add_offset").unwrap_or(0.0);
    let fill_value = get_i16_attr(&cmi_var, "_FillValue").unwrap_or(-1);

    let values = unpack_cmi(&raw_data, scale_factor, add_offset, fill_value);

    // Scan-angle geocoding from the packed x/y coordinate attributes
    let x_var = nc_file
        .variable("x")
        .ok_or_else(|| LoadError::MissingData("x variable".to_string()))?;
    let x_scale = get_f32_attr(&x_var, "scale_factor").unwrap_or(1.4e-05) as f64;
    let x_offset = get_f32_attr(&x_var, "add_offset").unwrap_or(-0.101353) as f64;

    let y_var = nc_file
        .variable("y")
        .ok_or_else(|| LoadError::MissingData("y variable".to_string()))?;
    let y_scale = get_f32_attr(&y_var, "scale_factor").unwrap_or(-1.4e-05) as f64;
    let y_offset = get_f32_attr(&y_var, "add_offset").unwrap_or(0.128233) as f64;

    let proj_var = nc_file
        .variable("goes_imager_projection")
        .ok_or_else(|| LoadError::MissingData("goes_imager_projection variable".to_string()))?;

    let projection = GeosProjection {
        perspective_point_height: get_f64_attr(&proj_var, "perspective_point_height")
            .unwrap_or(35786023.0),
        semi_major_axis: get_f64_attr(&proj_var, "semi_major_axis").unwrap_or(6378137.0),
        semi_minor_axis: get_f64_attr(&proj_var, "semi_minor_axis").unwrap_or(6356752.31414),
        longitude_origin: get_f64_attr(&proj_var, "longitude_of_projection_origin")
            .unwrap_or(-75.2),
    };

    // Observation time: the `t` variable is seconds since the J2000 epoch
    let t_var = nc_file
        .variable("t")
        .ok_or_else(|| LoadError::MissingData("t variable".to_string()))?;
    let t_seconds: Vec<f64> = t_var
        .get_values(..)
        .map_err(|e| LoadError::Format(format!("Failed to read t: {}", e)))?;
    let t_seconds = *t_seconds
        .first()
        .ok_or_else(|| LoadError::MissingData("t value".to_string()))?;
    let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let time = j2000 + Duration::milliseconds((t_seconds * 1000.0) as i64);

    // Satellite id comes cheapest from the file name
    let satellite = AbiFilename::parse(path)
        .map(|f| f.satellite)
        .unwrap_or_else(|_| "GOES".to_string());

    debug!(
        path = %path.display(),
        band = found,
        width,
        height,
        time = %time,
        "Loaded ABI scene"
    );

    Ok(Scene {
        values,
        grid: ScanGrid {
            width,
            height,
            x_offset,
            x_scale,
            y_offset,
            y_scale,
        },
        projection,
        time,
        band: found,
        satellite,
    })
}

/// Apply scale/offset to packed CMI counts; fill values become NaN.
fn unpack_cmi(raw: &[i16], scale_factor: f32, add_offset: f32, fill_value: i16) -> Vec<f32> {
    raw.iter()
        .map(|&val| {
            if val == fill_value {
                f32::NAN
            } else {
                val as f32 * scale_factor + add_offset
            }
        })
        .collect()
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f32_attr(var: &netcdf::Variable, name: &str) -> Option<f32> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f32::try_from(attr_value).ok()
}

fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

fn get_i16_attr(var: &netcdf::Variable, name: &str) -> Option<i16> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    i16::try_from(attr_value).ok()
}
