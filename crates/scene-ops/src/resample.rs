//! Reprojection of cropped scenes onto a regular lat/lon grid.

use campaign_common::BoundingBox;
use chrono::{DateTime, Utc};
use goes_ingest::Scene;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SubsetError;

/// Pixel sampling method for reprojection.
///
/// Nearest-neighbor is the default: band-13 brightness temperatures mark
/// convective cell edges, and averaging across an edge invents values that
/// exist in neither cloud top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resampling {
    #[default]
    Nearest,
    Bilinear,
}

/// A scene raster resampled onto a regular lat/lon grid.
///
/// Row 0 is the northern edge. Pixels outside the source coverage (or off
/// the Earth disc) are NaN.
#[derive(Debug, Clone)]
pub struct GeoRaster {
    pub values: Vec<f32>,
    pub width: usize,
    pub height: usize,
    pub extent: BoundingBox,
    /// Observation time inherited from the source scene
    pub time: DateTime<Utc>,
}

impl GeoRaster {
    /// Value at pixel (i, j), or `None` outside the raster.
    pub fn value_at(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.width || j >= self.height {
            return None;
        }
        self.values.get(j * self.width + i).copied()
    }

    /// Fractional pixel position of a geographic point. Linear in the
    /// extent; the result may lie outside the raster.
    pub fn pixel_of(&self, lon: f64, lat: f64) -> (f64, f64) {
        let fx = (lon - self.extent.min_lon) / self.extent.width() * self.width as f64 - 0.5;
        let fy = (self.extent.max_lat - lat) / self.extent.height() * self.height as f64 - 0.5;
        (fx, fy)
    }
}

/// Resample a scene onto a `width` x `height` lat/lon grid over `extent`.
///
/// Each output pixel center is inverse-projected into the scene's
/// scan-angle grid and sampled with `method`. Fails when the extent does
/// not intersect the scene's coverage at all.
pub fn reproject(
    scene: &Scene,
    extent: &BoundingBox,
    width: usize,
    height: usize,
    method: Resampling,
) -> Result<GeoRaster, SubsetError> {
    if width == 0 || height == 0 {
        return Err(SubsetError::EmptyRaster { width, height });
    }

    let src_w = scene.grid.width;
    let src_h = scene.grid.height;

    let mut values = vec![f32::NAN; width * height];
    let mut covered = 0usize;

    for j in 0..height {
        // pixel centers; row 0 at the northern edge
        let lat = extent.max_lat - (j as f64 + 0.5) / height as f64 * extent.height();
        for i in 0..width {
            let lon = extent.min_lon + (i as f64 + 0.5) / width as f64 * extent.width();

            let Some((src_i, src_j)) = scene.latlon_to_pixel(lon, lat) else {
                continue; // off the Earth disc
            };

            let value = match method {
                Resampling::Nearest => sample_nearest(scene, src_i, src_j),
                Resampling::Bilinear => sample_bilinear(scene, src_i, src_j),
            };

            if let Some(v) = value {
                values[j * width + i] = v;
                covered += 1;
            }
        }
    }

    if covered == 0 {
        return Err(SubsetError::RegionOutOfBounds { region: *extent });
    }

    debug!(
        out_dims = ?(width, height),
        src_dims = ?(src_w, src_h),
        covered,
        ?method,
        "Reprojected scene to lat/lon grid"
    );

    Ok(GeoRaster {
        values,
        width,
        height,
        extent: *extent,
        time: scene.time,
    })
}

/// Nearest-neighbor sample at a fractional pixel position.
fn sample_nearest(scene: &Scene, i: f64, j: f64) -> Option<f32> {
    let ii = i.round();
    let jj = j.round();
    if ii < 0.0 || jj < 0.0 {
        return None;
    }
    scene.value_at(ii as usize, jj as usize)
}

/// Bilinear sample at a fractional pixel position. NaN neighbors (fill
/// pixels) propagate into the result.
fn sample_bilinear(scene: &Scene, i: f64, j: f64) -> Option<f32> {
    if i < 0.0 || j < 0.0 {
        return None;
    }

    let x1 = i.floor() as usize;
    let y1 = j.floor() as usize;
    if x1 >= scene.grid.width || y1 >= scene.grid.height {
        return None;
    }
    let x2 = (x1 + 1).min(scene.grid.width - 1);
    let y2 = (y1 + 1).min(scene.grid.height - 1);

    let dx = (i - x1 as f64) as f32;
    let dy = (j - y1 as f64) as f32;

    let v11 = scene.value_at(x1, y1)?;
    let v21 = scene.value_at(x2, y1)?;
    let v12 = scene.value_at(x1, y2)?;
    let v22 = scene.value_at(x2, y2)?;

    let top = v11 * (1.0 - dx) + v21 * dx;
    let bottom = v12 * (1.0 - dx) + v22 * dx;
    Some(top * (1.0 - dy) + bottom * dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::{coverage, synthetic_scene};
    use campaign_common::BoundingBox;

    #[test]
    fn test_nearest_preserves_source_values() {
        let scene = synthetic_scene();
        let extent = BoundingBox::new(-79.5, -2.5, -77.0, 0.5);
        let raster = reproject(&scene, &extent, 64, 64, Resampling::Nearest).unwrap();

        let source_values: std::collections::HashSet<u32> =
            scene.values.iter().map(|v| v.to_bits()).collect();

        for &v in &raster.values {
            if v.is_nan() {
                continue;
            }
            assert!(
                source_values.contains(&v.to_bits()),
                "nearest-neighbor output {v} is not an exact source value"
            );
        }
    }

    #[test]
    fn test_bilinear_blends_neighbors() {
        let scene = synthetic_scene();
        let extent = BoundingBox::new(-79.5, -2.5, -77.0, 0.5);
        let raster = reproject(&scene, &extent, 64, 64, Resampling::Bilinear).unwrap();

        // the synthetic gradient spans 200-295 K; interpolation stays inside
        for &v in &raster.values {
            if v.is_nan() {
                continue;
            }
            assert!((200.0..=295.0).contains(&v), "interpolated value {v}");
        }
    }

    #[test]
    fn test_output_extent_and_time() {
        let scene = synthetic_scene();
        let extent = BoundingBox::new(-79.0, -2.0, -78.0, -1.0);
        let raster = reproject(&scene, &extent, 32, 32, Resampling::Nearest).unwrap();
        assert_eq!(raster.extent, extent);
        assert_eq!(raster.time, scene.time);
        assert_eq!(raster.values.len(), 32 * 32);
    }

    #[test]
    fn test_disjoint_extent_fails() {
        let scene = synthetic_scene();
        let extent = BoundingBox::new(-60.0, 20.0, -55.0, 25.0);
        assert!(matches!(
            reproject(&scene, &extent, 16, 16, Resampling::Nearest),
            Err(SubsetError::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_empty_raster_fails() {
        let scene = synthetic_scene();
        assert!(matches!(
            reproject(&scene, &coverage(), 0, 10, Resampling::Nearest),
            Err(SubsetError::EmptyRaster { .. })
        ));
    }

    #[test]
    fn test_pixel_of_mapping() {
        let raster = GeoRaster {
            values: vec![0.0; 100],
            width: 10,
            height: 10,
            extent: BoundingBox::new(-80.0, -2.0, -78.0, 0.0),
            time: crate::testdata::scene_time(),
        };

        // north-west corner maps near pixel (-0.5, -0.5)
        let (i, j) = raster.pixel_of(-80.0, 0.0);
        assert!((i + 0.5).abs() < 1e-9);
        assert!((j + 0.5).abs() < 1e-9);

        // center maps to the raster center
        let (i, j) = raster.pixel_of(-79.0, -1.0);
        assert!((i - 4.5).abs() < 1e-9);
        assert!((j - 4.5).abs() < 1e-9);
    }
}
