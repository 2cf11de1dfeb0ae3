//! Synthetic scenes for tests.
//!
//! Builds in-memory ABI-like scenes over the Ecuador campaign area without
//! touching NetCDF, so spatial and rendering code can be exercised with
//! predictable data.

use campaign_common::BoundingBox;
use chrono::{DateTime, TimeZone, Utc};
use goes_ingest::{GeosProjection, ScanGrid, Scene};

/// Geographic area the synthetic scenes cover.
pub fn coverage() -> BoundingBox {
    BoundingBox::new(-82.0, -6.0, -74.0, 3.0)
}

/// Default timestamp of [`synthetic_scene`].
pub fn scene_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 4, 15, 0, 0).unwrap()
}

/// A 120x120 band-13-like scene covering [`coverage`], with a smooth
/// brightness-temperature gradient from 200 K (north-west) to 295 K
/// (south-east).
pub fn synthetic_scene() -> Scene {
    synthetic_scene_at(scene_time())
}

/// Same raster as [`synthetic_scene`] with an explicit timestamp.
pub fn synthetic_scene_at(time: DateTime<Utc>) -> Scene {
    let projection = GeosProjection::goes19();
    let bbox = coverage();
    let (width, height) = (120usize, 120usize);

    // Scan-angle bounds of the coverage box. All four corners of the
    // Ecuador box are comfortably on the visible disc of GOES-East.
    let corners = [
        (bbox.min_lon, bbox.min_lat),
        (bbox.min_lon, bbox.max_lat),
        (bbox.max_lon, bbox.min_lat),
        (bbox.max_lon, bbox.max_lat),
    ];
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (lon, lat) in corners {
        let (x, y) = projection
            .from_geographic(lon, lat)
            .expect("corner visible from GOES-East");
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let grid = ScanGrid {
        width,
        height,
        x_offset: min_x,
        x_scale: (max_x - min_x) / (width - 1) as f64,
        // rows run north to south
        y_offset: max_y,
        y_scale: -(max_y - min_y) / (height - 1) as f64,
    };

    let mut values = Vec::with_capacity(width * height);
    for j in 0..height {
        for i in 0..width {
            let fx = i as f32 / (width - 1) as f32;
            let fy = j as f32 / (height - 1) as f32;
            values.push(200.0 + fx * 50.0 + fy * 45.0);
        }
    }

    Scene {
        values,
        grid,
        projection,
        time,
        band: 13,
        satellite: "G19".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_scene_covers_its_bbox() {
        let scene = synthetic_scene();
        let bbox = coverage();

        for (lon, lat) in [
            (bbox.min_lon, bbox.min_lat),
            (bbox.max_lon, bbox.max_lat),
            bbox.center(),
        ] {
            let (i, j) = scene.latlon_to_pixel(lon, lat).unwrap();
            assert!(i >= -0.5 && i <= scene.grid.width as f64 - 0.5);
            assert!(j >= -0.5 && j <= scene.grid.height as f64 - 0.5);
        }
    }

    #[test]
    fn test_synthetic_scene_value_range() {
        let scene = synthetic_scene();
        let min = scene.values.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = scene
            .values
            .iter()
            .cloned()
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min, 200.0);
        assert_eq!(max, 295.0);
    }
}
