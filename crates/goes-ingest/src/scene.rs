//! In-memory ABI scene raster with geocoding.

use crate::projection::GeosProjection;
use chrono::{DateTime, Utc};

/// Linear mapping between pixel indices and ABI scan angles.
///
/// The angle at pixel center `i` along an axis is `offset + i * scale`
/// (radians). `y_scale` is normally negative: ABI rows run north to south.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanGrid {
    pub width: usize,
    pub height: usize,
    pub x_offset: f64,
    pub x_scale: f64,
    pub y_offset: f64,
    pub y_scale: f64,
}

impl ScanGrid {
    /// Scan angle at the center of column `i`.
    pub fn x_angle(&self, i: f64) -> f64 {
        self.x_offset + i * self.x_scale
    }

    /// Scan angle at the center of row `j`.
    pub fn y_angle(&self, j: f64) -> f64 {
        self.y_offset + j * self.y_scale
    }

    /// Fractional column index for an east-west scan angle.
    pub fn x_index(&self, x_rad: f64) -> f64 {
        (x_rad - self.x_offset) / self.x_scale
    }

    /// Fractional row index for a north-south scan angle.
    pub fn y_index(&self, y_rad: f64) -> f64 {
        (y_rad - self.y_offset) / self.y_scale
    }

    /// A sub-grid starting at pixel (x0, y0).
    pub fn window(&self, x0: usize, y0: usize, width: usize, height: usize) -> ScanGrid {
        ScanGrid {
            width,
            height,
            x_offset: self.x_angle(x0 as f64),
            x_scale: self.x_scale,
            y_offset: self.y_angle(y0 as f64),
            y_scale: self.y_scale,
        }
    }
}

/// One satellite observation: an immutable brightness-temperature raster
/// plus everything needed to place it on the Earth.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Brightness temperature in Kelvin, row-major, NaN where fill
    pub values: Vec<f32>,
    pub grid: ScanGrid,
    pub projection: GeosProjection,
    /// Scan start time (UTC)
    pub time: DateTime<Utc>,
    /// ABI band number (13 for the clean IR window)
    pub band: u8,
    /// Satellite identifier, e.g. "G19"
    pub satellite: String,
}

impl Scene {
    /// Value at pixel (i, j), or `None` outside the grid.
    pub fn value_at(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.grid.width || j >= self.grid.height {
            return None;
        }
        self.values.get(j * self.grid.width + i).copied()
    }

    /// Fractional pixel position of a geographic point, or `None` when the
    /// point is not visible from the satellite. The position may lie outside
    /// the grid; callers check bounds themselves.
    pub fn latlon_to_pixel(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        let (x_rad, y_rad) = self.projection.from_geographic(lon, lat)?;
        Some((self.grid.x_index(x_rad), self.grid.y_index(y_rad)))
    }

    /// Geographic position of a pixel center, or `None` off the Earth disc.
    pub fn pixel_to_latlon(&self, i: f64, j: f64) -> Option<(f64, f64)> {
        self.projection
            .to_geographic(self.grid.x_angle(i), self.grid.y_angle(j))
    }

    /// Derive a cropped scene covering the pixel window. The window must lie
    /// inside the grid.
    pub fn crop(&self, x0: usize, y0: usize, width: usize, height: usize) -> Scene {
        debug_assert!(x0 + width <= self.grid.width);
        debug_assert!(y0 + height <= self.grid.height);

        let mut values = Vec::with_capacity(width * height);
        for j in y0..y0 + height {
            let row_start = j * self.grid.width + x0;
            values.extend_from_slice(&self.values[row_start..row_start + width]);
        }

        Scene {
            values,
            grid: self.grid.window(x0, y0, width, height),
            projection: self.projection.clone(),
            time: self.time,
            band: self.band,
            satellite: self.satellite.clone(),
        }
    }
}
