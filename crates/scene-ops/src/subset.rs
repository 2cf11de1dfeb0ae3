//! Spatial subsetting of ABI scenes.

use campaign_common::Region;
use goes_ingest::Scene;
use tracing::debug;

use crate::error::SubsetError;

/// Boundary samples per bbox edge. The geostationary projection bends
/// straight lat/lon edges, so corners alone under-estimate the window.
const EDGE_SAMPLES: usize = 16;

/// Crop a scene to the pixel window covering a campaign region.
///
/// The window is the region's enclosing bbox projected into scan-angle
/// space and rounded outward to whole pixels, so the output raster always
/// covers at least the region. Fails with
/// [`SubsetError::RegionOutOfBounds`] when the region does not intersect
/// the scene's coverage, including regions entirely off the visible Earth
/// disc.
pub fn crop_to_region(scene: &Scene, region: &Region) -> Result<Scene, SubsetError> {
    let bbox = region.bbox();

    // Sample the bbox boundary and collect fractional pixel positions of
    // the points visible from the satellite.
    let mut min_i = f64::INFINITY;
    let mut max_i = f64::NEG_INFINITY;
    let mut min_j = f64::INFINITY;
    let mut max_j = f64::NEG_INFINITY;
    let mut visible = 0usize;

    for (lon, lat) in boundary_samples(&bbox) {
        if let Some((i, j)) = scene.latlon_to_pixel(lon, lat) {
            min_i = min_i.min(i);
            max_i = max_i.max(i);
            min_j = min_j.min(j);
            max_j = max_j.max(j);
            visible += 1;
        }
    }

    // No boundary sample visible from the satellite: the region lies on
    // the far side of the Earth
    if visible == 0 {
        return Err(SubsetError::RegionOutOfBounds { region: bbox });
    }

    // Round outward to whole pixels
    let x0 = min_i.floor() as i64;
    let x1 = max_i.ceil() as i64;
    let y0 = min_j.floor() as i64;
    let y1 = max_j.ceil() as i64;

    let width = scene.grid.width as i64;
    let height = scene.grid.height as i64;

    // Disjoint from the scene's pixel coverage
    if x1 < 0 || y1 < 0 || x0 >= width || y0 >= height {
        return Err(SubsetError::RegionOutOfBounds { region: bbox });
    }

    let x0c = x0.max(0) as usize;
    let y0c = y0.max(0) as usize;
    let x1c = x1.min(width - 1) as usize;
    let y1c = y1.min(height - 1) as usize;

    let out_w = x1c - x0c + 1;
    let out_h = y1c - y0c + 1;

    debug!(
        window = ?(x0c, y0c, out_w, out_h),
        scene_dims = ?(scene.grid.width, scene.grid.height),
        "Cropping scene to region window"
    );

    Ok(scene.crop(x0c, y0c, out_w, out_h))
}

/// Corner and edge samples of a bbox boundary as (lon, lat).
fn boundary_samples(
    bbox: &campaign_common::BoundingBox,
) -> impl Iterator<Item = (f64, f64)> + '_ {
    let n = EDGE_SAMPLES;
    (0..=n).flat_map(move |k| {
        let t = k as f64 / n as f64;
        let lon = bbox.min_lon + t * bbox.width();
        let lat = bbox.min_lat + t * bbox.height();
        [
            (lon, bbox.min_lat), // south edge
            (lon, bbox.max_lat), // north edge
            (bbox.min_lon, lat), // west edge
            (bbox.max_lon, lat), // east edge
        ]
    })
}
