//! Region-of-interest definitions for a campaign.

use crate::BoundingBox;
use serde::{Deserialize, Serialize};

/// A campaign region of interest: either a plain bounding box or a polygon
/// in geographic coordinates.
///
/// The polygon is an open ring of (lon, lat) vertices; the closing edge back
/// to the first vertex is implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Region {
    Bbox(BoundingBox),
    Polygon { vertices: Vec<(f64, f64)> },
}

impl Region {
    /// Validate the region definition.
    pub fn validate(&self) -> Result<(), RegionError> {
        match self {
            Region::Bbox(bbox) => {
                if bbox.is_degenerate() {
                    return Err(RegionError::DegenerateBbox(*bbox));
                }
            }
            Region::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(RegionError::TooFewVertices(vertices.len()));
                }
            }
        }
        Ok(())
    }

    /// Enclosing bounding box of the region.
    pub fn bbox(&self) -> BoundingBox {
        match self {
            Region::Bbox(bbox) => *bbox,
            Region::Polygon { vertices } => {
                // validate() guarantees at least three vertices
                BoundingBox::enclosing(vertices)
                    .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
            }
        }
    }

    /// Closed outline ring for drawing: the last point equals the first.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        match self {
            Region::Bbox(b) => vec![
                (b.min_lon, b.min_lat),
                (b.max_lon, b.min_lat),
                (b.max_lon, b.max_lat),
                (b.min_lon, b.max_lat),
                (b.min_lon, b.min_lat),
            ],
            Region::Polygon { vertices } => {
                let mut ring = vertices.clone();
                if let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) {
                    if first != last {
                        ring.push(first);
                    }
                }
                ring
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    #[error("Degenerate bounding box: {0:?}")]
    DegenerateBbox(BoundingBox),

    #[error("Polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}
