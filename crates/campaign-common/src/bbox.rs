//! Geographic bounding box operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees (longitude negative west).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Center point as (lon, lat).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// A box has zero or negative extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if this box intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_lon < other.max_lon
            && self.max_lon > other.min_lon
            && self.min_lat < other.max_lat
            && self.max_lat > other.min_lat
    }

    /// Compute the intersection of two bounding boxes.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }

        Some(BoundingBox {
            min_lon: self.min_lon.max(other.min_lon),
            min_lat: self.min_lat.max(other.min_lat),
            max_lon: self.max_lon.min(other.max_lon),
            max_lat: self.max_lat.min(other.max_lat),
        })
    }

    /// Check if a point is contained within this box (edges inclusive).
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// Check if another box lies fully inside this one (edges inclusive).
    pub fn contains_bbox(&self, other: &BoundingBox) -> bool {
        self.contains_point(other.min_lon, other.min_lat)
            && self.contains_point(other.max_lon, other.max_lat)
    }

    /// Grow the box by `margin` degrees on every side.
    pub fn padded(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min_lon: self.min_lon - margin,
            min_lat: self.min_lat - margin,
            max_lon: self.max_lon + margin,
            max_lat: self.max_lat + margin,
        }
    }

    /// Smallest box enclosing a set of (lon, lat) points.
    /// Returns `None` for an empty set.
    pub fn enclosing(points: &[(f64, f64)]) -> Option<BoundingBox> {
        let (first, rest) = points.split_first()?;
        let mut bbox = BoundingBox::new(first.0, first.1, first.0, first.1);
        for &(lon, lat) in rest {
            bbox.min_lon = bbox.min_lon.min(lon);
            bbox.min_lat = bbox.min_lat.min(lat);
            bbox.max_lon = bbox.max_lon.max(lon);
            bbox.max_lat = bbox.max_lat.max(lat);
        }
        Some(bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection() {
        let a = BoundingBox::new(-81.0, -5.0, -75.0, 2.0);
        let b = BoundingBox::new(-78.0, -2.0, -70.0, 5.0);
        let c = BoundingBox::new(10.0, 10.0, 20.0, 20.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));

        let i = a.intersection(&b).unwrap();
        assert_eq!(i.min_lon, -78.0);
        assert_eq!(i.min_lat, -2.0);
        assert_eq!(i.max_lon, -75.0);
        assert_eq!(i.max_lat, 2.0);
    }

    #[test]
    fn test_contains() {
        let bbox = BoundingBox::new(-81.0, -5.0, -75.0, 2.0);
        assert!(bbox.contains_point(-78.0, 0.0));
        assert!(bbox.contains_point(-81.0, -5.0)); // edge inclusive
        assert!(!bbox.contains_point(-74.0, 0.0));

        let inner = BoundingBox::new(-80.0, -4.0, -76.0, 1.0);
        assert!(bbox.contains_bbox(&inner));
        assert!(!inner.contains_bbox(&bbox));
    }

    #[test]
    fn test_enclosing() {
        let points = [(-79.0, -1.0), (-77.5, 0.5), (-80.2, -3.0)];
        let bbox = BoundingBox::enclosing(&points).unwrap();
        assert_eq!(bbox.min_lon, -80.2);
        assert_eq!(bbox.max_lon, -77.5);
        assert_eq!(bbox.min_lat, -3.0);
        assert_eq!(bbox.max_lat, 0.5);

        assert!(BoundingBox::enclosing(&[]).is_none());
    }

    #[test]
    fn test_degenerate() {
        assert!(BoundingBox::new(-78.0, 0.0, -78.0, 1.0).is_degenerate());
        assert!(!BoundingBox::new(-79.0, 0.0, -78.0, 1.0).is_degenerate());
    }
}
