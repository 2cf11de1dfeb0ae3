//! Flight track representation.

use crate::BoundingBox;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped GPS sample of a seeding flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    #[serde(deserialize_with = "crate::time::deserialize_utc")]
    pub time: DateTime<Utc>,
    pub lon: f64,
    pub lat: f64,
}

/// An ordered sequence of track points for one flight.
///
/// Construction enforces the track invariants: non-empty and strictly
/// increasing timestamps (duplicates rejected).
#[derive(Debug, Clone, Serialize)]
pub struct FlightTrack {
    points: Vec<TrackPoint>,
}

impl FlightTrack {
    /// Build a track from samples, validating ordering.
    pub fn new(points: Vec<TrackPoint>) -> Result<Self, TrackError> {
        if points.is_empty() {
            return Err(TrackError::Empty);
        }

        for pair in points.windows(2) {
            if pair[1].time == pair[0].time {
                return Err(TrackError::DuplicateTimestamp(pair[0].time));
            }
            if pair[1].time < pair[0].time {
                return Err(TrackError::NonMonotonic {
                    previous: pair[0].time,
                    next: pair[1].time,
                });
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Takeoff time: timestamp of the first sample.
    pub fn takeoff(&self) -> DateTime<Utc> {
        self.points[0].time
    }

    /// Landing time: timestamp of the last sample.
    pub fn landing(&self) -> DateTime<Utc> {
        self.points[self.points.len() - 1].time
    }

    /// Temporal midpoint of the flight.
    pub fn midpoint(&self) -> DateTime<Utc> {
        let span = self.landing() - self.takeoff();
        self.takeoff() + Duration::seconds(span.num_seconds() / 2)
    }

    /// The prefix of the track flown up to (and including) `cutoff`.
    ///
    /// Empty when the flight has not started yet at `cutoff`.
    pub fn flown_by(&self, cutoff: DateTime<Utc>) -> &[TrackPoint] {
        let end = self.points.partition_point(|p| p.time <= cutoff);
        &self.points[..end]
    }

    /// Geographic extent of the whole track.
    pub fn bbox(&self) -> BoundingBox {
        let coords: Vec<(f64, f64)> = self.points.iter().map(|p| (p.lon, p.lat)).collect();
        // new() guarantees at least one point
        BoundingBox::enclosing(&coords).unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Flight track has no points")]
    Empty,

    #[error("Duplicate track timestamp: {0}")]
    DuplicateTimestamp(DateTime<Utc>),

    #[error("Track timestamps not increasing: {previous} followed by {next}")]
    NonMonotonic {
        previous: DateTime<Utc>,
        next: DateTime<Utc>,
    },
}
