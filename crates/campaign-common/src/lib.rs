//! Common types shared across the seeding-watch crates.

pub mod bbox;
pub mod phase;
pub mod region;
pub mod time;
pub mod track;

pub use bbox::BoundingBox;
pub use phase::Phase;
pub use region::{Region, RegionError};
pub use time::parse_utc;
pub use track::{FlightTrack, TrackError, TrackPoint};
