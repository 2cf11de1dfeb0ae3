//! Frame rendering and sequence assembly.
//!
//! Turns reprojected rasters into labeled RGBA frames with flight-track and
//! region overlays, then lays the before/during/after frames out as one
//! comparison figure (or an animated sequence). Everything here is pure
//! in-memory pixel work: identical inputs produce identical bytes.

pub mod color;
pub mod error;
pub mod frame;
pub mod glyphs;
pub mod sequence;

pub use color::{Color, ColorRamp, ColorStop};
pub use error::SequenceError;
pub use frame::{render_frame, Frame, FrameStyle};
pub use sequence::{
    compose, encode_gif, encode_png, AssemblyStyle, Sequence, SequenceMode,
};
