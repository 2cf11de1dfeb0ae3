//! Ordering validation and layout of rendered frames.

use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::png::PngEncoder;
use image::{Delay, ImageEncoder, RgbaImage};
use tracing::debug;

use crate::color::Color;
use crate::error::SequenceError;
use crate::frame::Frame;

/// How strictly a sequence must cover the three phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceMode {
    /// All of before, during and after must be present.
    #[default]
    Strict,
    /// Any non-empty, correctly ordered subset of phases is accepted.
    AllowPartial,
}

/// A validated, phase-ordered run of frames.
#[derive(Debug, Clone)]
pub struct Sequence {
    frames: Vec<Frame>,
}

impl Sequence {
    /// Validate frame ordering and phase coverage.
    ///
    /// Frames must be in strictly ascending phase order with strictly
    /// increasing observation times. In [`SequenceMode::Strict`] all three
    /// phases are required.
    pub fn new(frames: Vec<Frame>, mode: SequenceMode) -> Result<Self, SequenceError> {
        if frames.is_empty() {
            return Err(SequenceError::EmptySequence);
        }

        for pair in frames.windows(2) {
            if pair[1].phase <= pair[0].phase {
                return Err(SequenceError::PhaseOrder {
                    previous: pair[0].phase,
                    next: pair[1].phase,
                });
            }
            if pair[1].time <= pair[0].time {
                return Err(SequenceError::TimeOrder {
                    previous: pair[0].phase,
                    next: pair[1].phase,
                });
            }
        }

        if mode == SequenceMode::Strict && frames.len() < 3 {
            return Err(SequenceError::IncompleteSequence {
                required: 3,
                got: frames.len(),
            });
        }

        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

/// Layout parameters for the side-by-side comparison figure.
#[derive(Debug, Clone)]
pub struct AssemblyStyle {
    /// Gap between panels, in pixels.
    pub gutter: u32,
    pub background: Color,
}

impl Default for AssemblyStyle {
    fn default() -> Self {
        Self {
            gutter: 8,
            background: Color::new(16, 16, 24),
        }
    }
}

/// Lay the frames out left to right into one figure.
///
/// Panels keep their own sizes; shorter panels are top-aligned against the
/// tallest one.
pub fn compose(sequence: &Sequence, style: &AssemblyStyle) -> RgbaImage {
    let frames = sequence.frames();
    let total_width: u32 = frames.iter().map(|f| f.image.width()).sum::<u32>()
        + style.gutter * (frames.len() as u32 - 1);
    let max_height = frames
        .iter()
        .map(|f| f.image.height())
        .max()
        .unwrap_or(0);

    let mut canvas = RgbaImage::from_pixel(total_width, max_height, style.background.as_rgba());

    let mut x = 0u32;
    for frame in frames {
        image::imageops::overlay(&mut canvas, &frame.image, i64::from(x), 0);
        x += frame.image.width() + style.gutter;
    }

    debug!(panels = frames.len(), total_width, max_height, "Composed figure");
    canvas
}

/// Encode an assembled figure as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, SequenceError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ColorType::Rgba8,
        )
        .map_err(|e| SequenceError::Encode(e.to_string()))?;
    Ok(out)
}

/// Encode the frames of a sequence as a looping animated GIF.
///
/// Every frame is shown for `delay_ms`. Panel sizes may differ between
/// frames; each is encoded at its own size.
pub fn encode_gif(sequence: &Sequence, delay_ms: u32) -> Result<Vec<u8>, SequenceError> {
    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| SequenceError::Encode(e.to_string()))?;

        for frame in sequence.frames() {
            let delay = Delay::from_numer_denom_ms(delay_ms, 1);
            let gif_frame = image::Frame::from_parts(frame.image.clone(), 0, 0, delay);
            encoder
                .encode_frame(gif_frame)
                .map_err(|e| SequenceError::Encode(e.to_string()))?;
        }
    }
    Ok(out)
}
