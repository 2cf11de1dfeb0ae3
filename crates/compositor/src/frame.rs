//! Rendering of a single labeled frame from a reprojected raster.

use campaign_common::{BoundingBox, FlightTrack, Phase, Region};
use chrono::{DateTime, Utc};
use image::RgbaImage;
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use scene_ops::GeoRaster;
use tracing::debug;

use crate::color::{Color, ColorRamp};
use crate::glyphs;

/// Visual parameters for frame rendering.
#[derive(Debug, Clone)]
pub struct FrameStyle {
    /// Brightness-temperature ramp for raster pixels.
    pub ramp: ColorRamp,
    /// Fill for the label strip and for NaN raster pixels.
    pub background: Color,
    pub label_color: Color,
    /// Height of the label strip above the raster, in pixels.
    pub label_height: u32,
    /// Integer scale of the label glyphs.
    pub label_scale: u32,
    pub track_color: Color,
    /// Radius of the dot marking the aircraft's last known position.
    pub track_marker_radius: i32,
    pub region_color: Color,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            ramp: ColorRamp::ir_default(),
            background: Color::new(16, 16, 24),
            label_color: Color::new(235, 235, 235),
            label_height: 18,
            label_scale: 2,
            track_color: Color::new(255, 64, 64),
            track_marker_radius: 3,
            region_color: Color::new(255, 220, 40),
        }
    }
}

/// One rendered panel of the comparison figure.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbaImage,
    pub phase: Phase,
    pub time: DateTime<Utc>,
    pub extent: BoundingBox,
}

/// Render a raster into a labeled RGBA frame.
///
/// The label strip at the top carries the phase name and observation time.
/// When a track is given, only the part flown up to the raster's
/// observation time is drawn, with a dot at the aircraft's position then.
/// The region outline is drawn even where it leaves the raster; segments
/// outside the image are clipped.
pub fn render_frame(
    raster: &GeoRaster,
    phase: Phase,
    track: Option<&FlightTrack>,
    region: Option<&Region>,
    style: &FrameStyle,
) -> Frame {
    let width = raster.width as u32;
    let height = style.label_height + raster.height as u32;
    let mut image = RgbaImage::from_pixel(width, height, style.background.as_rgba());

    // raster pixels below the label strip; NaN stays background
    for j in 0..raster.height {
        for i in 0..raster.width {
            let Some(value) = raster.value_at(i, j) else {
                continue;
            };
            if let Some(color) = style.ramp.sample(value) {
                image.put_pixel(i as u32, style.label_height + j as u32, color.as_rgba());
            }
        }
    }

    if let Some(region) = region {
        draw_outline(&mut image, raster, &region.outline(), style);
    }

    if let Some(track) = track {
        draw_track(&mut image, raster, track, style);
    }

    let label = format!("{} {} UTC", phase.label(), raster.time.format("%Y-%m-%d %H:%M"));
    let text_h = glyphs::GLYPH_HEIGHT * style.label_scale;
    let text_y = (style.label_height.saturating_sub(text_h) / 2) as i32;
    glyphs::draw_text(&mut image, 4, text_y, &label, style.label_color, style.label_scale);

    debug!(%phase, time = %raster.time, width, height, "Rendered frame");

    Frame {
        image,
        phase,
        time: raster.time,
        extent: raster.extent,
    }
}

/// Fractional raster position of a geographic point, shifted below the
/// label strip.
fn to_canvas(raster: &GeoRaster, style: &FrameStyle, lon: f64, lat: f64) -> (f32, f32) {
    let (x, y) = raster.pixel_of(lon, lat);
    (x as f32, y as f32 + style.label_height as f32)
}

fn draw_outline(image: &mut RgbaImage, raster: &GeoRaster, ring: &[(f64, f64)], style: &FrameStyle) {
    let color = style.region_color.as_rgba();
    for pair in ring.windows(2) {
        let start = to_canvas(raster, style, pair[0].0, pair[0].1);
        let end = to_canvas(raster, style, pair[1].0, pair[1].1);
        draw_line_segment_mut(image, start, end, color);
    }
}

fn draw_track(image: &mut RgbaImage, raster: &GeoRaster, track: &FlightTrack, style: &FrameStyle) {
    let flown = track.flown_by(raster.time);
    if flown.is_empty() {
        return;
    }

    let color = style.track_color.as_rgba();
    for pair in flown.windows(2) {
        let start = to_canvas(raster, style, pair[0].lon, pair[0].lat);
        let end = to_canvas(raster, style, pair[1].lon, pair[1].lat);
        draw_line_segment_mut(image, start, end, color);
    }

    // dot at the last known aircraft position
    let last = flown[flown.len() - 1];
    let (cx, cy) = to_canvas(raster, style, last.lon, last.lat);
    draw_filled_circle_mut(
        image,
        (cx.round() as i32, cy.round() as i32),
        style.track_marker_radius,
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_common::TrackPoint;
    use chrono::{Duration, TimeZone};
    use scene_ops::{reproject, testdata, Resampling};

    fn raster() -> GeoRaster {
        let scene = testdata::synthetic_scene();
        let extent = BoundingBox::new(-80.0, -3.0, -76.0, 1.0);
        reproject(&scene, &extent, 80, 80, Resampling::Nearest).unwrap()
    }

    fn track() -> FlightTrack {
        let t0 = Utc.with_ymd_and_hms(2025, 5, 4, 14, 30, 0).unwrap();
        FlightTrack::new(vec![
            TrackPoint { time: t0, lon: -79.0, lat: -1.0 },
            TrackPoint { time: t0 + Duration::minutes(20), lon: -78.5, lat: -1.5 },
            TrackPoint { time: t0 + Duration::minutes(90), lon: -78.0, lat: -2.0 },
        ])
        .unwrap()
    }

    #[test]
    fn test_frame_dimensions_and_metadata() {
        let raster = raster();
        let style = FrameStyle::default();
        let frame = render_frame(&raster, Phase::During, None, None, &style);

        assert_eq!(frame.image.width(), 80);
        assert_eq!(frame.image.height(), 80 + style.label_height);
        assert_eq!(frame.phase, Phase::During);
        assert_eq!(frame.time, raster.time);
        assert_eq!(frame.extent, raster.extent);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let raster = raster();
        let style = FrameStyle::default();
        let track = track();
        let region = Region::Bbox(BoundingBox::new(-79.5, -2.5, -77.0, 0.5));

        let a = render_frame(&raster, Phase::During, Some(&track), Some(&region), &style);
        let b = render_frame(&raster, Phase::During, Some(&track), Some(&region), &style);
        assert_eq!(a.image.as_raw(), b.image.as_raw());
    }

    #[test]
    fn test_track_clipped_to_observation_time() {
        let raster = raster(); // observed 15:00
        let style = FrameStyle::default();
        let track = track(); // takeoff 14:30, lands 16:00

        let with_partial = render_frame(&raster, Phase::During, Some(&track), None, &style);
        let without = render_frame(&raster, Phase::During, None, None, &style);

        // the flown prefix (2 of 3 points by 15:00) leaves visible paint
        assert_ne!(with_partial.image.as_raw(), without.image.as_raw());
    }

    #[test]
    fn test_track_before_takeoff_draws_nothing() {
        let scene = testdata::synthetic_scene_at(
            Utc.with_ymd_and_hms(2025, 5, 4, 13, 0, 0).unwrap(),
        );
        let extent = BoundingBox::new(-80.0, -3.0, -76.0, 1.0);
        let raster = reproject(&scene, &extent, 80, 80, Resampling::Nearest).unwrap();
        let style = FrameStyle::default();

        let with_track = render_frame(&raster, Phase::Before, Some(&track()), None, &style);
        let without = render_frame(&raster, Phase::Before, None, None, &style);
        assert_eq!(with_track.image.as_raw(), without.image.as_raw());
    }

    #[test]
    fn test_region_outline_changes_pixels() {
        let raster = raster();
        let style = FrameStyle::default();
        let region = Region::Bbox(BoundingBox::new(-79.5, -2.5, -77.0, 0.5));

        let with_region = render_frame(&raster, Phase::After, None, Some(&region), &style);
        let without = render_frame(&raster, Phase::After, None, None, &style);
        assert_ne!(with_region.image.as_raw(), without.image.as_raw());
    }
}
