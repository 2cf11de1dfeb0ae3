//! Brightness-temperature color ramps.

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn as_rgba(&self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1].
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// One anchor of a color ramp: a data value (Kelvin for band 13) and the
/// color it maps to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColorStop {
    pub value: f32,
    pub color: Color,
}

/// A piecewise-linear color ramp over brightness temperature.
///
/// Stops are kept sorted by value; sampling clamps to the end colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Build a ramp from stops. At least two stops are required; they are
    /// sorted by value on construction.
    pub fn new(mut stops: Vec<ColorStop>) -> Option<Self> {
        if stops.len() < 2 {
            return None;
        }
        stops.sort_by(|a, b| a.value.total_cmp(&b.value));
        Some(Self { stops })
    }

    /// Classic IR enhancement for the clean window band: warm surface in
    /// grayscale, progressively saturated colors for cold convective tops.
    pub fn ir_default() -> Self {
        Self::new(vec![
            ColorStop { value: 300.0, color: Color::new(10, 10, 10) },
            ColorStop { value: 280.0, color: Color::new(90, 90, 90) },
            ColorStop { value: 260.0, color: Color::new(160, 160, 160) },
            ColorStop { value: 240.0, color: Color::new(220, 220, 220) },
            ColorStop { value: 235.0, color: Color::new(0, 200, 255) },
            ColorStop { value: 225.0, color: Color::new(0, 70, 255) },
            ColorStop { value: 215.0, color: Color::new(0, 210, 80) },
            ColorStop { value: 205.0, color: Color::new(255, 230, 0) },
            ColorStop { value: 195.0, color: Color::new(255, 60, 0) },
            ColorStop { value: 185.0, color: Color::new(230, 0, 180) },
            ColorStop { value: 180.0, color: Color::new(255, 255, 255) },
        ])
        .expect("static stop list is valid")
    }

    /// Color for a data value; `None` for NaN (fill).
    pub fn sample(&self, value: f32) -> Option<Color> {
        if value.is_nan() {
            return None;
        }

        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if value <= first.value {
            return Some(first.color);
        }
        if value >= last.value {
            return Some(last.color);
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if value <= hi.value {
                let span = hi.value - lo.value;
                let t = if span > 0.0 { (value - lo.value) / span } else { 0.0 };
                return Some(lo.color.lerp(hi.color, t));
            }
        }

        Some(last.color)
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::ir_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::new(0, 0, 0);
        let b = Color::new(255, 255, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::new(128, 128, 128));
    }

    #[test]
    fn test_ramp_needs_two_stops() {
        assert!(ColorRamp::new(vec![ColorStop {
            value: 200.0,
            color: Color::new(0, 0, 0)
        }])
        .is_none());
    }

    #[test]
    fn test_sample_clamps_ends() {
        let ramp = ColorRamp::ir_default();
        // warmer than any stop: warm end color
        assert_eq!(ramp.sample(350.0), ramp.sample(300.0));
        // colder than any stop: cold end color
        assert_eq!(ramp.sample(100.0), ramp.sample(180.0));
    }

    #[test]
    fn test_sample_interpolates_between_stops() {
        let ramp = ColorRamp::new(vec![
            ColorStop {
                value: 200.0,
                color: Color::new(0, 0, 0),
            },
            ColorStop {
                value: 300.0,
                color: Color::new(200, 100, 0),
            },
        ])
        .unwrap();

        let mid = ramp.sample(250.0).unwrap();
        assert_eq!(mid, Color::new(100, 50, 0));
    }

    #[test]
    fn test_nan_is_transparent() {
        assert!(ColorRamp::ir_default().sample(f32::NAN).is_none());
    }

    #[test]
    fn test_unsorted_stops_are_sorted() {
        let ramp = ColorRamp::new(vec![
            ColorStop {
                value: 300.0,
                color: Color::new(255, 255, 255),
            },
            ColorStop {
                value: 200.0,
                color: Color::new(0, 0, 0),
            },
        ])
        .unwrap();
        assert_eq!(ramp.sample(150.0).unwrap(), Color::new(0, 0, 0));
    }
}
