//! HSV colour representation and per-colour adjustments.
//!
//! Conversion goes through `palette`; the adjustment rules are the crate's
//! own: deltas are percentages in [-100, 100] applied multiplicatively to the
//! current component and clamped to its valid range.

use palette::{Hsv, IntoColor, Srgb};

use super::Colour;

/// A colour in HSV space with its alpha carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvColour {
    /// Hue in degrees, [0, 360].
    pub hue: f32,
    /// Saturation, [0, 1].
    pub saturation: f32,
    /// Value (brightness), [0, 1].
    pub value: f32,
    pub alpha: u8,
}

impl HsvColour {
    /// Convert an RGBA colour to HSV.
    ///
    /// Greys (max == min channel) get hue 0 and saturation 0.
    pub fn from_colour(colour: Colour) -> Self {
        let rgb: Srgb<f32> = Srgb::new(
            colour.r as f32 / 255.0,
            colour.g as f32 / 255.0,
            colour.b as f32 / 255.0,
        );

        if colour.r == colour.g && colour.g == colour.b {
            return Self {
                hue: 0.0,
                saturation: 0.0,
                value: rgb.red,
                alpha: colour.a,
            };
        }

        let hsv: Hsv = rgb.into_color();
        Self {
            hue: hsv.hue.into_positive_degrees(),
            saturation: hsv.saturation,
            value: hsv.value,
            alpha: colour.a,
        }
    }

    /// Convert back to RGBA using the six-sector reconstruction.
    pub fn to_colour(self) -> Colour {
        let hsv: Hsv = Hsv::new(
            self.hue % 360.0,
            self.saturation.clamp(0.0, 1.0),
            self.value.clamp(0.0, 1.0),
        );
        let rgb: Srgb<f32> = hsv.into_color();
        Colour::new(
            to_channel(rgb.red),
            to_channel(rgb.green),
            to_channel(rgb.blue),
            self.alpha,
        )
    }

    /// Scale hue by `delta` percent; the result never exceeds 360.
    pub fn adjust_hue(self, delta: f32) -> Self {
        Self {
            hue: scale_component(self.hue, delta, 360.0),
            ..self
        }
    }

    /// Scale saturation by `delta` percent; the result never exceeds 1.
    pub fn adjust_saturation(self, delta: f32) -> Self {
        Self {
            saturation: scale_component(self.saturation, delta, 1.0),
            ..self
        }
    }

    /// Scale value by `delta` percent; the result never exceeds 1.
    pub fn adjust_brightness(self, delta: f32) -> Self {
        Self {
            value: scale_component(self.value, delta, 1.0),
            ..self
        }
    }
}

/// Scale alpha to `percent` of its current value; RGB is left alone.
///
/// `percent` is clamped to [0, 100].
pub fn adjust_opacity(colour: Colour, percent: f32) -> Colour {
    let percent = clamp_percent(percent, 0.0);
    let alpha = (colour.a as f32 * percent / 100.0).floor();
    colour.with_alpha(alpha.clamp(0.0, 255.0) as u8)
}

fn scale_component(current: f32, delta: f32, max: f32) -> f32 {
    let delta = clamp_percent(delta, -100.0);
    (current * (1.0 + delta / 100.0)).clamp(0.0, max)
}

fn clamp_percent(percent: f32, min: f32) -> f32 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(min, 100.0)
}

fn to_channel(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
