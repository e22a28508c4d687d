//! Whole-buffer colour adjustments.
//!
//! Each function returns a new buffer; the source is never modified.

use serde::Deserialize;

use crate::types::{adjust_opacity, HsvColour, RasterImage};

/// Scale hue of every pixel by `delta` percent.
pub fn adjust_hue(src: &RasterImage, delta: f32) -> RasterImage {
    src.map_pixels(|c| HsvColour::from_colour(c).adjust_hue(delta).to_colour())
}

/// Scale saturation of every pixel by `delta` percent.
pub fn adjust_saturation(src: &RasterImage, delta: f32) -> RasterImage {
    src.map_pixels(|c| HsvColour::from_colour(c).adjust_saturation(delta).to_colour())
}

/// Scale brightness (HSV value) of every pixel by `delta` percent.
pub fn adjust_brightness(src: &RasterImage, delta: f32) -> RasterImage {
    src.map_pixels(|c| HsvColour::from_colour(c).adjust_brightness(delta).to_colour())
}

/// Scale alpha of every pixel to `percent` of its current value.
pub fn set_opacity(src: &RasterImage, percent: f32) -> RasterImage {
    src.map_pixels(|c| adjust_opacity(c, percent))
}

/// A bundle of optional adjustments applied hue, saturation, brightness,
/// then opacity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Adjustments {
    pub hue: Option<f32>,
    pub saturation: Option<f32>,
    pub brightness: Option<f32>,
    pub opacity: Option<f32>,
}

impl Adjustments {
    /// True when no adjustment is configured.
    pub fn is_identity(&self) -> bool {
        self.hue.is_none()
            && self.saturation.is_none()
            && self.brightness.is_none()
            && self.opacity.is_none()
    }

    /// Apply the configured adjustments in a single pass.
    pub fn apply(&self, src: &RasterImage) -> RasterImage {
        if self.is_identity() {
            return src.clone();
        }

        let hsv_needed = self.hue.is_some() || self.saturation.is_some() || self.brightness.is_some();
        src.map_pixels(|c| {
            let c = if hsv_needed {
                let mut hsv = HsvColour::from_colour(c);
                if let Some(d) = self.hue {
                    hsv = hsv.adjust_hue(d);
                }
                if let Some(d) = self.saturation {
                    hsv = hsv.adjust_saturation(d);
                }
                if let Some(d) = self.brightness {
                    hsv = hsv.adjust_brightness(d);
                }
                hsv.to_colour()
            } else {
                c
            };
            match self.opacity {
                Some(p) => adjust_opacity(c, p),
                None => c,
            }
        })
    }
}
