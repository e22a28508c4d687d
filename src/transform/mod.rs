//! Pure image transformations.
//!
//! Every operation reads a source buffer and allocates a new one:
//! region extraction, resampling and colour adjustment.

mod adjust;
mod extract;
mod resample;

pub use adjust::{adjust_brightness, adjust_hue, adjust_saturation, set_opacity, Adjustments};
pub use extract::{extract_circle, extract_ellipse, extract_rect, Crop};
pub use resample::{resample, ResampleMethod};
