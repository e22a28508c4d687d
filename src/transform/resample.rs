//! Pixel resampling to new dimensions.
//!
//! Every method maps output pixel (x, y) to the fractional source coordinate
//! (x * srcW / targetW, y * srcH / targetH) and interpolates each RGBA channel
//! independently. Samples that fall outside the source are clamped to the
//! nearest edge pixel.

use serde::Deserialize;

use crate::types::{Colour, RasterImage};

/// Shape parameter of the cubic-convolution kernel.
const CUBIC_A: f64 = -1.0;

/// Interpolation used when resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResampleMethod {
    /// Pick the closest source pixel.
    #[default]
    Nearest,
    /// Weighted average of the 2x2 neighbourhood.
    Bilinear,
    /// 4x4 cubic convolution.
    #[serde(alias = "cubic-convolution")]
    #[value(alias = "cubic-convolution")]
    Cubic,
}

/// Resample `src` to `width` x `height`.
///
/// A zero target dimension yields an empty buffer; an empty source yields a
/// transparent buffer of the requested size.
pub fn resample(src: &RasterImage, width: u32, height: u32, method: ResampleMethod) -> RasterImage {
    if width == 0 || height == 0 {
        tracing::debug!(width, height, "resample target has zero area");
        return RasterImage::new(width, height);
    }
    if src.is_empty() {
        tracing::debug!(width, height, "resampling an empty source");
        return RasterImage::new(width, height);
    }

    let scale_x = src.width() as f64 / width as f64;
    let scale_y = src.height() as f64 / height as f64;

    RasterImage::from_fn(width, height, |x, y| {
        let xf = x as f64 * scale_x;
        let yf = y as f64 * scale_y;
        match method {
            ResampleMethod::Nearest => nearest(src, xf, yf),
            ResampleMethod::Bilinear => bilinear(src, xf, yf),
            ResampleMethod::Cubic => cubic(src, xf, yf),
        }
    })
}

fn nearest(src: &RasterImage, xf: f64, yf: f64) -> Colour {
    src.get_clamped(xf.round() as i64, yf.round() as i64)
}

fn bilinear(src: &RasterImage, xf: f64, yf: f64) -> Colour {
    let x0 = xf.floor();
    let y0 = yf.floor();
    let u = xf - x0;
    let v = yf - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = src.get_clamped(x0, y0).to_rgba();
    let p10 = src.get_clamped(x0 + 1, y0).to_rgba();
    let p01 = src.get_clamped(x0, y0 + 1).to_rgba();
    let p11 = src.get_clamped(x0 + 1, y0 + 1).to_rgba();

    let mut out = [0u8; 4];
    for (c, slot) in out.iter_mut().enumerate() {
        let value = p00[c] as f64 * (1.0 - u) * (1.0 - v)
            + p01[c] as f64 * (1.0 - u) * v
            + p10[c] as f64 * u * (1.0 - v)
            + p11[c] as f64 * u * v;
        *slot = to_channel(value);
    }
    Colour::from_rgba(out)
}

fn cubic(src: &RasterImage, xf: f64, yf: f64) -> Colour {
    let x0 = xf.floor();
    let y0 = yf.floor();
    let u = xf - x0;
    let v = yf - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let row_weights = [
        kernel(1.0 + v),
        kernel(v),
        kernel(1.0 - v),
        kernel(2.0 - v),
    ];
    let col_weights = [
        kernel(1.0 + u),
        kernel(u),
        kernel(1.0 - u),
        kernel(2.0 - u),
    ];

    let mut samples = [[[0u8; 4]; 4]; 4];
    for (j, row) in samples.iter_mut().enumerate() {
        for (i, sample) in row.iter_mut().enumerate() {
            *sample = src
                .get_clamped(x0 + i as i64 - 1, y0 + j as i64 - 1)
                .to_rgba();
        }
    }

    let mut out = [0u8; 4];
    for (c, slot) in out.iter_mut().enumerate() {
        let mut value = 0.0;
        for (j, wy) in row_weights.iter().enumerate() {
            for (i, wx) in col_weights.iter().enumerate() {
                value += wy * samples[j][i][c] as f64 * wx;
            }
        }
        *slot = to_channel(value);
    }
    Colour::from_rgba(out)
}

/// Cubic-convolution kernel W(d) with shape parameter `CUBIC_A`.
fn kernel(d: f64) -> f64 {
    let d = d.abs();
    let a = CUBIC_A;
    if d <= 1.0 {
        (a + 2.0) * d.powi(3) - (a + 3.0) * d.powi(2) + 1.0
    } else if d < 2.0 {
        a * d.powi(3) - 5.0 * a * d.powi(2) + 8.0 * a * d - 4.0 * a
    } else {
        0.0
    }
}

fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
