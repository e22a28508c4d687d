//! Raster buffer - an owned grid of RGBA pixels.

use image::{Rgba, RgbaImage};

use super::Colour;

/// A mutable 2-D grid of straight-alpha RGBA pixels.
///
/// Pixels are stored row-major. Reads and writes outside the grid never
/// fault: `get` returns `None` and `set` is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl RasterImage {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Colour::TRANSPARENT)
    }

    /// Create a buffer filled with one colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> Self {
        Self {
            width,
            height,
            pixels: vec![colour; width as usize * height as usize],
        }
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Colour) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Get the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Read with signed coordinates; anything outside the grid is transparent.
    pub fn get_or_transparent(&self, x: i64, y: i64) -> Colour {
        if x < 0 || y < 0 {
            return Colour::TRANSPARENT;
        }
        u32::try_from(x)
            .ok()
            .zip(u32::try_from(y).ok())
            .and_then(|(x, y)| self.get(x, y))
            .unwrap_or(Colour::TRANSPARENT)
    }

    /// Read with coordinates clamped to the nearest edge pixel.
    ///
    /// Returns transparent for an empty buffer.
    pub fn get_clamped(&self, x: i64, y: i64) -> Colour {
        if self.is_empty() {
            return Colour::TRANSPARENT;
        }
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixels[self.index(x, y)]
    }

    /// Write a pixel. Returns `false` when the position is outside the grid.
    pub fn set(&mut self, x: u32, y: u32, colour: Colour) -> bool {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = colour;
            true
        } else {
            false
        }
    }

    /// Write with signed coordinates, clipping anything off-grid.
    pub fn put(&mut self, x: i64, y: i64, colour: Colour) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.set(x as u32, y as u32, colour);
    }

    /// Composite `colour` over the existing pixel, clipping anything off-grid.
    pub fn blend(&mut self, x: i64, y: i64, colour: Colour) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.pixels[i] = colour.over(self.pixels[i]);
    }

    /// Get the pixels in row-major order.
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// Produce a new buffer of the same size with `f` applied to every pixel.
    pub fn map_pixels(&self, f: impl Fn(Colour) -> Colour) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Convert from an `image` crate buffer.
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| Colour::from_rgba(p.0)).collect(),
        }
    }

    /// Convert to an `image` crate buffer.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.pixels[self.index(x, y)].to_rgba())
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
