//! layerdraw - Layered raster composition
//!
//! A library for building images out of layers: crop and resample source
//! images, adjust their colour, lay out text with wrapping and truncation,
//! and compose everything onto one canvas in order.

pub mod cli;
pub mod codec;
pub mod compose;
pub mod error;
pub mod manifest;
pub mod output;
pub mod text;
pub mod transform;
pub mod types;

pub use codec::{load_from_memory, load_from_reader, load_image, save_image, OutputFormat};
pub use compose::{compose, ComposableItem, ImageItem, PartialComposition, TextItem};
pub use error::{DrawError, Result};
pub use manifest::{Composition, Manifest};
pub use text::{
    BlockFont, Face, Font, FontRegistry, FontSize, GlyphMetrics, LayoutOptions, OverflowSide,
    SplitLine, TextAlign, TextBlock, TextSource,
};
pub use transform::{
    adjust_brightness, adjust_hue, adjust_saturation, extract_circle, extract_ellipse,
    extract_rect, resample, set_opacity, Adjustments, Crop, ResampleMethod,
};
pub use types::{adjust_opacity, BlendOperator, Colour, HsvColour, PlacementArea, RasterImage};
