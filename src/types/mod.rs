//! Core domain types for layerdraw.
//!
//! - `Colour` - straight-alpha RGBA values
//! - `RasterImage` - an owned pixel grid
//! - `PlacementArea` / `BlendOperator` - where and how an item is drawn
//! - `HsvColour` - HSV view of a colour used by the adjustments

mod colour;
mod hsv;
mod placement;
mod raster;

pub use colour::Colour;
pub use hsv::{adjust_opacity, HsvColour};
pub use placement::{BlendOperator, PlacementArea};
pub use raster::RasterImage;
