//! Composable items and the pipeline that draws them in order.

mod item;
mod pipeline;

pub use item::{ComposableItem, ImageItem, TextItem};
pub use pipeline::{compose, PartialComposition};
