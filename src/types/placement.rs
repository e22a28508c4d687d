//! Placement rectangles and blend operators.

use serde::Deserialize;

use crate::error::{DrawError, Result};

/// Target rectangle on a destination buffer where an item is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlacementArea {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PlacementArea {
    /// Create a placement from an origin and a size.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a placement from signed dimensions, rejecting negative sizes.
    pub fn try_new(x: i32, y: i32, width: i64, height: i64) -> Result<Self> {
        let width = u32::try_from(width).map_err(|_| DrawError::Placement {
            message: format!("width must be non-negative, got {}", width),
            help: None,
        })?;
        let height = u32::try_from(height).map_err(|_| DrawError::Placement {
            message: format!("height must be non-negative, got {}", height),
            help: None,
        })?;
        Ok(Self::new(x, y, width, height))
    }

    /// Placement covering a whole buffer of the given size.
    pub const fn covering(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// True when nothing can be drawn into this area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Rule for combining a source pixel with the destination pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendOperator {
    /// Overwrite the destination outright.
    Replace,
    /// Alpha-composite the source over the destination.
    #[default]
    Over,
}
