//! Layer entries of a composition manifest.

use std::path::Path;

use serde::Deserialize;

use crate::codec::load_image;
use crate::compose::{ComposableItem, ImageItem, TextItem};
use crate::error::{DrawError, Result};
use crate::text::{FontRegistry, OverflowSide, TextAlign};
use crate::transform::{Adjustments, Crop, ResampleMethod};
use crate::types::{BlendOperator, Colour, PlacementArea};

use super::resolve;

/// Placement rectangle as written in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementSpec {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    pub width: i64,
    pub height: i64,
}

impl PlacementSpec {
    pub fn to_area(self) -> Result<PlacementArea> {
        PlacementArea::try_new(self.x, self.y, self.width, self.height)
    }
}

/// One entry of the `layers` list, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerSpec {
    Image(ImageLayerSpec),
    Text(TextLayerSpec),
}

impl LayerSpec {
    pub fn build(&self, base_dir: &Path, fonts: &FontRegistry) -> Result<ComposableItem> {
        match self {
            LayerSpec::Image(spec) => spec.build(base_dir).map(Into::into),
            LayerSpec::Text(spec) => spec.build(fonts).map(Into::into),
        }
    }
}

/// An image file, optionally cropped and colour-adjusted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageLayerSpec {
    pub source: String,
    #[serde(default)]
    pub crop: Option<Crop>,
    #[serde(default)]
    pub adjust: Adjustments,
    #[serde(default)]
    pub resample: ResampleMethod,
    #[serde(default)]
    pub blend: BlendOperator,
    #[serde(default)]
    pub placement: Option<PlacementSpec>,
}

impl ImageLayerSpec {
    pub fn build(&self, base_dir: &Path) -> Result<ImageItem> {
        let mut img = load_image(&resolve(base_dir, &self.source))?;
        if let Some(crop) = &self.crop {
            img = crop.apply(&img);
        }
        if !self.adjust.is_identity() {
            img = self.adjust.apply(&img);
        }

        let item = ImageItem::new(img)
            .with_blend(self.blend)
            .with_resample(self.resample);
        match self.placement {
            Some(p) => Ok(item.with_placement(p.to_area()?)),
            None => Ok(item),
        }
    }
}

fn default_size() -> f32 {
    24.0
}

fn default_dpi() -> f32 {
    72.0
}

fn default_true() -> bool {
    true
}

/// A block of text drawn with a registered font.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextLayerSpec {
    /// Free text, wrapped to the placement.
    #[serde(default)]
    pub text: Option<String>,
    /// Explicit lines; mutually exclusive with `text`.
    #[serde(default)]
    pub lines: Option<Vec<String>>,
    /// Registered font name; the registry default when unset.
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    #[serde(default, alias = "color")]
    pub colour: Option<Colour>,
    #[serde(default)]
    pub line_height: Option<f32>,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub max_lines: Option<usize>,
    /// Overflow marker, e.g. `...`.
    #[serde(default)]
    pub overflow: Option<String>,
    #[serde(default)]
    pub overflow_side: OverflowSide,
    #[serde(default = "default_true")]
    pub wrap: bool,
    /// Drop lines that fall below the placement.
    #[serde(default = "default_true")]
    pub clip: bool,
    #[serde(default)]
    pub placement: Option<PlacementSpec>,
}

impl TextLayerSpec {
    pub fn build(&self, fonts: &FontRegistry) -> Result<TextItem> {
        let font = match &self.font {
            Some(name) => fonts.get(name)?,
            None => fonts.default_font()?,
        };

        let mut item = match (&self.text, &self.lines) {
            (Some(text), None) => TextItem::new(text.clone(), font),
            (None, Some(lines)) => TextItem::lines(lines.iter().cloned(), font),
            (Some(_), Some(_)) => {
                return Err(DrawError::Config {
                    message: "text layer has both `text` and `lines`".to_string(),
                    help: Some("Use `text` for wrapped text or `lines` for fixed lines".to_string()),
                })
            }
            (None, None) => {
                return Err(DrawError::Config {
                    message: "text layer has no `text` or `lines`".to_string(),
                    help: None,
                })
            }
        };

        item = item
            .with_size(self.size)
            .with_dpi(self.dpi)
            .with_colour(self.colour.unwrap_or(Colour::BLACK))
            .with_align(self.align)
            .with_overflow(self.overflow.clone().unwrap_or_default(), self.overflow_side)
            .with_wrap(self.wrap)
            .with_clip_to_area(self.clip);
        if let Some(lh) = self.line_height {
            item = item.with_line_height(lh);
        }
        if let Some(n) = self.max_lines {
            item = item.with_max_lines(n);
        }
        if let Some(p) = self.placement {
            item = item.with_placement(p.to_area()?);
        }
        Ok(item)
    }
}
