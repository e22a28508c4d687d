//! Drawable items.
//!
//! An item knows how to render itself into exactly one placement rectangle
//! of a destination buffer. Items are immutable once built; the `with_*`
//! builders consume and return a new value.

use std::sync::Arc;

use crate::error::Result;
use crate::text::{
    layout, place_lines, Font, FontSize, LayoutOptions, OverflowSide, TextAlign, TextBlock,
    TextSource,
};
use crate::transform::{resample, ResampleMethod};
use crate::types::{BlendOperator, Colour, PlacementArea, RasterImage};

/// A raster drawn into its placement, resampled to fit.
#[derive(Debug, Clone)]
pub struct ImageItem {
    content: Arc<RasterImage>,
    placement: Option<PlacementArea>,
    blend: BlendOperator,
    resample: ResampleMethod,
}

impl ImageItem {
    pub fn new(content: impl Into<Arc<RasterImage>>) -> Self {
        Self {
            content: content.into(),
            placement: None,
            blend: BlendOperator::default(),
            resample: ResampleMethod::default(),
        }
    }

    /// Target rectangle. Unset draws the content at its own size at the origin.
    pub fn with_placement(mut self, placement: PlacementArea) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_blend(mut self, blend: BlendOperator) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_resample(mut self, method: ResampleMethod) -> Self {
        self.resample = method;
        self
    }

    pub fn content(&self) -> &RasterImage {
        &self.content
    }

    pub fn placement(&self) -> PlacementArea {
        self.placement
            .unwrap_or_else(|| PlacementArea::covering(self.content.width(), self.content.height()))
    }

    pub fn render(&self, dst: &mut RasterImage) -> Result<()> {
        let area = self.placement();
        if area.is_empty() {
            tracing::debug!(?area, "image placement has zero area, skipping");
            return Ok(());
        }

        let resized;
        let src = if self.content.size() == (area.width, area.height) {
            self.content.as_ref()
        } else {
            resized = resample(&self.content, area.width, area.height, self.resample);
            &resized
        };

        for y in 0..area.height {
            for x in 0..area.width {
                let Some(colour) = src.get(x, y) else {
                    continue;
                };
                let dx = area.x as i64 + x as i64;
                let dy = area.y as i64 + y as i64;
                match self.blend {
                    BlendOperator::Replace => dst.put(dx, dy, colour),
                    BlendOperator::Over => dst.blend(dx, dy, colour),
                }
            }
        }
        Ok(())
    }
}

/// A block of text laid out inside its placement.
#[derive(Debug, Clone)]
pub struct TextItem {
    source: TextSource,
    font: Arc<dyn Font>,
    size: f32,
    dpi: f32,
    colour: Colour,
    line_height: Option<f32>,
    align: TextAlign,
    max_lines: Option<usize>,
    overflow_marker: String,
    overflow_side: OverflowSide,
    wrap: bool,
    clip_to_area: bool,
    placement: Option<PlacementArea>,
}

impl TextItem {
    /// Free text, wrapped to the placement width.
    pub fn new(text: impl Into<String>, font: Arc<dyn Font>) -> Self {
        Self::from_source(TextSource::Text(text.into()), font)
    }

    /// Explicit lines, each truncated on its own.
    pub fn lines<I, S>(lines: I, font: Arc<dyn Font>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines.into_iter().map(Into::into).collect();
        Self::from_source(TextSource::Lines(lines), font)
    }

    fn from_source(source: TextSource, font: Arc<dyn Font>) -> Self {
        Self {
            source,
            font,
            size: 24.0,
            dpi: 72.0,
            colour: Colour::BLACK,
            line_height: None,
            align: TextAlign::Left,
            max_lines: None,
            overflow_marker: String::new(),
            overflow_side: OverflowSide::Trailing,
            wrap: true,
            clip_to_area: true,
            placement: None,
        }
    }

    /// Font size in pixels.
    pub fn with_size(mut self, px: f32) -> Self {
        self.size = px;
        self
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    /// Height of each line slot. Non-positive values fall back to the font size.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    pub fn with_overflow(mut self, marker: impl Into<String>, side: OverflowSide) -> Self {
        self.overflow_marker = marker.into();
        self.overflow_side = side;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Drop lines that would fall below the placement.
    pub fn with_clip_to_area(mut self, clip: bool) -> Self {
        self.clip_to_area = clip;
        self
    }

    /// Target rectangle. Unset lays out against the whole destination.
    pub fn with_placement(mut self, placement: PlacementArea) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn placement(&self) -> Option<PlacementArea> {
        self.placement
    }

    pub fn line_height(&self) -> f32 {
        match self.line_height {
            Some(lh) if lh > 0.0 => lh,
            _ => self.size,
        }
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::default()
            .with_line_height(self.line_height())
            .with_max_lines(self.max_lines)
            .with_overflow(self.overflow_marker.clone(), self.overflow_side)
            .with_wrap(self.wrap)
            .with_clip_to_area(self.clip_to_area)
            .with_align(self.align)
    }

    /// Lay the text out without drawing it.
    ///
    /// Without a placement the width and height are unbounded.
    pub fn measure(&self) -> Result<TextBlock> {
        let face = self.font.face(FontSize::new(self.size, self.dpi))?;
        let (max_width, max_height) = match self.placement {
            Some(area) => (area.width as f32, area.height as f32),
            None => (f32::INFINITY, f32::INFINITY),
        };
        let options = self.layout_options();
        let lines = layout(&self.source, face.as_ref(), max_width, max_height, &options);
        Ok(TextBlock::new(lines, options.line_height, max_width))
    }

    pub fn render(&self, dst: &mut RasterImage) -> Result<()> {
        let face = self.font.face(FontSize::new(self.size, self.dpi))?;
        let area = self
            .placement
            .unwrap_or_else(|| PlacementArea::covering(dst.width(), dst.height()));
        if area.is_empty() {
            tracing::debug!(?area, "text placement has zero area, skipping");
            return Ok(());
        }

        let options = self.layout_options();
        let max_width = area.width as f32;
        let lines = layout(
            &self.source,
            face.as_ref(),
            max_width,
            area.height as f32,
            &options,
        );
        tracing::trace!(lines = lines.len(), "text laid out");

        for placed in place_lines(lines, max_width, options.line_height, options.align) {
            face.draw_str(
                &placed.line.text,
                area.x as f32 + placed.x,
                area.y as f32 + placed.y,
                self.colour,
                dst,
            );
        }
        Ok(())
    }
}

/// Anything the composition pipeline can draw.
#[derive(Debug, Clone)]
pub enum ComposableItem {
    Image(ImageItem),
    Text(TextItem),
}

impl ComposableItem {
    /// Draw this item into `dst`.
    pub fn render(&self, dst: &mut RasterImage) -> Result<()> {
        match self {
            Self::Image(item) => item.render(dst),
            Self::Text(item) => item.render(dst),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Text(_) => "text",
        }
    }

    /// The rectangle this item draws into, when it has one of its own.
    pub fn placement(&self) -> Option<PlacementArea> {
        match self {
            Self::Image(item) => Some(item.placement()),
            Self::Text(item) => item.placement(),
        }
    }
}

impl From<ImageItem> for ComposableItem {
    fn from(item: ImageItem) -> Self {
        Self::Image(item)
    }
}

impl From<TextItem> for ComposableItem {
    fn from(item: TextItem) -> Self {
        Self::Text(item)
    }
}
