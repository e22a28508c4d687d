//! Glyph metrics and rasterizer boundary.
//!
//! The engine never parses font files. A `Font` hands out a sized `Face`,
//! and the face answers per-codepoint metrics and draws glyphs. Fonts are
//! registered explicitly in a `FontRegistry` owned by the caller.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{DrawError, Result};
use crate::types::{Colour, RasterImage};

use super::BlockFont;

/// Name under which the built-in block font is registered.
pub const BUILTIN_FONT: &str = "block";

/// Requested text size: pixels at a given dpi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSize {
    pub px: f32,
    pub dpi: f32,
}

impl FontSize {
    pub const fn new(px: f32, dpi: f32) -> Self {
        Self { px, dpi }
    }

    /// Point size used for metric lookups (`px * dpi / 72`).
    pub fn points(&self) -> f32 {
        self.px * self.dpi / 72.0
    }
}

/// Metrics of one glyph at a fixed size, in fractional pixels.
///
/// Vertical extents are relative to the baseline with y growing downwards:
/// `min_y` is the top of the ink (usually negative), `max_y` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    pub advance: f32,
    pub min_y: f32,
    pub max_y: f32,
}

/// A font resolved at one size.
pub trait Face {
    /// Metrics for a single codepoint.
    fn glyph(&self, ch: char) -> GlyphMetrics;

    /// Draw one glyph with its origin at (`x`, `baseline`).
    fn draw_glyph(&self, ch: char, x: f32, baseline: f32, colour: Colour, dst: &mut RasterImage);

    /// Draw a run of glyphs, advancing by each glyph's exact advance.
    fn draw_str(&self, text: &str, x: f32, baseline: f32, colour: Colour, dst: &mut RasterImage) {
        let mut pen = x;
        for ch in text.chars() {
            self.draw_glyph(ch, pen, baseline, colour, dst);
            pen += self.glyph(ch).advance;
        }
    }
}

/// A source of sized faces.
pub trait Font: fmt::Debug + Send + Sync {
    /// Resolve a face at `size`. Fails when the font cannot serve that size.
    fn face(&self, size: FontSize) -> Result<Box<dyn Face>>;
}

/// Caller-owned set of named fonts.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    fonts: HashMap<String, Arc<dyn Font>>,
    default: Option<String>,
}

impl FontRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in block font as its default.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(BUILTIN_FONT, Arc::new(BlockFont::default()));
        registry.default = Some(BUILTIN_FONT.to_string());
        registry
    }

    /// Register a font under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, font: Arc<dyn Font>) {
        let name = name.into();
        if self.default.is_none() {
            self.default = Some(name.clone());
        }
        self.fonts.insert(name, font);
    }

    /// Choose which registered font `default_font` returns.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        self.get(name)?;
        self.default = Some(name.to_string());
        Ok(())
    }

    /// Look up a font by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Font>> {
        self.fonts.get(name).cloned().ok_or_else(|| DrawError::Font {
            message: format!("Unknown font: '{}'", name),
            help: Some(format!("Registered fonts: {}", self.names().join(", "))),
        })
    }

    /// The default font.
    pub fn default_font(&self) -> Result<Arc<dyn Font>> {
        match &self.default {
            Some(name) => self.get(name),
            None => Err(DrawError::Font {
                message: "No fonts registered".to_string(),
                help: Some("Register a font before laying out text".to_string()),
            }),
        }
    }

    /// Sorted list of registered names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
