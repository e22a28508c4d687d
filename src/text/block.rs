//! Built-in block font.
//!
//! Every visible glyph is a solid cell with em-relative metrics, so text can
//! be laid out and drawn without any font file. Metrics are deterministic,
//! which also makes it the face used throughout the tests.

use crate::error::{DrawError, Result};
use crate::types::{Colour, RasterImage};

use super::{Face, Font, FontSize, GlyphMetrics};

/// Glyphs that get ink below the baseline.
const DESCENDERS: &str = "gjpqy,;";

/// A font whose glyphs are filled rectangles.
///
/// All lengths are fractions of the em (the point size from `FontSize`).
/// The defaults are exact binary fractions so metrics at whole-pixel sizes
/// carry no rounding noise into the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockFont {
    /// Advance of ASCII glyphs.
    pub advance: f32,
    /// Advance of non-ASCII glyphs (CJK and friends are typically full width).
    pub wide_advance: f32,
    /// Ink height above the baseline.
    pub ascent: f32,
    /// Ink depth below the baseline for descenders.
    pub descent: f32,
    /// Horizontal gap left on each side of the cell.
    pub inset: f32,
}

impl Default for BlockFont {
    fn default() -> Self {
        Self {
            advance: 0.5,
            wide_advance: 1.0,
            ascent: 0.75,
            descent: 0.25,
            inset: 0.0625,
        }
    }
}

impl BlockFont {
    /// Block font where every glyph advances by `advance` em.
    pub fn monospace(advance: f32) -> Self {
        Self {
            advance,
            wide_advance: advance,
            ..Self::default()
        }
    }
}

impl Font for BlockFont {
    fn face(&self, size: FontSize) -> Result<Box<dyn Face>> {
        let em = size.points();
        if !em.is_finite() || em <= 0.0 {
            return Err(DrawError::Font {
                message: format!(
                    "cannot build a face at {}px / {} dpi",
                    size.px, size.dpi
                ),
                help: Some("Font size and dpi must both be positive".to_string()),
            });
        }
        Ok(Box::new(BlockFace { font: *self, em }))
    }
}

struct BlockFace {
    font: BlockFont,
    em: f32,
}

impl Face for BlockFace {
    fn glyph(&self, ch: char) -> GlyphMetrics {
        let advance = if ch.is_ascii() {
            self.font.advance
        } else {
            self.font.wide_advance
        } * self.em;

        if ch.is_whitespace() || ch.is_control() {
            return GlyphMetrics {
                advance,
                min_y: 0.0,
                max_y: 0.0,
            };
        }

        let max_y = if DESCENDERS.contains(ch) {
            self.font.descent * self.em
        } else {
            0.0
        };
        GlyphMetrics {
            advance,
            min_y: -self.font.ascent * self.em,
            max_y,
        }
    }

    fn draw_glyph(&self, ch: char, x: f32, baseline: f32, colour: Colour, dst: &mut RasterImage) {
        let m = self.glyph(ch);
        if m.min_y == m.max_y {
            return;
        }

        let inset = self.font.inset * self.em;
        let x0 = (x + inset).round() as i64;
        let x1 = (x + m.advance - inset).round() as i64;
        let y0 = (baseline + m.min_y).round() as i64;
        let y1 = (baseline + m.max_y).round() as i64;

        for py in y0..y1 {
            for px in x0..x1 {
                dst.blend(px, py, colour);
            }
        }
    }
}
