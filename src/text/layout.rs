//! Text line layout.
//!
//! Breaks text into lines by glyph advance, truncates with an overflow
//! marker, and works out where each line sits inside its area. Breaking is
//! purely width-based on codepoint boundaries.
//!
//! Widths used for fitting are the sum of each glyph's advance rounded up
//! to whole pixels; `real_width` keeps the exact fractional sum and is what
//! alignment uses.

use serde::{Deserialize, Serialize};

use super::{Face, GlyphMetrics};

/// What a text item lays out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Free text, wrapped to the available width.
    Text(String),
    /// Fixed lines; each is measured and truncated on its own, never reflowed.
    Lines(Vec<String>),
}

/// Horizontal alignment of each line within the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Which end of a truncated line receives the overflow marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverflowSide {
    #[serde(alias = "left")]
    #[value(alias = "left")]
    Leading,
    #[default]
    #[serde(alias = "right")]
    #[value(alias = "right")]
    Trailing,
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SplitLine {
    pub text: String,
    /// Sum of advances, each rounded up to a whole pixel.
    pub width: f32,
    /// Exact sum of advances.
    pub real_width: f32,
    /// Topmost ink offset from the baseline (y down).
    pub min_y: f32,
    /// Bottommost ink offset from the baseline (y down).
    pub max_y: f32,
}

impl SplitLine {
    /// Measure a string as a single line.
    pub fn measure(face: &dyn Face, text: &str) -> Self {
        let mut line = Self::default();
        for ch in text.chars() {
            line.push(ch, face.glyph(ch));
        }
        line
    }

    /// Vertical ink extent of the line.
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn push(&mut self, ch: char, glyph: GlyphMetrics) {
        let min_y = glyph.min_y.ceil();
        let max_y = glyph.max_y.ceil();
        if self.text.is_empty() {
            self.min_y = min_y;
            self.max_y = max_y;
        } else {
            self.min_y = self.min_y.min(min_y);
            self.max_y = self.max_y.max(max_y);
        }
        self.text.push(ch);
        self.width += glyph.advance.ceil();
        self.real_width += glyph.advance;
    }
}

/// Formatting options for one layout run.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Height of each line slot in pixels.
    pub line_height: f32,
    /// Maximum number of lines; `None` is unlimited.
    pub max_lines: Option<usize>,
    /// Text spliced into truncated lines, e.g. `...`. Empty disables it.
    pub overflow_marker: String,
    pub overflow_side: OverflowSide,
    /// Wrap free text onto several lines.
    pub wrap: bool,
    /// Drop lines that do not fit in the area height.
    pub clip_to_area: bool,
    pub align: TextAlign,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_height: 0.0,
            max_lines: None,
            overflow_marker: String::new(),
            overflow_side: OverflowSide::Trailing,
            wrap: true,
            clip_to_area: true,
            align: TextAlign::Left,
        }
    }
}

impl LayoutOptions {
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines = max_lines;
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

    pub fn with_clip_to_area(mut self, clip: bool) -> Self {
        self.clip_to_area = clip;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Line limit after folding in how many slots fit in `max_height`.
    pub fn line_limit(&self, max_height: f32) -> Option<usize> {
        if !self.clip_to_area || self.line_height <= 0.0 || !max_height.is_finite() {
            return self.max_lines;
        }
        let capacity = (max_height.max(0.0) / self.line_height).floor() as usize;
        Some(self.max_lines.map_or(capacity, |n| n.min(capacity)))
    }
}

/// Lay out `source` within `max_width` x `max_height`.
pub fn layout(
    source: &TextSource,
    face: &dyn Face,
    max_width: f32,
    max_height: f32,
    options: &LayoutOptions,
) -> Vec<SplitLine> {
    let limit = options.line_limit(max_height);
    let marker = options.overflow_marker.as_str();
    let side = options.overflow_side;

    match source {
        TextSource::Text(text) if text.is_empty() => Vec::new(),
        TextSource::Text(text) if !options.wrap => {
            if limit == Some(0) {
                return Vec::new();
            }
            let line = SplitLine::measure(face, text);
            vec![truncate_line(face, line, marker, side, max_width)]
        }
        TextSource::Text(text) => {
            let lines = wrap_text(face, text, max_width);
            truncate_lines(face, lines, marker, side, limit, max_width)
        }
        TextSource::Lines(lines) => lines
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|l| truncate_line(face, SplitLine::measure(face, l), marker, side, max_width))
            .collect(),
    }
}

/// Greedily break `text` into lines no wider than `max_width`.
///
/// A glyph wider than `max_width` on its own still gets a line.
pub fn wrap_text(face: &dyn Face, text: &str, max_width: f32) -> Vec<SplitLine> {
    let mut lines = Vec::new();
    let mut current = SplitLine::default();

    for ch in text.chars() {
        let glyph = face.glyph(ch);
        if !current.is_empty() && current.width + glyph.advance.ceil() > max_width {
            lines.push(std::mem::take(&mut current));
        }
        current.push(ch, glyph);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Keep at most `limit` lines, marking the last kept line when text was cut.
///
/// The marker replaces just enough glyphs at the configured end of the last
/// line to make room for its own width. A marker wider than `max_width` is
/// cut down to the glyphs that fit.
pub fn truncate_lines(
    face: &dyn Face,
    mut lines: Vec<SplitLine>,
    marker: &str,
    side: OverflowSide,
    limit: Option<usize>,
    max_width: f32,
) -> Vec<SplitLine> {
    let Some(limit) = limit else {
        return lines;
    };
    if lines.len() <= limit {
        return lines;
    }

    lines.truncate(limit);
    if marker.is_empty() {
        return lines;
    }
    let marker = fit_marker(face, marker, max_width);
    if let Some(last) = lines.last_mut() {
        *last = splice_marker(face, last, &marker, side);
    }
    lines
}

/// The marker, or as many of its leading glyphs as fit in `max_width`.
fn fit_marker(face: &dyn Face, marker: &str, max_width: f32) -> SplitLine {
    let full = SplitLine::measure(face, marker);
    if full.width <= max_width {
        return full;
    }

    let mut fitted = SplitLine::default();
    for ch in marker.chars() {
        let glyph = face.glyph(ch);
        if fitted.width + glyph.advance.ceil() > max_width {
            break;
        }
        fitted.push(ch, glyph);
    }
    fitted
}

fn splice_marker(face: &dyn Face, line: &SplitLine, marker: &SplitLine, side: OverflowSide) -> SplitLine {
    let marker_width = marker.width;
    let marker = marker.text.as_str();
    let chars: Vec<char> = line.text.chars().collect();
    let mut removed = 0.0;

    match side {
        OverflowSide::Trailing => {
            for i in (0..chars.len()).rev() {
                removed += face.glyph(chars[i]).advance.ceil();
                if removed >= marker_width {
                    let mut text: String = chars[..i].iter().collect();
                    text.push_str(marker);
                    return SplitLine::measure(face, &text);
                }
            }
        }
        OverflowSide::Leading => {
            for i in 0..chars.len() {
                removed += face.glyph(chars[i]).advance.ceil();
                if removed >= marker_width {
                    let mut text = marker.to_string();
                    text.extend(&chars[i + 1..]);
                    return SplitLine::measure(face, &text);
                }
            }
        }
    }

    // The whole line is narrower than the marker.
    SplitLine::measure(face, marker)
}

/// Fit a single line into `max_width`, cutting glyphs at the marker side.
///
/// Lines that already fit are returned unchanged.
pub fn truncate_line(
    face: &dyn Face,
    line: SplitLine,
    marker: &str,
    side: OverflowSide,
    max_width: f32,
) -> SplitLine {
    if line.width <= max_width {
        return line;
    }

    let marker = fit_marker(face, marker, max_width);
    let marker_width = marker.width;
    let marker = marker.text.as_str();
    let chars: Vec<char> = line.text.chars().collect();
    let mut kept = 0.0;

    match side {
        OverflowSide::Trailing => {
            for (i, &ch) in chars.iter().enumerate() {
                let w = face.glyph(ch).advance.ceil();
                if kept + w + marker_width > max_width {
                    let mut text: String = chars[..i].iter().collect();
                    text.push_str(marker);
                    return SplitLine::measure(face, &text);
                }
                kept += w;
            }
        }
        OverflowSide::Leading => {
            for i in (0..chars.len()).rev() {
                let w = face.glyph(chars[i]).advance.ceil();
                if kept + w + marker_width > max_width {
                    let mut text = marker.to_string();
                    text.extend(&chars[i + 1..]);
                    return SplitLine::measure(face, &text);
                }
                kept += w;
            }
        }
    }
    line
}

/// A line with its offset inside the layout area.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: SplitLine,
    /// Pen start relative to the area's left edge.
    pub x: f32,
    /// Baseline relative to the area's top edge.
    pub y: f32,
}

/// Position each line: aligned horizontally and vertically centred in its
/// own line-height slot using the line's actual ink extents.
pub fn place_lines(
    lines: Vec<SplitLine>,
    max_width: f32,
    line_height: f32,
    align: TextAlign,
) -> Vec<PlacedLine> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let x = match align {
                TextAlign::Left => 0.0,
                TextAlign::Center => (max_width - line.real_width) / 2.0,
                TextAlign::Right => max_width - line.real_width,
            };
            let centring = line_height / 2.0 - line.max_y + (line.max_y - line.min_y) / 2.0;
            let y = i as f32 * line_height + centring;
            PlacedLine { line, x, y }
        })
        .collect()
}

/// Size summary of a laid-out block of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub line_height: f32,
    /// Width the text was fitted to; `None` when unbounded.
    pub max_width: Option<f32>,
    pub lines: Vec<SplitLine>,
    /// Widest line, rounded advances.
    pub width: u32,
    /// Widest line, exact advances rounded up.
    pub real_width: u32,
    /// `lines * line_height`.
    pub height: u32,
}

impl TextBlock {
    pub fn new(lines: Vec<SplitLine>, line_height: f32, max_width: f32) -> Self {
        let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
        let real_width = lines.iter().map(|l| l.real_width).fold(0.0, f32::max);
        Self {
            line_height,
            max_width: max_width.is_finite().then_some(max_width),
            width: width as u32,
            real_width: real_width.ceil() as u32,
            height: (lines.len() as f32 * line_height) as u32,
            lines,
        }
    }
}
