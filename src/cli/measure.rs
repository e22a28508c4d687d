//! Measure command implementation.
//!
//! Lays text out without drawing it and prints the block as JSON on stdout.

use std::io::Write;

use clap::Args;

use crate::compose::TextItem;
use crate::error::Result;
use crate::text::{FontRegistry, OverflowSide, TextAlign, BUILTIN_FONT};
use crate::types::PlacementArea;

/// Lay out text and print the resulting lines as JSON
#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Free text to wrap
    #[arg(long, required_unless_present = "line", conflicts_with = "line")]
    pub text: Option<String>,

    /// An explicit line (repeatable); lines are truncated, never reflowed
    #[arg(long)]
    pub line: Vec<String>,

    /// Available width in pixels (unbounded when omitted)
    #[arg(long)]
    pub width: Option<u32>,

    /// Available height in pixels (unbounded when omitted)
    #[arg(long)]
    pub height: Option<u32>,

    /// Registered font name
    #[arg(long, default_value = BUILTIN_FONT)]
    pub font: String,

    /// Font size in pixels
    #[arg(long, default_value_t = 24.0)]
    pub size: f32,

    #[arg(long, default_value_t = 72.0)]
    pub dpi: f32,

    /// Line slot height (defaults to the font size)
    #[arg(long)]
    pub line_height: Option<f32>,

    #[arg(long, value_enum, default_value_t = TextAlign::Left)]
    pub align: TextAlign,

    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Marker spliced into truncated lines, e.g. "..."
    #[arg(long, default_value = "")]
    pub overflow: String,

    #[arg(long, value_enum, default_value_t = OverflowSide::Trailing)]
    pub overflow_side: OverflowSide,

    /// Keep free text on a single line
    #[arg(long)]
    pub no_wrap: bool,
}

impl MeasureArgs {
    fn item(&self, fonts: &FontRegistry) -> Result<TextItem> {
        let font = fonts.get(&self.font)?;
        let mut item = match &self.text {
            Some(text) => TextItem::new(text.clone(), font),
            None => TextItem::lines(self.line.iter().cloned(), font),
        };

        item = item
            .with_size(self.size)
            .with_dpi(self.dpi)
            .with_align(self.align)
            .with_overflow(self.overflow.clone(), self.overflow_side)
            .with_wrap(!self.no_wrap);
        if let Some(lh) = self.line_height {
            item = item.with_line_height(lh);
        }
        if let Some(n) = self.max_lines {
            item = item.with_max_lines(n);
        }
        if self.width.is_some() || self.height.is_some() {
            item = item.with_placement(PlacementArea::new(
                0,
                0,
                self.width.unwrap_or(u32::MAX),
                self.height.unwrap_or(u32::MAX),
            ));
        }
        Ok(item)
    }
}

pub fn run(args: MeasureArgs, out: &mut dyn Write) -> Result<()> {
    let fonts = FontRegistry::with_builtin();
    let block = args.item(&fonts)?.measure()?;
    tracing::debug!(lines = block.lines.len(), width = block.width, height = block.height, "measured");

    serde_json::to_writer_pretty(&mut *out, &block).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Wrapper {
        #[command(flatten)]
        args: MeasureArgs,
    }

    fn measure(argv: &[&str]) -> serde_json::Value {
        let mut full = vec!["measure"];
        full.extend_from_slice(argv);
        let args = Wrapper::try_parse_from(full).unwrap().args;
        let mut out = Vec::new();
        run(args, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_measure_wrapped_text() {
        // Built-in font at 10px advances 5px per ASCII glyph.
        let json = measure(&["--text", "ABCDE", "--width", "13", "--size", "10"]);
        let lines: Vec<&str> = json["lines"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["text"].as_str().unwrap())
            .collect();
        assert_eq!(lines, vec!["AB", "CD", "E"]);
        assert_eq!(json["width"], 10);
        assert_eq!(json["height"], 30);
        assert_eq!(json["line_height"], 10.0);
    }

    #[test]
    fn test_measure_explicit_lines_with_marker() {
        let json = measure(&[
            "--line", "ABCDEFGH", "--line", "AB", "--width", "30", "--size", "10", "--overflow",
            "..",
        ]);
        assert_eq!(json["lines"][0]["text"], "ABCD..");
        assert_eq!(json["lines"][1]["text"], "AB");
    }

    #[test]
    fn test_text_or_line_is_required() {
        assert!(Wrapper::try_parse_from(["measure"]).is_err());
        assert!(Wrapper::try_parse_from(["measure", "--text", "a", "--line", "b"]).is_err());
    }

    #[test]
    fn test_unknown_font_is_error() {
        let args = Wrapper::try_parse_from(["measure", "--text", "a", "--font", "serif"])
            .unwrap()
            .args;
        assert!(run(args, &mut Vec::new()).is_err());
    }
}
