//! Text measurement and line layout.

mod block;
mod font;
mod layout;

pub use block::BlockFont;
pub use font::{Face, Font, FontRegistry, FontSize, GlyphMetrics, BUILTIN_FONT};
pub use layout::{
    layout, place_lines, truncate_line, truncate_lines, wrap_text, LayoutOptions, OverflowSide,
    PlacedLine, SplitLine, TextAlign, TextBlock, TextSource,
};
