pub mod completions;
pub mod compose;
pub mod measure;
pub mod transform;

use clap::{Parser, Subcommand};

/// layerdraw - Layered raster composition
#[derive(Parser, Debug)]
#[command(name = "layerdraw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug detail to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose the layers of a YAML manifest onto a canvas
    Compose(compose::ComposeArgs),

    /// Crop, resize and colour-adjust a single image
    Transform(transform::TransformArgs),

    /// Lay out text and print the resulting lines as JSON
    Measure(measure::MeasureArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
