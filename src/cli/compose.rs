//! Compose command implementation.
//!
//! Runs a YAML manifest and writes the composed image.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::codec::save_image;
use crate::compose::compose;
use crate::error::{DrawError, Result};
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};
use crate::text::FontRegistry;
use crate::types::RasterImage;

/// Compose the layers of a YAML manifest onto a canvas
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Manifest file describing the canvas and layers
    pub manifest: PathBuf,

    /// Output image (.png or .jpg); overrides the manifest's `output`
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Still write the image when a layer fails, with the layers drawn so far
    #[arg(long)]
    pub keep_partial: bool,
}

pub fn run(args: ComposeArgs, printer: &Printer) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let base_dir = args
        .manifest
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let output = args
        .output
        .clone()
        .or_else(|| manifest.output_path(&base_dir))
        .ok_or_else(|| DrawError::Config {
            message: "no output path".to_string(),
            help: Some("Set `output` in the manifest or pass --output".to_string()),
        })?;

    let fonts = FontRegistry::with_builtin();
    let composition = manifest.build(&base_dir, &fonts)?;
    printer.status(
        "Composing",
        &format!(
            "{} ({}x{}, {})",
            display_path(&args.manifest),
            composition.canvas.width(),
            composition.canvas.height(),
            plural(composition.items.len(), "layer", "layers")
        ),
    );

    let canvas = match compose(composition.canvas, &composition.items) {
        Ok(canvas) => canvas,
        Err(partial) if args.keep_partial => {
            printer.warning(
                "Partial",
                &format!("layer {} failed: {}", partial.failed_at, partial.error),
            );
            write_output(&partial.canvas, &output, printer)?;
            return Err(partial.into());
        }
        Err(partial) => return Err(partial.into()),
    };

    write_output(&canvas, &output, printer)
}

fn write_output(canvas: &RasterImage, output: &Path, printer: &Printer) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DrawError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    save_image(canvas, output)?;
    printer.success("Wrote", &display_path(output));
    Ok(())
}
