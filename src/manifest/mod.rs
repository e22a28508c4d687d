//! Composition manifests.
//!
//! A YAML file describing one composition run: the canvas, where to write
//! the result, and an ordered list of layers. Relative paths resolve against
//! the directory holding the manifest.
//!
//! ```yaml
//! canvas:
//!   width: 640
//!   height: 360
//!   background: "#202030"
//! output: card.png
//! layers:
//!   - type: image
//!     source: photo.jpg
//!     crop: { circle: { cx: 400, cy: 300, r: 200 } }
//!     adjust: { saturation: -40 }
//!     resample: bilinear
//!     placement: { x: 20, y: 20, width: 320, height: 320 }
//!   - type: text
//!     text: A caption that wraps and is cut short with a marker
//!     size: 28
//!     colour: "#FFFFFF"
//!     max_lines: 2
//!     overflow: "..."
//!     placement: { x: 360, y: 40, width: 260, height: 120 }
//! ```

mod layer;

pub use layer::{ImageLayerSpec, LayerSpec, PlacementSpec, TextLayerSpec};

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::codec::load_image;
use crate::compose::ComposableItem;
use crate::error::{DrawError, Result};
use crate::text::FontRegistry;
use crate::types::{Colour, RasterImage};

/// A parsed composition manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub canvas: CanvasSpec,
    /// Where the composed image is written.
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
}

/// The starting canvas: either a fresh buffer or an existing image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasSpec {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub background: Option<Colour>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A canvas with the items to draw on it, ready for `compose`.
#[derive(Debug, Clone)]
pub struct Composition {
    pub canvas: RasterImage,
    pub items: Vec<ComposableItem>,
}

impl Manifest {
    /// Load a manifest from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DrawError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a manifest from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| DrawError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check the manifest YAML syntax".to_string()),
        })
    }

    /// Output path resolved against `base_dir`.
    pub fn output_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.output.as_ref().map(|p| resolve(base_dir, p))
    }

    /// Load sources and turn every layer into a drawable item.
    pub fn build(&self, base_dir: &Path, fonts: &FontRegistry) -> Result<Composition> {
        let canvas = self.canvas.build(base_dir)?;
        let items = self
            .layers
            .iter()
            .enumerate()
            .map(|(index, layer)| {
                layer
                    .build(base_dir, fonts)
                    .map_err(|e| DrawError::Layer {
                        index,
                        source: Box::new(e),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            width = canvas.width(),
            height = canvas.height(),
            layers = items.len(),
            "manifest built"
        );
        Ok(Composition { canvas, items })
    }
}

impl CanvasSpec {
    fn build(&self, base_dir: &Path) -> Result<RasterImage> {
        match (&self.source, self.width, self.height) {
            (Some(source), None, None) if self.background.is_none() => {
                load_image(&resolve(base_dir, source))
            }
            (Some(_), _, _) => Err(DrawError::Config {
                message: "canvas `source` cannot be combined with a size or background"
                    .to_string(),
                help: Some("Resize or tint the source with an image layer instead".to_string()),
            }),
            (None, Some(width), Some(height)) => Ok(RasterImage::filled(
                width,
                height,
                self.background.unwrap_or(Colour::TRANSPARENT),
            )),
            (None, _, _) => Err(DrawError::Config {
                message: "canvas needs either `source` or both `width` and `height`".to_string(),
                help: None,
            }),
        }
    }
}

fn resolve(base_dir: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::save_image;
    use crate::compose::compose;
    use crate::text::{OverflowSide, TextAlign};
    use crate::transform::{Crop, ResampleMethod};
    use crate::types::BlendOperator;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r##"
canvas:
  width: 64
  height: 32
  background: "#102030"
output: out.png
layers:
  - type: image
    source: tile.png
    crop:
      circle: { cx: 8, cy: 8, r: 4 }
    adjust:
      brightness: -20
      opacity: 50
    resample: cubic
    blend: replace
    placement: { x: 2, y: 3, width: 16, height: 16 }
  - type: text
    text: Hello
    color: "#FFF"
    size: 12
    align: center
    max_lines: 1
    overflow: "..."
    overflow_side: left
    placement: { width: 40, height: 12 }
"##;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.canvas.width, Some(64));
        assert_eq!(manifest.canvas.background, Some(Colour::rgb(0x10, 0x20, 0x30)));
        assert_eq!(manifest.output, Some(PathBuf::from("out.png")));
        assert_eq!(manifest.layers.len(), 2);

        let LayerSpec::Image(image) = &manifest.layers[0] else {
            panic!("expected image layer");
        };
        assert_eq!(image.crop, Some(Crop::Circle { cx: 8, cy: 8, r: 4 }));
        assert_eq!(image.adjust.brightness, Some(-20.0));
        assert_eq!(image.adjust.opacity, Some(50.0));
        assert_eq!(image.resample, ResampleMethod::Cubic);
        assert_eq!(image.blend, BlendOperator::Replace);

        let LayerSpec::Text(text) = &manifest.layers[1] else {
            panic!("expected text layer");
        };
        assert_eq!(text.colour, Some(Colour::WHITE));
        assert_eq!(text.size, 12.0);
        assert_eq!(text.dpi, 72.0);
        assert_eq!(text.align, TextAlign::Center);
        assert_eq!(text.overflow_side, OverflowSide::Leading);
        assert!(text.wrap);
        assert_eq!(
            text.placement,
            Some(PlacementSpec {
                x: 0,
                y: 0,
                width: 40,
                height: 12
            })
        );
    }

    #[test]
    fn test_unknown_layer_type_is_config_error() {
        let yaml = "canvas: { width: 1, height: 1 }\nlayers:\n  - type: video\n    source: a.mp4\n";
        assert!(matches!(
            Manifest::parse(yaml),
            Err(DrawError::Config { .. })
        ));
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let yaml = "canvas: { width: 1, height: 1 }\nlayers:\n  - type: text\n    text: hi\n    italic: true\n";
        assert!(Manifest::parse(yaml).is_err());
    }

    #[test]
    fn test_build_and_compose() {
        let dir = tempdir().unwrap();
        save_image(
            &RasterImage::filled(4, 4, Colour::rgb(255, 0, 0)),
            &dir.path().join("red.png"),
        )
        .unwrap();

        let yaml = r##"
canvas: { width: 10, height: 10, background: "#FFFFFF" }
output: out/result.png
layers:
  - type: image
    source: red.png
    blend: replace
    placement: { x: 0, y: 0, width: 8, height: 8 }
  - type: text
    text: AB
    size: 5
    placement: { x: 0, y: 0, width: 10, height: 5 }
"##;
        let manifest = Manifest::parse(yaml).unwrap();
        let composition = manifest
            .build(dir.path(), &FontRegistry::with_builtin())
            .unwrap();
        assert_eq!(composition.items.len(), 2);
        assert_eq!(
            manifest.output_path(dir.path()),
            Some(dir.path().join("out/result.png"))
        );

        let out = compose(composition.canvas, &composition.items).unwrap();
        assert_eq!(out.size(), (10, 10));
        assert_eq!(out.get(7, 7), Some(Colour::rgb(255, 0, 0)));
        assert_eq!(out.get(9, 9), Some(Colour::WHITE));
    }

    #[test]
    fn test_canvas_from_source() {
        let dir = tempdir().unwrap();
        save_image(&RasterImage::filled(3, 2, Colour::BLACK), &dir.path().join("bg.png")).unwrap();

        let manifest = Manifest::parse("canvas: { source: bg.png }").unwrap();
        let composition = manifest
            .build(dir.path(), &FontRegistry::with_builtin())
            .unwrap();
        assert_eq!(composition.canvas.size(), (3, 2));
        assert!(composition.items.is_empty());
    }

    #[test]
    fn test_canvas_needs_size_or_source() {
        let registry = FontRegistry::with_builtin();
        let dir = tempdir().unwrap();

        let manifest = Manifest::parse("canvas: { width: 10 }").unwrap();
        assert!(manifest.build(dir.path(), &registry).is_err());

        let manifest = Manifest::parse("canvas: { source: a.png, width: 10, height: 10 }").unwrap();
        assert!(matches!(
            manifest.build(dir.path(), &registry),
            Err(DrawError::Config { .. })
        ));
    }

    #[test]
    fn test_layer_errors_carry_index() {
        let yaml = r#"
canvas: { width: 10, height: 10 }
layers:
  - type: text
    text: ok
  - type: text
    text: bad
    font: missing
"#;
        let manifest = Manifest::parse(yaml).unwrap();
        let err = manifest
            .build(Path::new("."), &FontRegistry::with_builtin())
            .unwrap_err();
        match err {
            DrawError::Layer { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, DrawError::Font { .. }));
            }
            other => panic!("expected layer error, got {other:?}"),
        }
    }

    #[test]
    fn test_text_layer_needs_text_or_lines() {
        let registry = FontRegistry::with_builtin();
        let yaml = "canvas: { width: 1, height: 1 }\nlayers:\n  - type: text\n    size: 10\n";
        let manifest = Manifest::parse(yaml).unwrap();
        assert!(manifest.build(Path::new("."), &registry).is_err());

        let yaml = "canvas: { width: 1, height: 1 }\nlayers:\n  - type: text\n    text: a\n    lines: [b]\n";
        let manifest = Manifest::parse(yaml).unwrap();
        assert!(manifest.build(Path::new("."), &registry).is_err());
    }

    #[test]
    fn test_negative_placement_is_rejected() {
        let yaml = "canvas: { width: 1, height: 1 }\nlayers:\n  - type: text\n    text: a\n    placement: { width: -1, height: 5 }\n";
        let manifest = Manifest::parse(yaml).unwrap();
        let err = manifest
            .build(Path::new("."), &FontRegistry::with_builtin())
            .unwrap_err();
        let DrawError::Layer { source, .. } = err else {
            panic!("expected layer error");
        };
        assert!(matches!(*source, DrawError::Placement { .. }));
    }
}
