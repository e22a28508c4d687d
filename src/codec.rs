//! Loading and saving raster images.
//!
//! Decoding accepts anything the `image` crate recognises. Encoding is keyed
//! by file extension and limited to PNG (lossless, keeps alpha) and JPEG
//! (lossy, alpha dropped).

use std::io::{BufRead, Seek};
use std::path::Path;

use image::{DynamicImage, ImageError, ImageFormat, ImageReader};

use crate::error::{DrawError, Result};
use crate::types::RasterImage;

/// Encodings a buffer can be saved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(DrawError::UnsupportedFormat { extension }),
        }
    }
}

/// Load an image file into a raster buffer.
pub fn load_image(path: &Path) -> Result<RasterImage> {
    let img = image::open(path).map_err(|e| match e {
        ImageError::IoError(io) => DrawError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", io),
        },
        other => DrawError::Decode {
            message: format!("{}: {}", path.display(), other),
        },
    })?;
    Ok(from_dynamic(img))
}

/// Decode an in-memory encoded image.
pub fn load_from_memory(bytes: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory(bytes).map_err(decode_error)?;
    Ok(from_dynamic(img))
}

/// Decode an image from a seekable reader, guessing the format from its contents.
pub fn load_from_reader<R: BufRead + Seek>(reader: R) -> Result<RasterImage> {
    let img = ImageReader::new(reader)
        .with_guessed_format()?
        .decode()
        .map_err(decode_error)?;
    Ok(from_dynamic(img))
}

/// Save a buffer, choosing the encoding from the path's extension.
///
/// Unsupported extensions fail before anything is written.
pub fn save_image(img: &RasterImage, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path)?;
    let rgba = img.to_rgba_image();

    let written = match format {
        OutputFormat::Png => rgba.save_with_format(path, ImageFormat::Png),
        OutputFormat::Jpeg => {
            DynamicImage::ImageRgba8(rgba)
                .to_rgb8()
                .save_with_format(path, ImageFormat::Jpeg)
        }
    };
    written.map_err(|e| DrawError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write {:?}: {}", format, e),
    })?;

    tracing::debug!(path = %path.display(), ?format, "image saved");
    Ok(())
}

fn from_dynamic(img: DynamicImage) -> RasterImage {
    RasterImage::from_rgba_image(&img.to_rgba8())
}

fn decode_error(e: ImageError) -> DrawError {
    DrawError::Decode {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn checker() -> RasterImage {
        RasterImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Colour::BLACK
            } else {
                Colour::new(255, 0, 0, 128)
            }
        })
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.JPG")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.jpeg")).unwrap(), OutputFormat::Jpeg);
        assert!(matches!(
            OutputFormat::from_path(Path::new("a.gif")),
            Err(DrawError::UnsupportedFormat { extension }) if extension == "gif"
        ));
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_png_keeps_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        save_image(&checker(), &path).unwrap();

        assert_eq!(load_image(&path).unwrap(), checker());
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let img = RasterImage::filled(8, 8, Colour::new(200, 40, 40, 10));
        save_image(&img, &path).unwrap();

        let back = load_image(&path).unwrap();
        assert_eq!(back.size(), (8, 8));
        assert!(back.pixels().iter().all(|c| c.is_opaque()));
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bmp");
        assert!(save_image(&checker(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_from_memory_and_reader() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mem.png");
        save_image(&checker(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        assert_eq!(load_from_memory(&bytes).unwrap(), checker());
        assert_eq!(load_from_reader(Cursor::new(bytes)).unwrap(), checker());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_image(Path::new("/nonexistent/in.png")).unwrap_err();
        assert!(matches!(err, DrawError::Io { .. }));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            load_from_memory(b"not an image"),
            Err(DrawError::Decode { .. })
        ));
    }
}
