use miette::Diagnostic;
use thiserror::Error;

/// Main error type for layerdraw operations
#[derive(Error, Diagnostic, Debug)]
pub enum DrawError {
    #[error("IO error: {0}")]
    #[diagnostic(code(layerdraw::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(layerdraw::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Decode error: {message}")]
    #[diagnostic(code(layerdraw::decode))]
    Decode { message: String },

    #[error("Unsupported output format: '{extension}'")]
    #[diagnostic(
        code(layerdraw::format),
        help("Save as .png (lossless, keeps alpha) or .jpg/.jpeg (lossy, no alpha)")
    )]
    UnsupportedFormat { extension: String },

    #[error("Invalid placement: {message}")]
    #[diagnostic(code(layerdraw::placement))]
    Placement {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Font error: {message}")]
    #[diagnostic(code(layerdraw::font))]
    Font {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(layerdraw::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Layer {index} failed: {source}")]
    #[diagnostic(code(layerdraw::layer))]
    Layer {
        index: usize,
        source: Box<DrawError>,
    },
}

pub type Result<T> = std::result::Result<T, DrawError>;
