//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, image codec, resize and JSON errors, and provides
//! semantic variants for the fatal preconditions of both pipelines.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JPEG encoder error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("Resize error: {0}")]
    Resize(#[from] fast_image_resize::ResizeError),

    #[error("Image buffer error: {0}")]
    ImageBuffer(#[from] fast_image_resize::ImageBufferError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Folder not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("No image files found in {}", path.display())]
    NoTiles { path: PathBuf },

    #[error("Canvas of {cols}x{rows} tiles at {tile_width}x{tile_height} px does not fit in memory addressing")]
    CanvasTooLarge {
        cols: u128,
        rows: u128,
        tile_width: u32,
        tile_height: u32,
    },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Video error: {0}")]
    Video(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn video<E: std::fmt::Display>(e: E) -> Self {
        Error::Video(e.to_string())
    }

    pub fn invalid(arg: &'static str, value: impl ToString) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }
}
