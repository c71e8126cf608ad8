//! Error types for atlas building, sampling and cubemap assembly.

use thiserror::Error;

/// Result type alias using AtlasError.
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Main error type for atlas operations.
///
/// The first four variants are raised by the packing, blitting and sampling
/// core. The rest only come out of the loader and export helpers.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Empty or zero-sized rectangle set, or a malformed sprite.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Buffers whose dimensions disagree.
    #[error("Size mismatch: {0}")]
    SizeMismatch(String),

    /// Position, texel index or region index outside its valid range.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Named region lookup miss.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to decode or encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write or parse a JSON manifest.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a ZIP sprite pack.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
