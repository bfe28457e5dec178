//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for image loading, parameter
//! validation and G-code document retrieval.

use std::io;
use stipplekit_core::ParameterError;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Generation parameters failed validation.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    /// Generation was requested before an image was loaded.
    #[error("No image loaded")]
    MissingImage,

    /// Image file could not be opened or decoded.
    #[error("Failed to load image: {0}")]
    LoadError(String),

    /// Image encoding or processing failed.
    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    /// A document was requested for a level that does not exist.
    #[error("Level {level} out of range (result has {levels} levels)")]
    LevelOutOfRange { level: usize, levels: usize },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl From<CamToolError> for stipplekit_core::Error {
    fn from(err: CamToolError) -> Self {
        match err {
            CamToolError::InvalidParameters(e) => stipplekit_core::Error::InvalidParameters(e),
            CamToolError::MissingImage => stipplekit_core::Error::MissingImage,
            CamToolError::IoError(e) => stipplekit_core::Error::Io(e),
            other => stipplekit_core::Error::other(other.to_string()),
        }
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
