//! Error handling for StippleKit
//!
//! Provides the error types shared by every layer of the application:
//! - Parameter errors (validation of generation parameters)
//! - Generation errors (running the image to G-code pipeline)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Parameter validation error type
///
/// Raised at the boundary, before any sampling or classification work begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter that must be strictly positive was zero or negative
    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A parameter was NaN or infinite
    #[error("Parameter '{name}' must be a finite number")]
    NotFinite {
        /// The parameter name.
        name: String,
    },

    /// A parameter exceeds the largest supported value
    #[error("Parameter '{name}' must be at most {max}, got {value}")]
    TooLarge {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
        /// The largest accepted value.
        max: f64,
    },

    /// Plotter dimensions are zero or negative
    #[error("Invalid plotter dimensions: {width} x {height} mm")]
    InvalidDimensions {
        /// The requested width in millimeters.
        width: f64,
        /// The requested height in millimeters.
        height: f64,
    },

    /// A parameter value could not be interpreted
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ParameterError {
    /// Create a not-positive error for the named parameter
    pub fn not_positive(name: impl Into<String>, value: f64) -> Self {
        Self::NotPositive {
            name: name.into(),
            value,
        }
    }

    /// Create a too-large error for the named parameter
    pub fn too_large(name: impl Into<String>, value: f64, max: f64) -> Self {
        Self::TooLarge {
            name: name.into(),
            value,
            max,
        }
    }

    /// Create a not-finite error for the named parameter
    pub fn not_finite(name: impl Into<String>) -> Self {
        Self::NotFinite { name: name.into() }
    }
}

/// Main error type for StippleKit
///
/// A unified error type covering the failure kinds of a generation run.
#[derive(Error, Debug)]
pub enum Error {
    /// Parameters failed validation
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    /// Generation was requested with no image loaded
    #[error("No image loaded")]
    MissingImage,

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a parameter validation error
    pub fn is_invalid_parameters(&self) -> bool {
        matches!(self, Error::InvalidParameters(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = std::result::Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::not_positive("grid_size", -5.0);
        assert_eq!(
            err.to_string(),
            "Parameter 'grid_size' must be positive, got -5"
        );

        let err = ParameterError::InvalidDimensions {
            width: 0.0,
            height: 297.0,
        };
        assert_eq!(err.to_string(), "Invalid plotter dimensions: 0 x 297 mm");

        let err = ParameterError::not_finite("z_point");
        assert_eq!(err.to_string(), "Parameter 'z_point' must be a finite number");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ParameterError::not_positive("num_layers", 0.0).into();
        assert!(err.is_invalid_parameters());
        assert_eq!(
            err.to_string(),
            "Invalid parameters: Parameter 'num_layers' must be positive, got 0"
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_invalid_parameters());
    }

    #[test]
    fn test_too_large_display() {
        let err = ParameterError::too_large("num_layers", 1000.0, 256.0);
        assert_eq!(
            err.to_string(),
            "Parameter 'num_layers' must be at most 256, got 1000"
        );
    }

    #[test]
    fn test_missing_image_display() {
        assert_eq!(Error::MissingImage.to_string(), "No image loaded");
    }
}
