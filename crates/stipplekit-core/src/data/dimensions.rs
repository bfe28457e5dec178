//! Plotter work area
//!
//! Physical size of the plotter bed in millimeters, either from one of the
//! paper-size presets or a custom width and height.

use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest supported plotter side in millimeters
pub const MAX_PLOTTER_EXTENT: f64 = 5_000.0;

/// Physical plotter width and height in millimeters
///
/// Both sides are strictly positive once validated. A value is fixed for the
/// duration of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotterDimensions {
    /// Width in millimeters (X axis)
    pub width: f64,
    /// Height in millimeters (Y axis)
    pub height: f64,
}

impl PlotterDimensions {
    /// Create validated dimensions
    pub fn new(width: f64, height: f64) -> ParameterResult<Self> {
        let dims = Self { width, height };
        dims.validate()?;
        Ok(dims)
    }

    /// Check that both sides are finite, strictly positive and at most
    /// [`MAX_PLOTTER_EXTENT`]
    pub fn validate(&self) -> ParameterResult<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(self.width) && valid(self.height)) {
            return Err(ParameterError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value > MAX_PLOTTER_EXTENT {
                return Err(ParameterError::too_large(name, value, MAX_PLOTTER_EXTENT));
            }
        }
        Ok(())
    }
}

impl Default for PlotterDimensions {
    fn default() -> Self {
        PlotterSize::A4.dimensions_unchecked()
    }
}

impl fmt::Display for PlotterDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", self.width, self.height)
    }
}

/// Plotter size selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotterSize {
    /// 210 x 297 mm
    A4,
    /// 297 x 420 mm
    A3,
    /// 420 x 594 mm
    A2,
    /// User supplied size in millimeters
    Custom {
        /// Width in millimeters
        width: f64,
        /// Height in millimeters
        height: f64,
    },
}

impl Default for PlotterSize {
    fn default() -> Self {
        Self::A4
    }
}

impl PlotterSize {
    /// Resolve to validated plotter dimensions
    ///
    /// Presets always succeed; a custom size is rejected when either side is
    /// not strictly positive.
    pub fn dimensions(&self) -> ParameterResult<PlotterDimensions> {
        let dims = self.dimensions_unchecked();
        dims.validate()?;
        Ok(dims)
    }

    fn dimensions_unchecked(&self) -> PlotterDimensions {
        let (width, height) = match *self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::A2 => (420.0, 594.0),
            Self::Custom { width, height } => (width, height),
        };
        PlotterDimensions { width, height }
    }
}

impl fmt::Display for PlotterSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A4 => write!(f, "A4"),
            Self::A3 => write!(f, "A3"),
            Self::A2 => write!(f, "A2"),
            Self::Custom { width, height } => write!(f, "Custom ({} x {} mm)", width, height),
        }
    }
}

impl FromStr for PlotterSize {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "a3" => Ok(Self::A3),
            "a2" => Ok(Self::A2),
            other => Err(ParameterError::InvalidValue {
                name: "plotter_size".to_string(),
                reason: format!("unknown preset '{}' (expected a4, a3 or a2)", other),
            }),
        }
    }
}
