//! Data models for StippleKit
//!
//! Plotter dimensions, generation parameters and sampled points. All lengths
//! are in millimeters in plotter space, with the origin at the top-left of the
//! work area and Y growing downwards (image orientation).

mod dimensions;
mod params;

pub use dimensions::{PlotterDimensions, PlotterSize, MAX_PLOTTER_EXTENT};
pub use params::{GenerationParameters, MAX_LAYERS, MAX_SAMPLE_POINTS};

use serde::{Deserialize, Serialize};

/// A grid sample in plotter coordinates
///
/// Created once per grid cell and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledPoint {
    /// X position of the cell center (mm)
    pub x: f64,
    /// Y position of the cell center (mm)
    pub y: f64,
    /// Brightness in the range 0.0 (black) to 100.0 (white)
    pub brightness: f64,
}

impl SampledPoint {
    /// Create a new sampled point
    pub fn new(x: f64, y: f64, brightness: f64) -> Self {
        Self { x, y, brightness }
    }
}
