//! Generation parameters
//!
//! The full set of numeric inputs for one image to G-code run. Values are
//! checked once by [`GenerationParameters::validate`] and trusted afterwards.

use super::PlotterDimensions;
use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};

/// Largest supported number of brightness levels
pub const MAX_LAYERS: u32 = 256;

/// Largest number of grid cells a run may sample
pub const MAX_SAMPLE_POINTS: u64 = 10_000_000;

/// Parameters for a point plotting generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Plotter work area (mm)
    pub dimensions: PlotterDimensions,
    /// Number of brightness levels, one G-code document per level
    pub num_layers: u32,
    /// Distance between adjacent sample centers (mm)
    pub grid_size: f64,
    /// Z height at which the tool marks the surface (mm)
    pub z_point: f64,
    /// Z height for safe horizontal travel (mm)
    pub z_travel: f64,
    /// Feed rate for XY moves (mm/min)
    pub feed_rate_xy: f64,
    /// Feed rate for Z moves (mm/min)
    pub feed_rate_z: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            dimensions: PlotterDimensions::default(),
            num_layers: 5,
            grid_size: 5.0,
            z_point: 0.0,
            z_travel: 5.0,
            feed_rate_xy: 3000.0,
            feed_rate_z: 500.0,
        }
    }
}

impl GenerationParameters {
    /// Validate all fields
    ///
    /// Layer count, grid size and both feed rates must be strictly positive,
    /// Z heights must be finite, and the plotter dimensions must be valid.
    /// The layer count is capped at [`MAX_LAYERS`] and the grid may not hold
    /// more than [`MAX_SAMPLE_POINTS`] cells.
    pub fn validate(&self) -> ParameterResult<()> {
        if self.num_layers == 0 {
            return Err(ParameterError::not_positive("num_layers", 0.0));
        }
        if self.num_layers > MAX_LAYERS {
            return Err(ParameterError::too_large(
                "num_layers",
                f64::from(self.num_layers),
                f64::from(MAX_LAYERS),
            ));
        }
        positive("grid_size", self.grid_size)?;
        positive("feed_rate_xy", self.feed_rate_xy)?;
        positive("feed_rate_z", self.feed_rate_z)?;
        finite("z_point", self.z_point)?;
        finite("z_travel", self.z_travel)?;
        self.dimensions.validate()?;

        let cells = self.grid_cell_count();
        if cells > MAX_SAMPLE_POINTS as f64 {
            return Err(ParameterError::InvalidValue {
                name: "grid_size".to_string(),
                reason: format!(
                    "{} mm spacing gives {:.0} sample points (limit {})",
                    self.grid_size, cells, MAX_SAMPLE_POINTS
                ),
            });
        }
        Ok(())
    }

    /// Consume and return the parameters if they validate
    pub fn validated(self) -> ParameterResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Number of grid cells, computed in floating point so it cannot overflow
    pub fn grid_cell_count(&self) -> f64 {
        let cols = (self.dimensions.width / self.grid_size).floor();
        let rows = (self.dimensions.height / self.grid_size).floor();
        cols * rows
    }
}

fn finite(name: &str, value: f64) -> ParameterResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::not_finite(name))
    }
}

fn positive(name: &str, value: f64) -> ParameterResult<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::not_positive(name, value))
    }
}
