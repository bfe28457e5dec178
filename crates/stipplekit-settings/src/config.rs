//! Configuration and settings management for StippleKit
//!
//! Provides configuration file handling and validation. Supports JSON and TOML
//! file formats, chosen by file extension.
//!
//! Configuration is organized into sections:
//! - Generation defaults (plotter size, layers, grid, Z heights, feed rates)
//! - Preview rendering (dot size, resolution)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use stipplekit_core::{GenerationParameters, ParameterResult, PlotterDimensions, PlotterSize};
use tracing::{debug, info};

/// Application directory name under the platform config directory
pub const APP_DIR_NAME: &str = "stipplekit";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Plotter size preset as stored in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlotterPreset {
    /// 210 x 297 mm
    #[default]
    A4,
    /// 297 x 420 mm
    A3,
    /// 420 x 594 mm
    A2,
    /// Use `custom_width` and `custom_height`
    Custom,
}

impl fmt::Display for PlotterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A4 => write!(f, "a4"),
            Self::A3 => write!(f, "a3"),
            Self::A2 => write!(f, "a2"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Default values for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Plotter size preset
    pub plotter_size: PlotterPreset,
    /// Width used by the custom preset (mm)
    pub custom_width: f64,
    /// Height used by the custom preset (mm)
    pub custom_height: f64,
    /// Number of brightness levels
    pub num_layers: u32,
    /// Sample grid spacing (mm)
    pub grid_size: f64,
    /// Marking Z height (mm)
    pub z_point: f64,
    /// Travel Z height (mm)
    pub z_travel: f64,
    /// XY feed rate (mm/min)
    pub feed_rate_xy: f64,
    /// Z feed rate (mm/min)
    pub feed_rate_z: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let params = GenerationParameters::default();
        let dims = params.dimensions;
        Self {
            plotter_size: PlotterPreset::A4,
            custom_width: dims.width,
            custom_height: dims.height,
            num_layers: params.num_layers,
            grid_size: params.grid_size,
            z_point: params.z_point,
            z_travel: params.z_travel,
            feed_rate_xy: params.feed_rate_xy,
            feed_rate_z: params.feed_rate_z,
        }
    }
}

impl GenerationSettings {
    /// Resolve the preset to a core plotter size
    pub fn plotter_size(&self) -> PlotterSize {
        match self.plotter_size {
            PlotterPreset::A4 => PlotterSize::A4,
            PlotterPreset::A3 => PlotterSize::A3,
            PlotterPreset::A2 => PlotterSize::A2,
            PlotterPreset::Custom => PlotterSize::Custom {
                width: self.custom_width,
                height: self.custom_height,
            },
        }
    }

    /// Select a plotter size; a custom size also stores its width and height
    pub fn set_plotter_size(&mut self, size: PlotterSize) {
        self.plotter_size = match size {
            PlotterSize::A4 => PlotterPreset::A4,
            PlotterSize::A3 => PlotterPreset::A3,
            PlotterSize::A2 => PlotterPreset::A2,
            PlotterSize::Custom { width, height } => {
                self.custom_width = width;
                self.custom_height = height;
                PlotterPreset::Custom
            }
        };
    }

    /// Resolved plotter dimensions
    pub fn dimensions(&self) -> ParameterResult<PlotterDimensions> {
        self.plotter_size().dimensions()
    }

    /// Build validated generation parameters
    pub fn to_parameters(&self) -> ParameterResult<GenerationParameters> {
        GenerationParameters {
            dimensions: self.dimensions()?,
            num_layers: self.num_layers,
            grid_size: self.grid_size,
            z_point: self.z_point,
            z_travel: self.z_travel,
            feed_rate_xy: self.feed_rate_xy,
            feed_rate_z: self.feed_rate_z,
        }
        .validated()
    }
}

/// Preview rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Diameter of each plotted dot (mm)
    pub dot_diameter: f64,
    /// Output resolution in pixels per millimeter
    pub pixels_per_mm: f64,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            dot_diameter: 2.0,
            pixels_per_mm: 4.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Generation defaults
    pub generation: GenerationSettings,
    /// Preview settings
    pub preview: PreviewSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    ///
    /// Parent directories are created as needed.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Load the given file, or the default file if it exists, or defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        let default_path = default_config_path()?;
        if default_path.exists() {
            Self::load_from_file(&default_path)
        } else {
            debug!(
                "No config at {}, using defaults",
                default_path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.generation.to_parameters()?;

        for (key, value) in [
            ("preview.dot_diameter", self.preview.dot_diameter),
            ("preview.pixels_per_mm", self.preview.pixels_per_mm),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Platform config file location (`<config dir>/stipplekit/config.toml`)
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
    })?;
    Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
