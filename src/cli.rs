//! Command line interface
//!
//! Argument definitions for the `stipplekit` binary and the merge of command
//! line flags on top of the loaded settings.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use stipplekit_core::PlotterSize;
use stipplekit_settings::Config;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "stipplekit")]
#[command(about = "Convert images into per-brightness-level point plotting G-code")]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one G-code file per brightness level
    Generate(GenerateArgs),
    /// Write the default settings to a file (.json or .toml)
    InitConfig {
        /// Output config file
        file: PathBuf,
    },
    /// Print the effective settings
    ShowConfig {
        /// Config file (default: platform config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source image
    pub image: PathBuf,
    /// Directory for the generated files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Config file (default: platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Plotter size preset (a4, a3, a2)
    #[arg(long, conflicts_with_all = ["width", "height"])]
    pub size: Option<PlotterSize>,
    /// Custom plotter width (mm)
    #[arg(long, requires = "height")]
    pub width: Option<f64>,
    /// Custom plotter height (mm)
    #[arg(long, requires = "width")]
    pub height: Option<f64>,
    /// Number of brightness levels
    #[arg(short, long)]
    pub layers: Option<u32>,
    /// Grid spacing (mm)
    #[arg(short, long)]
    pub grid_size: Option<f64>,
    /// Marking Z height (mm)
    #[arg(long, allow_hyphen_values = true)]
    pub z_point: Option<f64>,
    /// Travel Z height (mm)
    #[arg(long, allow_hyphen_values = true)]
    pub z_travel: Option<f64>,
    /// XY feed rate (mm/min)
    #[arg(long)]
    pub feed_xy: Option<f64>,
    /// Z feed rate (mm/min)
    #[arg(long)]
    pub feed_z: Option<f64>,
    /// Also render a points preview image
    #[arg(long)]
    pub preview: Option<PathBuf>,
    /// Preview dot diameter (mm)
    #[arg(long)]
    pub dot_diameter: Option<f64>,
    /// Generate levels on parallel threads
    #[arg(long)]
    pub parallel: bool,
}

impl GenerateArgs {
    /// Apply command line overrides on top of the loaded settings
    pub fn apply_overrides(&self, config: &mut Config) {
        let generation = &mut config.generation;
        if let Some(size) = self.size {
            generation.set_plotter_size(size);
        }
        if let (Some(width), Some(height)) = (self.width, self.height) {
            generation.set_plotter_size(PlotterSize::Custom { width, height });
        }
        if let Some(layers) = self.layers {
            generation.num_layers = layers;
        }
        if let Some(grid) = self.grid_size {
            generation.grid_size = grid;
        }
        if let Some(z) = self.z_point {
            generation.z_point = z;
        }
        if let Some(z) = self.z_travel {
            generation.z_travel = z;
        }
        if let Some(feed) = self.feed_xy {
            generation.feed_rate_xy = feed;
        }
        if let Some(feed) = self.feed_z {
            generation.feed_rate_z = feed;
        }
        if let Some(diameter) = self.dot_diameter {
            config.preview.dot_diameter = diameter;
        }
    }
}
