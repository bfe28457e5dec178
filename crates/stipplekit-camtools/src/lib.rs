//! # StippleKit CAM Tools
//!
//! This crate turns raster images into point plotting G-code for pen and
//! engraving plotters that mark discrete dots.
//!
//! ## Pipeline
//!
//! - **Image Sampler**: Scale-copies the image onto the plotter area and samples a grid
//! - **Level Classifier**: Quantizes each sample's brightness into one of N levels
//! - **Point Store**: Keeps the samples of every level in scan order
//! - **Toolpath Generator**: Emits one plunge-and-lift program per level
//! - **Command Formatter**: Renders G-code lines with fixed-precision coordinates
//!
//! ## Supporting Tools
//!
//! - **Stipple Engraver**: Runs the whole pipeline and returns a `GenerationResult`
//! - **Preview**: Renders the sampled points as a raster image

pub mod classifier;
pub mod error;
pub mod gcode;
pub mod point_store;
pub mod preview;
pub mod sampler;
pub mod stipple_engraver;
pub mod toolpath;

// Re-export commonly used items
pub use classifier::classify_level;
pub use error::{CamToolError, CamToolResult};
pub use gcode::GcodeLine;
pub use point_store::PointsByLevel;
pub use preview::{render_points_preview, PreviewOptions};
pub use sampler::{prepare_image, sample_grid, BrightnessSource, SampleGrid};
pub use stipple_engraver::{GenerationResult, StippleEngraver};
pub use toolpath::{GcodeDocument, PointToolpathGenerator};
