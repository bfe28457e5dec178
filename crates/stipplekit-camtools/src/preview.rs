//! Points preview rendering
//!
//! Draws the sampled points of a [`GenerationResult`] as filled dots on a
//! white canvas covering the plotter area. Each level is painted in its own
//! gray value, darkest level first.

use crate::error::CamToolResult;
use crate::stipple_engraver::GenerationResult;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use stipplekit_core::{ParameterError, PlotterDimensions};

/// Largest preview canvas, in pixels
pub const MAX_PREVIEW_PIXELS: u64 = 64_000_000;

/// Preview rendering options
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Output resolution in pixels per millimeter
    pub pixels_per_mm: f64,
    /// Diameter of each plotted dot (mm)
    pub dot_diameter: f64,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            pixels_per_mm: 4.0,
            dot_diameter: 2.0,
        }
    }
}

impl PreviewOptions {
    fn validate(&self, dims: &PlotterDimensions) -> CamToolResult<()> {
        for (name, value) in [
            ("pixels_per_mm", self.pixels_per_mm),
            ("dot_diameter", self.dot_diameter),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::not_finite(name).into());
            }
            if value <= 0.0 {
                return Err(ParameterError::not_positive(name, value).into());
            }
        }

        let ppm = self.pixels_per_mm;
        let pixels = (dims.width * ppm).ceil() * (dims.height * ppm).ceil();
        if pixels > MAX_PREVIEW_PIXELS as f64 {
            return Err(ParameterError::InvalidValue {
                name: "pixels_per_mm".to_string(),
                reason: format!(
                    "{} px/mm gives a {:.0} pixel preview (limit {})",
                    ppm, pixels, MAX_PREVIEW_PIXELS
                ),
            }
            .into());
        }
        Ok(())
    }
}

/// Gray value used for a level: 0 for the darkest, 255 for the lightest
///
/// A single level is drawn black.
pub fn level_gray(level: usize, level_count: usize) -> u8 {
    if level_count <= 1 {
        return 0;
    }
    let t = level as f64 / (level_count - 1) as f64;
    (t * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Render the points of a result as an RGB image
pub fn render_points_preview(
    result: &GenerationResult,
    options: &PreviewOptions,
) -> CamToolResult<RgbImage> {
    let dims = result.parameters().dimensions;
    options.validate(&dims)?;

    let ppm = options.pixels_per_mm;
    let width = ((dims.width * ppm).ceil() as u32).max(1);
    let height = ((dims.height * ppm).ceil() as u32).max(1);
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    // At least one pixel so tiny dots stay visible
    let radius = ((options.dot_diameter * ppm / 2.0).round() as i32).max(1);
    let level_count = result.level_count();

    for (level, points) in result.points().iter() {
        let gray = level_gray(level, level_count);
        for point in points {
            let center = (
                (point.x * ppm).round() as i32,
                (point.y * ppm).round() as i32,
            );
            draw_filled_circle_mut(&mut canvas, center, radius, Rgb([gray, gray, gray]));
        }
    }

    Ok(canvas)
}
