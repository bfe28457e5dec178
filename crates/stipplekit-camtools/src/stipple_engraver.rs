//! Point Stipple Engraving Tool
//!
//! Converts bitmap images into point plotting G-code, one program per
//! brightness level. The image is scale-copied onto the plotter area, sampled
//! on a regular grid, and every sample is assigned to a level. Each level is
//! then plotted by plunging the tool once per point.
//!
//! A run produces a fresh [`GenerationResult`]; nothing from an earlier run is
//! reused or modified.

use crate::error::{CamToolError, CamToolResult};
use crate::point_store::PointsByLevel;
use crate::sampler::{prepare_image, sample_grid, SampleGrid};
use crate::toolpath::{GcodeDocument, PointToolpathGenerator};
use image::DynamicImage;
use serde::Serialize;
use rayon::prelude::*;
use std::path::Path;
use stipplekit_core::GenerationParameters;
use tracing::{debug, info};

/// Stipple engraving tool for bitmap images
#[derive(Debug, Clone)]
pub struct StippleEngraver {
    image: Option<DynamicImage>,
    params: GenerationParameters,
}

impl StippleEngraver {
    /// Create an engraver with no image loaded
    pub fn new(params: GenerationParameters) -> Self {
        Self {
            image: None,
            params,
        }
    }

    /// Create an engraver from an image file
    pub fn from_file<P: AsRef<Path>>(path: P, params: GenerationParameters) -> CamToolResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| CamToolError::LoadError(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_image(img, params))
    }

    /// Create an engraver from a decoded image
    pub fn from_image(img: DynamicImage, params: GenerationParameters) -> Self {
        debug!(
            "Loaded source image {}x{} px",
            img.width(),
            img.height()
        );
        Self {
            image: Some(img),
            params,
        }
    }

    /// Replace the source image
    pub fn set_image(&mut self, img: DynamicImage) {
        self.image = Some(img);
    }

    /// Whether a source image is loaded
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Current parameters
    pub fn parameters(&self) -> &GenerationParameters {
        &self.params
    }

    /// Sample the image and bucket the points by brightness level
    pub fn generate(&self) -> CamToolResult<GenerationResult> {
        self.generate_with_progress(|_| {})
    }

    /// Sample the image with a progress callback (0.0 to 1.0)
    ///
    /// Fails with [`CamToolError::MissingImage`] when no image is loaded and
    /// with [`CamToolError::InvalidParameters`] when validation fails; in both
    /// cases no sampling is done.
    pub fn generate_with_progress<F>(&self, mut progress_callback: F) -> CamToolResult<GenerationResult>
    where
        F: FnMut(f32),
    {
        let source = self.image.as_ref().ok_or(CamToolError::MissingImage)?;
        let params = self.params.clone().validated()?;

        progress_callback(0.0);

        let dims = params.dimensions;
        info!(
            "Generating {} levels on {} with {} mm grid",
            params.num_layers, dims, params.grid_size
        );

        let gray = prepare_image(source, &dims);
        progress_callback(0.2);

        let grid = SampleGrid::new(dims, params.grid_size);
        debug!("Sample grid: {} cols x {} rows", grid.cols, grid.rows);

        let samples = sample_grid(&gray, &grid);
        progress_callback(0.6);

        let points = PointsByLevel::from_samples(params.num_layers, samples);
        progress_callback(0.9);

        info!(
            "Sampled {} points into levels {:?}",
            points.total_points(),
            points.counts()
        );

        progress_callback(1.0);

        Ok(GenerationResult {
            parameters: params,
            grid,
            points,
        })
    }
}

/// Outcome of one generation run
///
/// Holds the parameters that produced it together with the bucketed points.
/// G-code for each level is derived on request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    parameters: GenerationParameters,
    grid: SampleGrid,
    points: PointsByLevel,
}

impl GenerationResult {
    /// Build a result from already classified points
    pub fn new(parameters: GenerationParameters, grid: SampleGrid, points: PointsByLevel) -> Self {
        Self {
            parameters,
            grid,
            points,
        }
    }

    /// Parameters used for this run
    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    /// Grid the image was sampled on
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Points bucketed by level
    pub fn points(&self) -> &PointsByLevel {
        &self.points
    }

    /// Number of levels
    pub fn level_count(&self) -> usize {
        self.points.level_count()
    }

    /// G-code for a single level
    pub fn document(&self, level: usize) -> CamToolResult<GcodeDocument> {
        let points = self
            .points
            .level(level)
            .ok_or(CamToolError::LevelOutOfRange {
                level,
                levels: self.level_count(),
            })?;
        Ok(PointToolpathGenerator::new(&self.parameters).generate(level, points))
    }

    /// G-code for every level, in level order
    pub fn documents(&self) -> Vec<GcodeDocument> {
        let generator = PointToolpathGenerator::new(&self.parameters);
        self.points
            .iter()
            .map(|(level, points)| generator.generate(level, points))
            .collect()
    }

    /// G-code for every level, generated in parallel
    ///
    /// Produces the same documents as [`GenerationResult::documents`].
    pub fn documents_parallel(&self) -> Vec<GcodeDocument> {
        let generator = PointToolpathGenerator::new(&self.parameters);
        self.points
            .levels()
            .par_iter()
            .enumerate()
            .map(|(level, points)| generator.generate(level, points))
            .collect()
    }
}
