//! Image Sampler
//!
//! Resamples an image onto a physical grid laid over the plotter work area and
//! reads one brightness value per grid cell.
//!
//! The source image is first scale-copied to exactly one pixel per millimeter
//! of plotter area and converted to grayscale ([`prepare_image`]). Each cell
//! center is then mapped linearly into that image and the nearest pixel is read.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma};
use serde::Serialize;
use stipplekit_core::{PlotterDimensions, SampledPoint, MAX_SAMPLE_POINTS};

/// Grid of sample cells over the plotter area
///
/// `cols = floor(width / spacing)` and `rows = floor(height / spacing)`. A
/// spacing larger than a side gives zero cells along it, which is valid and
/// simply yields no samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleGrid {
    /// Number of columns (X)
    pub cols: usize,
    /// Number of rows (Y)
    pub rows: usize,
    /// Distance between adjacent cell centers (mm)
    pub spacing: f64,
    /// Plotter area the grid covers
    pub dimensions: PlotterDimensions,
}

impl SampleGrid {
    /// Lay a grid with the given spacing over the plotter area
    pub fn new(dimensions: PlotterDimensions, spacing: f64) -> Self {
        let count = |extent: f64| {
            let n = (extent / spacing).floor();
            if n.is_finite() && n > 0.0 {
                n as usize
            } else {
                0
            }
        };

        Self {
            cols: count(dimensions.width),
            rows: count(dimensions.height),
            spacing,
            dimensions,
        }
    }

    /// Total number of cells, saturating at `usize::MAX`
    pub fn len(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    /// True when the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plotter-space center of cell `(i, j)`
    pub fn cell_center(&self, i: usize, j: usize) -> (f64, f64) {
        let half = self.spacing / 2.0;
        (
            i as f64 * self.spacing + half,
            j as f64 * self.spacing + half,
        )
    }
}

/// Per-pixel brightness lookup
///
/// Brightness is reported on a 0 to 100 scale.
pub trait BrightnessSource {
    /// Width and height in pixels
    fn pixel_dimensions(&self) -> (u32, u32);

    /// Brightness of the pixel at `(x, y)`; callers keep coordinates in bounds
    fn brightness_at(&self, x: u32, y: u32) -> f64;
}

impl BrightnessSource for GrayImage {
    fn pixel_dimensions(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn brightness_at(&self, x: u32, y: u32) -> f64 {
        luma_to_brightness(self.get_pixel(x, y).0[0])
    }
}

/// Convert an 8-bit gray value to brightness in `[0, 100]`
///
/// A gray pixel has equal channels, so its HSB brightness (the maximum
/// channel) is the luma value itself.
pub fn luma_to_brightness(luma: u8) -> f64 {
    f64::from(luma) / 255.0 * 100.0
}

/// Scale-copy an image to the plotter area and convert it to grayscale
///
/// The result has one pixel per millimeter (fractional sizes are truncated,
/// with a minimum of one pixel per side). Nearest-neighbour sampling is used
/// and luma follows Rec. 709 weights, rounded to the nearest gray value.
pub fn prepare_image(source: &DynamicImage, dimensions: &PlotterDimensions) -> GrayImage {
    let width = pixel_extent(dimensions.width);
    let height = pixel_extent(dimensions.height);
    let rgb = source
        .resize_exact(width, height, FilterType::Nearest)
        .to_rgb8();

    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([rec709_luma(r, g, b)])
    })
}

/// Rec. 709 luma of an RGB pixel, rounded half to even
pub fn rec709_luma(r: u8, g: u8, b: u8) -> u8 {
    let luma = 0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b);
    luma.round_ties_even().clamp(0.0, 255.0) as u8
}

fn pixel_extent(mm: f64) -> u32 {
    let px = mm.floor();
    if px.is_finite() && px >= 1.0 {
        px.min(u32::MAX as f64) as u32
    } else {
        1
    }
}

/// Map a plotter coordinate to a pixel index, clamped into `[0, pixels - 1]`
pub fn plotter_to_pixel(coord: f64, extent: f64, pixels: u32) -> u32 {
    if pixels == 0 {
        return 0;
    }
    let index = (coord / extent * f64::from(pixels)).floor();
    index.clamp(0.0, f64::from(pixels - 1)) as u32
}

/// Sample every grid cell in row-major order
///
/// Rows are scanned top to bottom and each row left to right, producing
/// exactly `grid.len()` points. An image with no pixels reads as black.
pub fn sample_grid<S: BrightnessSource + ?Sized>(
    source: &S,
    grid: &SampleGrid,
) -> Vec<SampledPoint> {
    let (img_w, img_h) = source.pixel_dimensions();
    let dims = grid.dimensions;
    let capacity = grid.len().min(MAX_SAMPLE_POINTS as usize);
    let mut samples = Vec::with_capacity(capacity);

    for j in 0..grid.rows {
        for i in 0..grid.cols {
            let (x, y) = grid.cell_center(i, j);
            let brightness = if img_w == 0 || img_h == 0 {
                0.0
            } else {
                let px = plotter_to_pixel(x, dims.width, img_w);
                let py = plotter_to_pixel(y, dims.height, img_h);
                source.brightness_at(px, py)
            };
            samples.push(SampledPoint::new(x, y, brightness));
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn dims(width: f64, height: f64) -> PlotterDimensions {
        PlotterDimensions::new(width, height).unwrap()
    }

    #[test]
    fn test_grid_counts() {
        let grid = SampleGrid::new(dims(210.0, 297.0), 10.0);
        assert_eq!(grid.cols, 21);
        assert_eq!(grid.rows, 29);
        assert_eq!(grid.len(), 609);
        assert_eq!(grid.cell_center(0, 0), (5.0, 5.0));
        assert_eq!(grid.cell_center(20, 28), (205.0, 285.0));
    }

    #[test]
    fn test_degenerate_grid() {
        let grid = SampleGrid::new(dims(20.0, 30.0), 25.0);
        assert_eq!(grid.cols, 0);
        assert_eq!(grid.rows, 1);
        assert!(grid.is_empty());

        let gray = GrayImage::new(20, 30);
        assert!(sample_grid(&gray, &grid).is_empty());
    }

    #[test]
    fn test_luma_to_brightness_range() {
        assert_eq!(luma_to_brightness(0), 0.0);
        assert_eq!(luma_to_brightness(255), 100.0);
        let mid = luma_to_brightness(128);
        assert!(mid > 50.0 && mid < 50.3);
    }

    #[test]
    fn test_plotter_to_pixel_clamps() {
        assert_eq!(plotter_to_pixel(5.0, 10.0, 10), 5);
        assert_eq!(plotter_to_pixel(10.0, 10.0, 10), 9);
        assert_eq!(plotter_to_pixel(-1.0, 10.0, 10), 0);
        assert_eq!(plotter_to_pixel(3.0, 10.0, 0), 0);
    }

    #[test]
    fn test_row_major_order() {
        // Left half black, right half white
        let mut gray = GrayImage::new(20, 20);
        for (x, _, p) in gray.enumerate_pixels_mut() {
            *p = if x < 10 { Luma([0]) } else { Luma([255]) };
        }
        let grid = SampleGrid::new(dims(20.0, 20.0), 10.0);
        let samples = sample_grid(&gray, &grid);

        let coords: Vec<(f64, f64)> = samples.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            coords,
            vec![(5.0, 5.0), (15.0, 5.0), (5.0, 15.0), (15.0, 15.0)]
        );
        let levels: Vec<f64> = samples.iter().map(|p| p.brightness).collect();
        assert_eq!(levels, vec![0.0, 100.0, 0.0, 100.0]);
    }

    #[test]
    fn test_prepare_image_scales_to_plotter_pixels() {
        let mut rgb = RgbImage::new(4, 2);
        for p in rgb.pixels_mut() {
            *p = Rgb([255, 255, 255]);
        }
        let img = DynamicImage::ImageRgb8(rgb);
        let gray = prepare_image(&img, &dims(42.7, 21.2));
        assert_eq!(gray.dimensions(), (42, 21));
        assert!(gray.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_grid_len_saturates() {
        let grid = SampleGrid::new(dims(210.0, 297.0), 1e-9);
        assert_eq!(grid.cols, 210_000_000_000);
        assert_eq!(grid.len(), usize::MAX);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_rec709_luma_rounds() {
        assert_eq!(rec709_luma(0, 0, 0), 0);
        assert_eq!(rec709_luma(255, 255, 255), 255);
        // 0.0722 * 7 = 0.5054
        assert_eq!(rec709_luma(0, 0, 7), 1);
        // 0.2126 * 255 = 54.213
        assert_eq!(rec709_luma(255, 0, 0), 54);
        // 0.7152 * 100 = 71.52
        assert_eq!(rec709_luma(0, 100, 0), 72);
        for v in [1u8, 50, 128, 200, 254] {
            assert_eq!(rec709_luma(v, v, v), v);
        }
    }

    #[test]
    fn test_prepare_image_rounds_luma() {
        let rgb = RgbImage::from_pixel(2, 2, Rgb([0, 100, 0]));
        let gray = prepare_image(&DynamicImage::ImageRgb8(rgb), &dims(2.0, 2.0));
        assert!(gray.pixels().all(|p| p.0[0] == 72));
    }

    #[test]
    fn test_prepare_image_minimum_one_pixel() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(3, 3));
        let gray = prepare_image(&img, &dims(0.5, 0.25));
        assert_eq!(gray.dimensions(), (1, 1));
    }
}
