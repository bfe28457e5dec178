use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use stipplekit_camtools::toolpath::{document_line_count, machine_to_plotter_y, FIXED_LINE_COUNT};
use stipplekit_camtools::{CamToolError, StippleEngraver};
use stipplekit_core::{GenerationParameters, ParameterError, PlotterDimensions, PlotterSize};

fn uniform_gray(width: u32, height: u32, value: u8) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
}

fn a4_params(grid_size: f64, num_layers: u32) -> GenerationParameters {
    GenerationParameters {
        dimensions: PlotterSize::A4.dimensions().unwrap(),
        num_layers,
        grid_size,
        z_point: 0.0,
        z_travel: 5.0,
        feed_rate_xy: 3000.0,
        feed_rate_z: 500.0,
    }
}

#[test]
fn test_mid_gray_fills_middle_level() {
    let engraver = StippleEngraver::from_image(uniform_gray(64, 64, 128), a4_params(10.0, 3));
    let result = engraver.generate().unwrap();

    assert_eq!(result.grid().cols, 21);
    assert_eq!(result.grid().rows, 29);
    assert_eq!(result.points().counts(), vec![0, 609, 0]);

    let docs = result.documents();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[0].len(), FIXED_LINE_COUNT);
    assert_eq!(docs[1].len(), 1835);
    assert_eq!(docs[2].len(), FIXED_LINE_COUNT);

    // First point is the top-left cell center, flipped onto machine Y
    assert_eq!(docs[1].lines()[4], "G00 X5.000 Y342.000 F3000 ; Move to point");
    // Last point is the bottom-right cell center
    let last_move = &docs[1].lines()[docs[1].len() - 7];
    assert_eq!(last_move, "G00 X205.000 Y62.000 F3000 ; Move to point");
}

#[test]
fn test_single_layer_collects_everything() {
    let mut rgb = RgbImage::new(32, 32);
    for (x, y, p) in rgb.enumerate_pixels_mut() {
        *p = Rgb([(x * 8) as u8, (y * 8) as u8, 40]);
    }
    let params = GenerationParameters {
        dimensions: PlotterDimensions::new(100.0, 80.0).unwrap(),
        num_layers: 1,
        grid_size: 7.0,
        ..Default::default()
    };
    let result = StippleEngraver::from_image(DynamicImage::ImageRgb8(rgb), params)
        .generate()
        .unwrap();

    let cells = result.grid().len();
    assert_eq!(cells, 14 * 11);
    assert_eq!(result.points().counts(), vec![cells]);
    assert_eq!(result.document(0).unwrap().len(), document_line_count(cells));
}

#[test]
fn test_grid_larger_than_area_gives_empty_documents() {
    let params = GenerationParameters {
        dimensions: PlotterDimensions::new(40.0, 30.0).unwrap(),
        num_layers: 4,
        grid_size: 50.0,
        ..Default::default()
    };
    let result = StippleEngraver::from_image(uniform_gray(10, 10, 0), params)
        .generate()
        .unwrap();

    assert_eq!(result.points().total_points(), 0);
    for doc in result.documents() {
        assert_eq!(doc.len(), FIXED_LINE_COUNT);
    }
}

#[test]
fn test_every_cell_lands_in_exactly_one_level() {
    let mut img = GrayImage::new(97, 61);
    for (x, y, p) in img.enumerate_pixels_mut() {
        *p = Luma([((x * 7 + y * 13) % 256) as u8]);
    }
    let params = GenerationParameters {
        dimensions: PlotterDimensions::new(297.0, 420.0).unwrap(),
        num_layers: 6,
        grid_size: 4.5,
        ..Default::default()
    };
    let result = StippleEngraver::from_image(DynamicImage::ImageLuma8(img), params)
        .generate()
        .unwrap();

    let counts = result.points().counts();
    assert_eq!(counts.len(), 6);
    assert_eq!(counts.iter().sum::<usize>(), result.grid().len());

    for (level, points) in result.points().iter() {
        let doc = result.document(level).unwrap();
        assert_eq!(doc.len(), document_line_count(points.len()));
    }
}

#[test]
fn test_generation_is_deterministic() {
    let mut img = GrayImage::new(40, 50);
    for (x, y, p) in img.enumerate_pixels_mut() {
        *p = Luma([((x ^ y) * 5 % 256) as u8]);
    }
    let engraver = StippleEngraver::from_image(DynamicImage::ImageLuma8(img), a4_params(6.0, 5));

    let first: Vec<String> = engraver
        .generate()
        .unwrap()
        .documents()
        .iter()
        .map(|d| d.to_text())
        .collect();
    let second: Vec<String> = engraver
        .generate()
        .unwrap()
        .documents_parallel()
        .iter()
        .map(|d| d.to_text())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_emitted_y_maps_back_to_plotter() {
    let params = a4_params(10.0, 1);
    let height = params.dimensions.height;
    let result = StippleEngraver::from_image(uniform_gray(8, 8, 0), params)
        .generate()
        .unwrap();
    let doc = result.document(0).unwrap();
    let points = result.points().level(0).unwrap();

    for (k, point) in points.iter().enumerate() {
        let line = &doc.lines()[4 + k * 3];
        let y_word = line
            .split_whitespace()
            .find(|w| w.starts_with('Y'))
            .unwrap();
        let machine_y: f64 = y_word[1..].parse().unwrap();
        assert!((machine_to_plotter_y(machine_y, height) - point.y).abs() < 1e-3);
    }
}

#[test]
fn test_image_is_checked_before_parameters() {
    let mut params = a4_params(10.0, 3);
    params.grid_size = -1.0;
    let engraver = StippleEngraver::new(params);
    assert!(matches!(engraver.generate(), Err(CamToolError::MissingImage)));
}

#[test]
fn test_tiny_grid_spacing_is_rejected() {
    let engraver = StippleEngraver::from_image(uniform_gray(8, 8, 0), a4_params(1e-9, 3));
    assert!(matches!(
        engraver.generate(),
        Err(CamToolError::InvalidParameters(ParameterError::InvalidValue { .. }))
    ));
}

#[test]
fn test_oversized_inputs_are_rejected_before_allocating() {
    let engraver = StippleEngraver::from_image(uniform_gray(8, 8, 0), a4_params(10.0, u32::MAX));
    assert!(matches!(
        engraver.generate(),
        Err(CamToolError::InvalidParameters(ParameterError::TooLarge { .. }))
    ));

    let params = GenerationParameters {
        dimensions: PlotterDimensions {
            width: 1e9,
            height: 1e9,
        },
        ..a4_params(10.0, 3)
    };
    let engraver = StippleEngraver::from_image(uniform_gray(8, 8, 0), params);
    assert!(matches!(
        engraver.generate(),
        Err(CamToolError::InvalidParameters(ParameterError::TooLarge { .. }))
    ));
}

#[test]
fn test_missing_file_is_load_error() {
    let result = StippleEngraver::from_file("does/not/exist.png", a4_params(10.0, 3));
    assert!(matches!(result, Err(CamToolError::LoadError(_))));
}

#[test]
fn test_points_serialize_by_level() {
    let params = GenerationParameters {
        dimensions: PlotterDimensions::new(20.0, 10.0).unwrap(),
        num_layers: 2,
        grid_size: 10.0,
        ..Default::default()
    };
    let result = StippleEngraver::from_image(uniform_gray(4, 4, 255), params)
        .generate()
        .unwrap();

    let json = serde_json::to_value(result.points()).unwrap();
    let levels = json["levels"].as_array().unwrap();
    assert_eq!(levels.len(), 2);
    assert!(levels[0].as_array().unwrap().is_empty());
    assert_eq!(levels[1][0]["x"], 5.0);
    assert_eq!(levels[1][1]["x"], 15.0);
    assert_eq!(levels[1][1]["brightness"], 100.0);
}
