//! stipplekit CLI - image to point plotting G-code
//!
//! Samples an image on a grid over the plotter area and writes one G-code
//! program per brightness level.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use stipplekit::cli::{Cli, Commands, GenerateArgs};
use stipplekit::export::{write_documents, write_preview};
use stipplekit::init_logging;
use stipplekit_camtools::preview::render_points_preview;
use stipplekit_camtools::{PreviewOptions, StippleEngraver};
use stipplekit_settings::Config;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    match cli.command {
        Commands::Generate(args) => generate(args)?,
        Commands::InitConfig { file } => init_config(&file)?,
        Commands::ShowConfig { config } => show_config(config.as_deref())?,
    }

    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let mut config =
        Config::load_or_default(args.config.as_deref()).context("Failed to load settings")?;
    args.apply_overrides(&mut config);

    let params = config
        .generation
        .to_parameters()
        .context("Invalid generation parameters")?;

    let engraver = StippleEngraver::from_file(&args.image, params)?;
    let result = engraver.generate()?;

    let preview = match &args.preview {
        Some(path) => {
            let options = PreviewOptions {
                pixels_per_mm: config.preview.pixels_per_mm,
                dot_diameter: config.preview.dot_diameter,
            };
            Some((path, render_points_preview(&result, &options)?))
        }
        None => None,
    };

    let documents = if args.parallel {
        result.documents_parallel()
    } else {
        result.documents()
    };
    let written = write_documents(&args.out_dir, &documents)?;
    if let Some((path, image)) = preview {
        write_preview(path, &image)?;
    }

    for (path, count) in written.iter().zip(result.points().counts()) {
        println!("{}\t{} points", path.display(), count);
    }
    Ok(())
}

fn init_config(file: &Path) -> Result<()> {
    Config::default()
        .save_to_file(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    info!("Default settings written to {}", file.display());
    Ok(())
}

fn show_config(path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(path).context("Failed to load settings")?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
