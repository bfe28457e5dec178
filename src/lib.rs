//! # StippleKit
//!
//! Converts raster images into point plotting G-code, one program per
//! brightness level, for pen and engraving plotters that mark discrete dots.
//!
//! ## Architecture
//!
//! StippleKit is organized as a workspace with multiple crates:
//!
//! 1. **stipplekit-core** - Plotter dimensions, generation parameters, errors
//! 2. **stipplekit-camtools** - Sampling, level classification, toolpaths, preview
//! 3. **stipplekit-settings** - Configuration defaults and JSON/TOML files
//! 4. **stipplekit** - Command line binary, logging and artifact export

pub mod cli;
pub mod export;

pub use stipplekit_camtools::{
    CamToolError, GcodeDocument, GenerationResult, PointsByLevel, PreviewOptions, StippleEngraver,
};
pub use stipplekit_core::{
    Error, GenerationParameters, PlotterDimensions, PlotterSize, Result, SampledPoint,
};
pub use stipplekit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, keeping stdout free for command output
/// - RUST_LOG environment variable support (INFO by default)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
