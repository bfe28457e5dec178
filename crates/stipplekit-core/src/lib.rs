//! # StippleKit Core
//!
//! Core types and errors for StippleKit.
//! Provides the plotter and parameter data model shared by the sampling,
//! toolpath and settings crates.

pub mod data;
pub mod error;

pub use data::{
    GenerationParameters, PlotterDimensions, PlotterSize, SampledPoint, MAX_LAYERS,
    MAX_PLOTTER_EXTENT, MAX_SAMPLE_POINTS,
};

pub use error::{Error, ParameterError, ParameterResult, Result};
