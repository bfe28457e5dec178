//! StippleKit Settings Crate
//!
//! Handles application configuration: defaults, JSON/TOML persistence and
//! validation.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, GenerationSettings, PlotterPreset, PreviewSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
