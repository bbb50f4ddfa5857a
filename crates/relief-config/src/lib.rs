//! Configuration for the relief heightmap generator.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and are checked for changes on reload. Unknown fields are
//! ignored and missing ones fall back to defaults, so older and newer config
//! files both load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, GenerationConfig, OutputConfig, default_config_dir};
pub use error::ConfigError;
