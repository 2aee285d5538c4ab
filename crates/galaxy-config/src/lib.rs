//! Configuration system for the galaxy simulation.
//!
//! Settings persist to disk as RON. Every section carries `#[serde(default)]`
//! so a partial file, or one written by an older build, still loads. CLI
//! values override whatever the file says.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, FlightConfig, PerformanceConfig, WeaponsConfig,
    WindowConfig, WorldConfig, default_config_dir,
};
pub use error::ConfigError;
