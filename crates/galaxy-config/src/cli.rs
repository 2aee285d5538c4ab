//! Command-line arguments for the headless galaxy runner.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Galaxy runner arguments.
///
/// Values given here win over `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "galaxy", about = "Headless galaxy flight simulation")]
pub struct CliArgs {
    /// Directory holding `config.ron` (defaults to the platform config dir).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Simulated seconds to run before exiting.
    #[arg(long)]
    pub seconds: Option<f32>,

    /// JSON file describing the signboard scene.
    #[arg(long)]
    pub signboards: Option<PathBuf>,

    /// RON file with profile, skills and projects.
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Seed for every random stream in the world.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fly to the first signboard and shoot its target.
    #[arg(long)]
    pub demo: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref path) = args.signboards {
            self.world.signboards = Some(path.clone());
        }
        if let Some(ref path) = args.content {
            self.world.content = Some(path.clone());
        }
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
