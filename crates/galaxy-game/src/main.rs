//! Headless galaxy runner.
//!
//! Loads the config, assembles the world and runs the engine at the fixed
//! step for a number of simulated seconds. `--demo` flies to the first
//! signboard and shoots it.
//!
//! Run with: `cargo run -p galaxy-game -- --seconds 20 --demo`

mod demo;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use galaxy_app::{AppError, Engine, GameLoop, World};
use galaxy_config::{CliArgs, Config, default_config_dir};
use galaxy_events::GalaxyEvent;

use crate::demo::Demo;

/// Simulated seconds when `--seconds` is not given.
const DEFAULT_SECONDS: f32 = 10.0;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("galaxy: failed to start: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;

    galaxy_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );
    info!(config = %config_dir.display(), seed = config.world.seed, "Galaxy runner starting");

    let world = World::build(&config)?;
    let mut engine = Engine::new(&config, world);
    let mut demo = args.demo.then(Demo::new);
    let verbose = args.demo;
    let log_events = config.debug.log_events;

    let seconds = args.seconds.unwrap_or(DEFAULT_SECONDS);
    let mut game_loop = GameLoop::new();
    game_loop.run_for(f64::from(seconds), &mut engine, |engine| {
        if let Some(demo) = demo.as_mut() {
            demo.step(engine);
        }
        // Everything sent since the last swap, before the tick swaps it out.
        report_events(engine, verbose, log_events);
    });
    report_events(&engine, verbose, log_events);

    let stats = engine.weapons().stats();
    info!(
        frames = engine.frame_count(),
        elapsed = engine.elapsed(),
        faults = engine.faults(),
        real_seconds = engine.real_time(),
        fps = engine.perf().fps(),
        active_lasers = stats.active_lasers,
        active_projectiles = stats.active_projectiles,
        fallback_allocations = stats.fallback_allocations,
        "Galaxy runner finished"
    );
    Ok(())
}

fn report_events(engine: &Engine, verbose: bool, log_events: bool) {
    if !verbose && !log_events {
        return;
    }
    for event in engine.events().read_current() {
        if verbose {
            info!(event = %describe(event), "event");
        } else {
            debug!(?event, "event");
        }
    }
}

/// One-line summary of an event; payloads are shortened to their title.
fn describe(event: &GalaxyEvent) -> String {
    match event {
        GalaxyEvent::PanelToggleRequested { target, payload, .. } => {
            format!("PanelToggleRequested {{ target: {target}, title: {:?} }}", payload.title)
        }
        other => format!("{other:?}"),
    }
}
