//! Galaxy application core.
//!
//! Assembles the world, owns every subsystem in the [`Engine`] and drives
//! its tick from a fixed-timestep [`GameLoop`].

pub mod engine;
mod error;
pub mod game_loop;
pub mod world;

pub use engine::{Engine, FrameRecord, HIT_SHAKE, PLANET_APPROACH, SIGNBOARD_APPROACH};
pub use error::{AppError, FrameError, Stage};
pub use game_loop::{FIXED_DT, GameLoop, MAX_FRAME_TIME};
pub use world::{SHIP_START, World};
