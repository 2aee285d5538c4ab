//! Data-driven 3D signboards.
//!
//! Each board is built from a [`SignboardConfig`] merged over defaults and
//! carries a face, text layout, optional border/glow/stand, a shootable
//! [`HitTarget`] marker and escort drones on cables. The
//! [`SignboardSystem`] animates the boards, toggles their content panels and
//! lends its targets to the weapon system through
//! [`TargetRegistry`](galaxy_weapons::TargetRegistry).

pub mod board;
pub mod config;
pub mod decor;
mod error;
pub mod panel;
pub mod signboard;
pub mod system;
pub mod target;

pub use board::BoardVisual;
pub use config::{SignboardConfig, TargetOrient};
pub use decor::{Cable, Decor, Drone};
pub use error::SignboardError;
pub use panel::Panel;
pub use signboard::Signboard;
pub use system::SignboardSystem;
pub use target::HitTarget;
