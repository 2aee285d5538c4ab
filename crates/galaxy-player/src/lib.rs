//! The player's ship, the camera that follows it, and the flight controller
//! that turns input into motion.

pub mod autopilot;
pub mod camera;
pub mod camera_tween;
pub mod flight;
pub mod spaceship;

pub use autopilot::{Autopilot, AutopilotStep};
pub use camera::{CameraController, CameraShake};
pub use camera_tween::CameraTween;
pub use flight::{ControlCommand, FlightController};
pub use spaceship::{EngineGlow, Spaceship};
