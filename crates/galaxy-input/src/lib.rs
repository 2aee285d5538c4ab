//! Raw input state: keyboard, pointer and touch, fed by typed input events.
//!
//! Nothing here knows about ships or cameras. The flight controller reads the
//! frame state and the engine clears transients at the end of each tick.

pub mod event;
pub mod keyboard;
pub mod mouse;
pub mod touch;

pub use event::{InputEvent, InputState};
pub use keyboard::KeyboardState;
pub use mouse::MouseState;
pub use touch::TouchState;
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
