//! Typed raw input events and the aggregate frame state they update.

use glam::Vec2;
use tracing::trace;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use crate::{KeyboardState, MouseState, TouchState};

/// A raw input event as delivered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key {
        key: KeyCode,
        state: ElementState,
        repeat: bool,
    },
    /// Absolute cursor position in viewport pixels.
    PointerMoved { x: f32, y: f32 },
    /// Relative motion while the pointer is captured.
    PointerMotion { dx: f32, dy: f32 },
    PointerButton {
        button: MouseButton,
        state: ElementState,
    },
    TouchStart { id: u64, x: f32, y: f32 },
    TouchMove { id: u64, x: f32, y: f32 },
    TouchEnd { id: u64 },
    /// The viewport lost focus; every held key is released.
    FocusLost,
    Resized { width: u32, height: u32 },
}

impl InputEvent {
    /// Key press shorthand.
    #[must_use]
    pub fn key_down(key: KeyCode) -> Self {
        Self::Key {
            key,
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// Key release shorthand.
    #[must_use]
    pub fn key_up(key: KeyCode) -> Self {
        Self::Key {
            key,
            state: ElementState::Released,
            repeat: false,
        }
    }

    /// Button press shorthand.
    #[must_use]
    pub fn button_down(button: MouseButton) -> Self {
        Self::PointerButton {
            button,
            state: ElementState::Pressed,
        }
    }

    /// Button release shorthand.
    #[must_use]
    pub fn button_up(button: MouseButton) -> Self {
        Self::PointerButton {
            button,
            state: ElementState::Released,
        }
    }
}

/// Keyboard, pointer and touch state for one frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub touch: TouchState,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into the frame state.
    ///
    /// Returns `true` when the event was a key edge, the only case callers
    /// react to immediately (bindings fire on key-down, not per tick).
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key { key, state, repeat } => {
                let edge = self.keyboard.process(key, state, repeat);
                trace!(?key, ?state, edge, "key");
                edge
            }
            InputEvent::PointerMoved { x, y } => {
                self.mouse.on_cursor_moved(x, y);
                false
            }
            InputEvent::PointerMotion { dx, dy } => {
                self.mouse.on_raw_motion(dx, dy);
                false
            }
            InputEvent::PointerButton { button, state } => {
                self.mouse.on_button(button, state);
                false
            }
            InputEvent::TouchStart { id, x, y } => {
                self.touch.on_start(id, Vec2::new(x, y));
                false
            }
            InputEvent::TouchMove { id, x, y } => {
                self.touch.on_move(id, Vec2::new(x, y));
                false
            }
            InputEvent::TouchEnd { id } => {
                self.touch.on_end(id);
                false
            }
            InputEvent::FocusLost => {
                self.keyboard.release_all();
                false
            }
            InputEvent::Resized { .. } => false,
        }
    }

    /// Drops this frame's edges and deltas.
    pub fn clear_transients(&mut self) {
        self.keyboard.clear_transients();
        self.mouse.clear_transients();
        self.touch.clear_transients();
    }
}
