//! Frame-coherent pointer state tracker.
//!
//! While the pointer is captured (mouse-flight), only raw motion deltas count;
//! otherwise deltas are differences between successive cursor positions.

use glam::Vec2;
use winit::event::{ElementState, MouseButton};

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
}

fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => 3,
    }
}

/// Pointer position, motion and buttons for the current frame.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    delta: Vec2,
    buttons: [ButtonFrame; 4],
    captured: bool,
}

impl MouseState {
    /// Creates a pointer state with nothing held and no known position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Event handlers ──

    /// Absolute cursor position in viewport pixels.
    ///
    /// The first report only seeds the position so a cursor entering the
    /// viewport does not produce a jump.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        let new_pos = Vec2::new(x, y);
        if !self.captured
            && let Some(prev) = self.position
        {
            self.delta += new_pos - prev;
        }
        self.position = Some(new_pos);
    }

    /// Relative motion reported while the pointer is captured.
    pub fn on_raw_motion(&mut self, dx: f32, dy: f32) {
        if self.captured {
            self.delta += Vec2::new(dx, dy);
        }
    }

    /// Button transition.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let b = &mut self.buttons[button_index(button)];
        match state {
            ElementState::Pressed => {
                b.pressed = true;
                b.just_pressed = true;
            }
            ElementState::Released => {
                b.pressed = false;
                b.just_released = true;
            }
        }
    }

    /// Acquires or releases exclusive pointer capture.
    ///
    /// Takes effect immediately; any delta gathered under the previous mode is
    /// discarded so the first captured frame starts clean.
    pub fn set_captured(&mut self, captured: bool) {
        if self.captured != captured {
            self.delta = Vec2::ZERO;
        }
        self.captured = captured;
    }

    /// Clears per-frame transients: delta and button edges.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        for b in &mut self.buttons {
            b.just_pressed = false;
            b.just_released = false;
        }
    }

    // ── Queries ──

    /// Last known cursor position.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Motion accumulated since the last clear. +y is screen-down.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].pressed
    }

    #[must_use]
    pub fn just_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].just_pressed
    }

    #[must_use]
    pub fn just_button_released(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].just_released
    }

    /// Whether the pointer is captured for mouse-flight.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }
}
