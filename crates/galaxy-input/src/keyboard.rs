//! Frame-coherent keyboard state tracker.
//!
//! Keys are identified by physical [`KeyCode`] so WASD flight works the same
//! on every layout.

use rustc_hash::FxHashSet;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Held keys plus this frame's press/release edges.
///
/// Call [`clear_transients`](Self::clear_transients) once per tick after every
/// consumer has read the edges.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: FxHashSet<KeyCode>,
    just_pressed: FxHashSet<KeyCode>,
    just_released: FxHashSet<KeyCode>,
}

impl KeyboardState {
    /// Creates a state with no keys pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key transition. Auto-repeat presses are ignored.
    ///
    /// Returns `true` when the event changed the held set, i.e. it was a real
    /// edge rather than a repeat or a release of a key that was never down.
    pub fn process(&mut self, key: KeyCode, state: ElementState, repeat: bool) -> bool {
        if repeat {
            return false;
        }
        match state {
            ElementState::Pressed => {
                let edge = self.pressed.insert(key);
                if edge {
                    self.just_pressed.insert(key);
                }
                edge
            }
            ElementState::Released => {
                let edge = self.pressed.remove(&key);
                if edge {
                    self.just_released.insert(key);
                }
                edge
            }
        }
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Returns `true` while any of `keys` is held.
    #[must_use]
    pub fn any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.pressed.contains(k))
    }

    /// Returns `true` only during the frame the key went down.
    #[must_use]
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Returns `true` only during the frame the key came up.
    #[must_use]
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.just_released.contains(&key)
    }

    /// Either shift key is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.any_pressed(&[KeyCode::ShiftLeft, KeyCode::ShiftRight])
    }

    /// Releases every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.just_released.extend(self.pressed.drain());
    }

    /// Clears press/release edges. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
