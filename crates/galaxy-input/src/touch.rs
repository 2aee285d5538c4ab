//! Single-finger look tracking for touch screens.

use glam::Vec2;

/// Follows one touch point and accumulates its motion.
///
/// A second finger is ignored until the tracked one lifts.
#[derive(Debug, Clone, Default)]
pub struct TouchState {
    active: Option<(u64, Vec2)>,
    delta: Vec2,
}

impl TouchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(&mut self, id: u64, position: Vec2) {
        if self.active.is_none() {
            self.active = Some((id, position));
        }
    }

    pub fn on_move(&mut self, id: u64, position: Vec2) {
        if let Some((active_id, last)) = self.active.as_mut()
            && *active_id == id
        {
            self.delta += position - *last;
            *last = position;
        }
    }

    pub fn on_end(&mut self, id: u64) {
        if matches!(self.active, Some((active_id, _)) if active_id == id) {
            self.active = None;
        }
    }

    /// Motion accumulated since the last clear.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    #[must_use]
    pub fn is_touching(&self) -> bool {
        self.active.is_some()
    }

    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_accumulates_from_start() {
        let mut t = TouchState::new();
        t.on_start(1, Vec2::new(10.0, 10.0));
        t.on_move(1, Vec2::new(15.0, 8.0));
        t.on_move(1, Vec2::new(20.0, 8.0));
        assert_eq!(t.delta(), Vec2::new(10.0, -2.0));
    }

    #[test]
    fn test_other_fingers_ignored() {
        let mut t = TouchState::new();
        t.on_start(1, Vec2::ZERO);
        t.on_start(2, Vec2::new(50.0, 50.0));
        t.on_move(2, Vec2::new(90.0, 90.0));
        assert_eq!(t.delta(), Vec2::ZERO);
        t.on_end(2);
        assert!(t.is_touching());
    }

    #[test]
    fn test_end_stops_tracking() {
        let mut t = TouchState::new();
        t.on_start(1, Vec2::ZERO);
        t.on_end(1);
        t.on_move(1, Vec2::new(5.0, 5.0));
        assert!(!t.is_touching());
        assert_eq!(t.delta(), Vec2::ZERO);
    }
}
