//! Eased point-to-point camera moves advanced by frame delta.
//!
//! A tween replaces a wall-clock animation: it is stepped once per tick with
//! that tick's delta, so replaying the same delta sequence replays the move.

use glam::Vec3;

use galaxy_math::Easing;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTween {
    pub from: Vec3,
    pub to: Vec3,
    /// Total duration in seconds.
    pub duration: f32,
    /// Seconds advanced so far (0..=duration).
    pub elapsed: f32,
    pub easing: Easing,
}

impl CameraTween {
    /// Creates a tween. A non-positive duration completes on the first step.
    #[must_use]
    pub fn new(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Eased point at the current progress.
    #[must_use]
    pub fn value(&self) -> Vec3 {
        self.from.lerp(self.to, self.easing.apply(self.progress()))
    }

    /// Advances by `dt` and returns the new point. The final step lands
    /// exactly on `to`.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.is_finished() {
            self.to
        } else {
            self.value()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tween(easing: Easing) -> CameraTween {
        CameraTween::new(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 2.0, easing)
    }

    #[test]
    fn test_starts_at_from() {
        let t = tween(Easing::Linear);
        assert_eq!(t.value(), Vec3::ZERO);
        assert!(!t.is_finished());
    }

    #[test]
    fn test_linear_midpoint() {
        let mut t = tween(Easing::Linear);
        let p = t.advance(1.0);
        assert!((p.x - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_cubic_midpoint_is_symmetric() {
        let mut t = tween(Easing::EaseInOutCubic);
        let quarter = t.advance(0.5).x;
        assert!(quarter < 25.0);
        let half = t.advance(0.5).x;
        assert!((half - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_ends_exactly_on_target() {
        let mut t = tween(Easing::EaseInOutQuad);
        for _ in 0..200 {
            t.advance(1.0 / 60.0);
        }
        assert!(t.is_finished());
        assert_eq!(t.advance(1.0 / 60.0), Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut t = CameraTween::new(Vec3::ZERO, Vec3::ONE, 0.0, Easing::Linear);
        assert!(t.is_finished());
        assert_eq!(t.advance(0.0), Vec3::ONE);
    }

    #[test]
    fn test_negative_delta_does_not_rewind() {
        let mut t = tween(Easing::Linear);
        t.advance(1.0);
        t.advance(-5.0);
        assert!((t.elapsed - 1.0).abs() < 1e-6);
    }
}
