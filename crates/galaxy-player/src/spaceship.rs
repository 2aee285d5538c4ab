//! The player spaceship: a transform, a visibility flag, and pulsing engine
//! glows.
//!
//! The flight controller is the only writer of the transform; the camera reads
//! it each frame.

use glam::{Quat, Vec3};
use tracing::debug;

use galaxy_math::{EulerAngles, Transform};

/// Engine glow positions in ship space. The ship faces -Z, so the exhausts
/// sit behind it on +Z.
const ENGINE_GLOW_OFFSETS: [Vec3; 2] = [Vec3::new(-2.0, 0.0, 3.5), Vec3::new(2.0, 0.0, 3.5)];

/// Animated state of one exhaust glow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineGlow {
    /// Position in ship space.
    pub offset: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

impl EngineGlow {
    fn at(offset: Vec3) -> Self {
        Self {
            offset,
            scale: 1.0,
            opacity: 0.7,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Spaceship {
    transform: Transform,
    visible: bool,
    engine_glows: Vec<EngineGlow>,
}

impl Default for Spaceship {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Spaceship {
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        debug!(?position, "Spaceship created");
        Self {
            transform: Transform::from_position(position),
            visible: true,
            engine_glows: ENGINE_GLOW_OFFSETS.iter().copied().map(EngineGlow::at).collect(),
        }
    }

    /// Pulses the engine glows. `elapsed` is total simulated time in seconds.
    pub fn update(&mut self, _dt: f32, elapsed: f32) {
        for (index, glow) in self.engine_glows.iter_mut().enumerate() {
            let pulse = (elapsed * 10.0 + index as f32).sin() * 0.2 + 0.8;
            glow.scale = pulse;
            glow.opacity = 0.5 + pulse * 0.3;
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.transform.translate(delta);
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation.normalize();
    }

    /// Turns the nose toward `target`. Returns `false` when the target is the
    /// ship's own position.
    pub fn look_at(&mut self, target: Vec3) -> bool {
        self.transform.look_at(target, Vec3::Y)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    /// Current orientation as YXZ Euler angles.
    #[must_use]
    pub fn euler(&self) -> EulerAngles {
        EulerAngles::from_quat(self.transform.rotation)
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.transform.right()
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.transform.up()
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn engine_glows(&self) -> &[EngineGlow] {
        &self.engine_glows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_origin_from_spawn() {
        let mut ship = Spaceship::new(Vec3::new(0.0, 8.0, 300.0));
        assert!(ship.look_at(Vec3::ZERO));
        let expected = (-ship.position()).normalize();
        assert!((ship.forward() - expected).length() < 1e-5);
    }

    #[test]
    fn test_engine_glow_pulse_range() {
        let mut ship = Spaceship::default();
        for step in 0..120 {
            ship.update(1.0 / 60.0, step as f32 / 60.0);
            for glow in ship.engine_glows() {
                assert!((0.599..=1.001).contains(&glow.scale));
                assert!((glow.opacity - (0.5 + glow.scale * 0.3)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_glows_are_desynchronized() {
        let mut ship = Spaceship::default();
        ship.update(0.0, 0.0);
        let glows = ship.engine_glows();
        assert_eq!(glows.len(), 2);
        assert!((glows[0].scale - glows[1].scale).abs() > 1e-3);
        assert!(glows.iter().all(|g| g.offset.z > 0.0));
    }

    #[test]
    fn test_visibility_toggle() {
        let mut ship = Spaceship::default();
        assert!(ship.is_visible());
        ship.set_visible(false);
        assert!(!ship.is_visible());
    }

    #[test]
    fn test_euler_reflects_rotation() {
        let mut ship = Spaceship::default();
        ship.set_rotation(EulerAngles::new(0.5, 0.2, 0.0).to_quat());
        let e = ship.euler();
        assert!((e.yaw - 0.5).abs() < 1e-4);
        assert!((e.pitch - 0.2).abs() < 1e-4);
    }
}
