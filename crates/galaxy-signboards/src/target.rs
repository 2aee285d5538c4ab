//! Shootable ring marker floating in front of a board.

use glam::{Quat, Vec3};

use galaxy_content::Action;
use galaxy_events::TargetId;
use galaxy_math::{Rgb, Transform};

use crate::config::{SignboardConfig, TargetConfig, TargetOrient, parse_color};
use crate::error::SignboardError;

/// Resting opacity of the ring.
const BASE_OPACITY: f32 = 0.95;
/// Floor of the distance fade.
const MIN_FADE_OPACITY: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct HitTarget {
    pub id: TargetId,
    pub action: Option<Action>,
    pub orient: TargetOrient,
    pub ring_outer: f32,
    pub ring_tube: f32,
    pub color: Rgb,
    pub inner_color: Rgb,
    pub crosshair: Option<Rgb>,
    /// Rest position in board space.
    pub base_position: Vec3,
    /// Current position in board space, including bob.
    pub position: Vec3,
    /// Accumulated spin about the ring axis, radians.
    pub spin: f32,
    /// World-space orientation from the last animation step.
    pub rotation: Quat,
    pub scale: f32,
    pub opacity: f32,
    flash_remaining: f32,
}

impl HitTarget {
    pub fn build(id: TargetId, config: &SignboardConfig) -> Result<Self, SignboardError> {
        let t = &config.target;
        let size = config.size;
        let size_factor = size.width.min(size.height);
        let ring_outer = t.size * size_factor;
        let ring_tube = t.thickness * size_factor;

        let color = match &t.color {
            Some(c) => parse_color("target.color", c)?,
            None => parse_color("border.color", &config.border.color)?,
        };
        let crosshair = match &t.crosshair {
            Some(cross) => Some(match &cross.color {
                Some(c) => parse_color("target.crosshair.color", c)?,
                None => color,
            }),
            None => None,
        };
        let base_position = Vec3::new(
            0.0,
            t.offset_up + size.height * 0.5,
            size.depth / 2.0 + t.offset,
        );

        Ok(Self {
            id,
            action: config.action.clone(),
            orient: t.orient,
            ring_outer,
            ring_tube,
            color,
            inner_color: parse_color("target.innerColor", &t.inner_color)?,
            crosshair,
            base_position,
            position: base_position,
            spin: 0.0,
            rotation: Quat::IDENTITY,
            scale: t.base_scale,
            opacity: BASE_OPACITY,
            flash_remaining: 0.0,
        })
    }

    /// World position given the owning board's transform.
    #[must_use]
    pub fn world_position(&self, board: &Transform) -> Vec3 {
        board.transform_point(self.position)
    }

    /// Spin, pulse, bob, distance fade and orientation for one animation
    /// step of `dt` seconds at time `time`.
    pub fn animate(
        &mut self,
        dt: f32,
        time: f32,
        config: &TargetConfig,
        board: &Transform,
        camera: Vec3,
    ) {
        self.spin += dt * config.spin_speed * 0.8;

        if config.pulse {
            self.scale = config.base_scale + (time * config.pulse_speed).sin() * config.pulse_amplitude;
        }

        if let Some(bob) = config.bob {
            self.position.y = self.base_position.y + (time * bob.speed).sin() * bob.amplitude;
        }

        let world = self.world_position(board);
        if let Some(fade) = config.fade_near {
            let dist = camera.distance(world);
            self.opacity = ((dist - fade.near) / (fade.far - fade.near)).clamp(MIN_FADE_OPACITY, 1.0);
        }

        let spin = Quat::from_rotation_z(self.spin);
        self.rotation = match self.orient {
            TargetOrient::FaceCamera => {
                let to_camera = camera - world;
                let yaw = if to_camera.x == 0.0 && to_camera.z == 0.0 {
                    0.0
                } else {
                    to_camera.x.atan2(to_camera.z)
                };
                Quat::from_rotation_y(yaw) * spin
            }
            TargetOrient::Horizontal => board.rotation * spin,
        };
    }

    pub fn flash(&mut self, seconds: f32) {
        self.flash_remaining = self.flash_remaining.max(seconds);
    }

    pub fn tick_flash(&mut self, dt: f32) {
        self.flash_remaining = (self.flash_remaining - dt).max(0.0);
    }

    #[must_use]
    pub fn is_flashing(&self) -> bool {
        self.flash_remaining > 0.0
    }

    /// Ring color this frame; white while flashing.
    #[must_use]
    pub fn display_color(&self) -> Rgb {
        if self.is_flashing() { Rgb::WHITE } else { self.color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BobConfig, FadeConfig};

    fn target(config: &SignboardConfig) -> HitTarget {
        HitTarget::build(TargetId(0), config).unwrap()
    }

    #[test]
    fn test_marker_sits_above_and_in_front() {
        let t = target(&SignboardConfig::default());
        assert!((t.base_position - Vec3::new(0.0, 3.1, 1.85)).length() < 1e-5);
        assert!((t.ring_outer - 0.6).abs() < 1e-6);
        assert!((t.ring_tube - 0.125).abs() < 1e-6);
        assert_eq!(t.color, "#00d4ff".parse::<Rgb>().unwrap());
    }

    #[test]
    fn test_world_position_follows_board() {
        let t = target(&SignboardConfig::default());
        let board = Transform::from_position(Vec3::new(100.0, 0.0, -50.0));
        let world = t.world_position(&board);
        assert!((world - Vec3::new(100.0, 3.1, -48.15)).length() < 1e-4);
    }

    #[test]
    fn test_spin_and_pulse() {
        let config = SignboardConfig::default();
        let mut t = target(&config);
        t.animate(0.5, 0.0, &config.target, &Transform::default(), Vec3::new(0.0, 0.0, 50.0));
        assert!((t.spin - 0.4).abs() < 1e-6);
        assert!((t.scale - 1.0).abs() < 1e-6);
        let quarter = std::f32::consts::FRAC_PI_4;
        t.animate(0.0, quarter, &config.target, &Transform::default(), Vec3::Z);
        assert!((t.scale - 1.08).abs() < 1e-5);
    }

    #[test]
    fn test_distance_fade_is_clamped() {
        let mut config = SignboardConfig::default();
        config.target.fade_near = Some(FadeConfig::default());
        let mut t = target(&config);
        let board = Transform::default();
        let world = t.world_position(&board);

        t.animate(0.0, 0.0, &config.target, &board, world + Vec3::Z * 5.0);
        assert!((t.opacity - 0.2).abs() < 1e-6);
        t.animate(0.0, 0.0, &config.target, &board, world + Vec3::Z * 65.0);
        assert!((t.opacity - 0.5).abs() < 1e-4);
        t.animate(0.0, 0.0, &config.target, &board, world + Vec3::Z * 500.0);
        assert_eq!(t.opacity, 1.0);
    }

    #[test]
    fn test_face_camera_turns_toward_viewer() {
        let config = SignboardConfig::default();
        let mut t = target(&config);
        let board = Transform::default();
        let world = t.world_position(&board);
        t.animate(0.0, 0.0, &config.target, &board, world + Vec3::X * 30.0);
        let normal = t.rotation * Vec3::Z;
        assert!((normal - Vec3::X).length() < 1e-5);
        assert!(normal.y.abs() < 1e-6);
    }

    #[test]
    fn test_bob_moves_local_height() {
        let mut config = SignboardConfig::default();
        config.target.bob = Some(BobConfig::default());
        let mut t = target(&config);
        let time = std::f32::consts::FRAC_PI_2 / 1.4;
        t.animate(0.0, time, &config.target, &Transform::default(), Vec3::Z * 50.0);
        assert!((t.position.y - (t.base_position.y + 0.15)).abs() < 1e-5);
    }

    #[test]
    fn test_flash_decays() {
        let mut t = target(&SignboardConfig::default());
        t.flash(0.12);
        assert!(t.is_flashing());
        assert_eq!(t.display_color(), Rgb::WHITE);
        t.tick_flash(0.1);
        assert!(t.is_flashing());
        t.tick_flash(0.05);
        assert!(!t.is_flashing());
    }
}
