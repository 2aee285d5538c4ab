//! One constructed signboard and its per-frame animation.

use std::f32::consts::TAU;

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

use galaxy_content::PanelPayload;
use galaxy_events::TargetId;
use galaxy_math::Transform;

use crate::board::BoardVisual;
use crate::config::SignboardConfig;
use crate::decor::Decor;
use crate::error::SignboardError;
use crate::panel::Panel;
use crate::target::HitTarget;

#[derive(Debug, Clone, PartialEq)]
pub struct Signboard {
    config: SignboardConfig,
    transform: Transform,
    base_position: Vec3,
    /// Configured XYZ Euler rotation in radians.
    base_rotation: Vec3,
    /// Per-board phase so floating boards drift out of step.
    float_seed: f32,
    visual: BoardVisual,
    target: Option<HitTarget>,
    decor: Decor,
    panel: Option<Panel>,
}

fn euler_xyz(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
}

impl Signboard {
    /// Builds a board. `target_id` is used only when the config enables a
    /// hit target.
    pub fn build(
        config: SignboardConfig,
        target_id: Option<TargetId>,
        rng: &mut impl Rng,
    ) -> Result<Self, SignboardError> {
        config.validate()?;

        let base_position = config.position.to_vec3();
        let base_rotation = config.rotation.to_vec3() * (std::f32::consts::PI / 180.0);
        let visual = BoardVisual::build(&config)?;
        let target = match target_id {
            Some(id) if config.target.enabled => Some(HitTarget::build(id, &config)?),
            _ => None,
        };
        let decor = Decor::build(&config, rng)?;
        let float_seed = rng.random_range(0.0..TAU);

        Ok(Self {
            transform: Transform::from_position_rotation(base_position, euler_xyz(base_rotation)),
            base_position,
            base_rotation,
            float_seed,
            visual,
            target,
            decor,
            panel: None,
            config,
        })
    }

    /// One animation step of `dt` seconds at time `time`, seen from
    /// `camera`. Without `decorative`, glow pulse and drones hold still.
    pub fn animate(&mut self, dt: f32, time: f32, camera: Vec3, decorative: bool) {
        let effects = &self.config.effects;
        if decorative && effects.pulse {
            let p = (time * effects.pulse_speed * 2.0).sin() * 0.5 + 0.5;
            self.visual.apply_pulse(p);
        }

        let floating = self.config.decor.floating;
        if floating.enabled {
            let seed = self.float_seed;
            let wave = |phase: f32| ((time + phase) * floating.speed).sin();
            self.transform.position.y = self.base_position.y + wave(seed) * floating.amplitude;
            let tilt = Vec3::new(
                wave(seed * 0.7) * floating.rot_amp_x,
                wave(seed * 1.1) * floating.rot_amp_y,
                0.0,
            );
            self.transform.rotation = euler_xyz(self.base_rotation + tilt);
        }

        if let Some(target) = &mut self.target {
            target.animate(dt, time, &self.config.target, &self.transform, camera);
        }
        if decorative {
            self.decor.animate(time);
        }
    }

    /// Opens a panel with `payload`, or closes the open one. Returns whether
    /// a panel is open afterwards.
    pub fn toggle_panel(&mut self, payload: PanelPayload) -> bool {
        if self.panel.take().is_some() {
            return false;
        }
        self.panel = Some(Panel::new(self.config.size, payload));
        true
    }

    pub fn close_panel(&mut self) -> bool {
        self.panel.take().is_some()
    }

    #[must_use]
    pub fn config(&self) -> &SignboardConfig {
        &self.config
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Configured position, without the floating offset.
    #[must_use]
    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    #[must_use]
    pub fn float_seed(&self) -> f32 {
        self.float_seed
    }

    #[must_use]
    pub fn visual(&self) -> &BoardVisual {
        &self.visual
    }

    #[must_use]
    pub fn target(&self) -> Option<&HitTarget> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut HitTarget> {
        self.target.as_mut()
    }

    #[must_use]
    pub fn target_world_position(&self) -> Option<Vec3> {
        self.target.as_ref().map(|t| t.world_position(&self.transform))
    }

    #[must_use]
    pub fn decor(&self) -> &Decor {
        &self.decor
    }

    #[must_use]
    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    /// Separate meshes a renderer would draw for this board.
    #[must_use]
    pub fn mesh_count(&self) -> u32 {
        let visual = &self.visual;
        let target = self
            .target
            .as_ref()
            .map_or(0, |t| 2 + u32::from(t.crosshair.is_some()));
        2 + u32::from(visual.border.is_some())
            + u32::from(visual.glow.is_some())
            + visual.stand.len() as u32
            + target
            + self.decor.drones.len() as u32
            + self.decor.cables.len() as u32
            + u32::from(self.panel.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_content::{Action, PanelLinks};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn payload() -> PanelPayload {
        PanelPayload {
            action: Action::Profile,
            title: "Ada".to_string(),
            subtitle: None,
            body: Some("Bio".to_string()),
            items: Vec::new(),
            links: PanelLinks::default(),
            accent: "#00d4ff".to_string(),
            photo: None,
            thumb: None,
        }
    }

    fn build(config: SignboardConfig, seed: u64) -> Signboard {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Signboard::build(config, Some(TargetId(0)), &mut rng).unwrap()
    }

    #[test]
    fn test_empty_config_builds_like_defaults() {
        let from_empty = build(SignboardConfig::from_json("{}").unwrap(), 9);
        let from_defaults = build(SignboardConfig::default(), 9);
        assert_eq!(from_empty, from_defaults);
        assert!(from_empty.target().is_some());
        assert_eq!(from_empty.decor().drones.len(), 2);
    }

    #[test]
    fn test_invalid_config_fails_to_build() {
        let mut config = SignboardConfig::default();
        config.size.width = -1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(Signboard::build(config, Some(TargetId(0)), &mut rng).is_err());
    }

    #[test]
    fn test_rotation_in_degrees() {
        let mut config = SignboardConfig::default();
        config.rotation.y = 90.0;
        let board = build(config, 2);
        let facing = board.transform().rotation * Vec3::Z;
        assert!((facing - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_floating_stays_within_amplitude() {
        let mut config = SignboardConfig::default();
        config.position.y = 40.0;
        let mut board = build(config, 4);
        for step in 0..600 {
            board.animate(0.1, step as f32 * 0.1, Vec3::new(0.0, 0.0, 100.0), true);
            let dy = board.transform().position.y - 40.0;
            assert!(dy.abs() <= 0.25 + 1e-5);
        }
    }

    #[test]
    fn test_float_seeds_differ_between_boards() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let a = Signboard::build(SignboardConfig::default(), None, &mut rng).unwrap();
        let b = Signboard::build(SignboardConfig::default(), None, &mut rng).unwrap();
        assert_ne!(a.float_seed(), b.float_seed());
    }

    #[test]
    fn test_target_follows_floating_board() {
        let mut config = SignboardConfig::default();
        config.position = crate::config::Xyz::new(0.0, 10.0, -200.0);
        let mut board = build(config, 6);
        board.animate(0.0, 3.0, Vec3::ZERO, true);
        let world = board.target_world_position().unwrap();
        let expected = board.transform().transform_point(board.target().unwrap().position);
        assert!((world - expected).length() < 1e-5);
        assert!((world.z - (-200.0 + 1.85)).abs() < 0.2);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut board = build(SignboardConfig::default(), 7);
        assert!(board.toggle_panel(payload()));
        assert!(board.panel().is_some());
        assert!(!board.toggle_panel(payload()));
        assert!(board.panel().is_none());
        assert!(board.toggle_panel(payload()));
        assert!(board.panel().is_some());
    }

    #[test]
    fn test_mesh_count_tracks_parts() {
        let mut board = build(SignboardConfig::default(), 10);
        let full = board.mesh_count();
        board.toggle_panel(payload());
        assert_eq!(board.mesh_count(), full + 1);

        let mut config = SignboardConfig::default();
        config.decor.drones.enabled = false;
        let bare = build(config, 10);
        assert_eq!(bare.mesh_count(), full - 4, "two drones and their cables");
    }

    #[test]
    fn test_non_decorative_step_keeps_drones_still() {
        let mut board = build(SignboardConfig::default(), 11);
        let rest: Vec<Vec3> = board.decor().drones.iter().map(|d| d.base).collect();
        board.animate(0.5, 2.0, Vec3::ZERO, false);
        let now: Vec<Vec3> = board.decor().drones.iter().map(|d| d.position).collect();
        assert_eq!(now, rest);
        assert!(board.target().unwrap().spin > 0.0);
    }

    #[test]
    fn test_disabled_target() {
        let mut config = SignboardConfig::default();
        config.target.enabled = false;
        let board = build(config, 8);
        assert!(board.target().is_none());
        assert!(board.target_world_position().is_none());
    }
}
