//! Escort drones hovering at the board's top corners, tied to it by cables.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;

use galaxy_math::Rgb;

use crate::config::{SignboardConfig, parse_color};
use crate::error::SignboardError;

const DRONE_BOB_SPEED: f32 = 1.5;
const DRONE_BOB_AMPLITUDE: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    /// Rest position in board space.
    pub base: Vec3,
    pub position: Vec3,
    pub phase: f32,
    pub size: f32,
    pub color: Rgb,
}

/// A unit-height cylinder stretched between an anchor and a drone.
#[derive(Debug, Clone, PartialEq)]
pub struct Cable {
    pub anchor: Vec3,
    pub midpoint: Vec3,
    pub length: f32,
    /// Maps the cylinder's +Y axis onto the anchor-to-drone direction.
    pub rotation: Quat,
    pub thickness: f32,
    pub color: Rgb,
}

impl Cable {
    fn new(anchor: Vec3, thickness: f32, color: Rgb) -> Self {
        Self {
            anchor,
            midpoint: anchor,
            length: 0.0,
            rotation: Quat::IDENTITY,
            thickness,
            color,
        }
    }

    /// Re-spans the cable from its anchor to `end`.
    pub fn span_to(&mut self, end: Vec3) {
        let dir = end - self.anchor;
        self.length = dir.length();
        self.midpoint = (self.anchor + end) * 0.5;
        self.rotation = dir
            .try_normalize()
            .map_or(Quat::IDENTITY, |d| Quat::from_rotation_arc(Vec3::Y, d));
    }

    #[must_use]
    pub fn end(&self) -> Vec3 {
        self.anchor + self.rotation * Vec3::Y * self.length
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decor {
    pub drones: Vec<Drone>,
    /// `cables[i]` ties `drones[i]` to the board; empty when cables are off.
    pub cables: Vec<Cable>,
}

impl Decor {
    pub fn build(config: &SignboardConfig, rng: &mut impl Rng) -> Result<Self, SignboardError> {
        let drones_cfg = &config.decor.drones;
        let cables_cfg = &config.decor.cables;
        if !drones_cfg.enabled {
            return Ok(Self::default());
        }

        let half_w = config.size.width * 0.5;
        let top_y = config.size.height * 0.5;
        let front_z = config.size.depth * 0.5;
        let drone_color = parse_color("decor.drones.color", &drones_cfg.color)?;
        let cable_color = parse_color("decor.cables.color", &cables_cfg.color)?;

        let mut decor = Self::default();
        for side in [-1.0_f32, 1.0] {
            let base = Vec3::new(
                side * (half_w + drones_cfg.offset_x),
                top_y + drones_cfg.offset_y,
                front_z + drones_cfg.front_offset,
            );
            decor.drones.push(Drone {
                base,
                position: base,
                phase: rng.random_range(0.0..TAU),
                size: drones_cfg.size,
                color: drone_color,
            });
            if cables_cfg.enabled {
                let mut cable =
                    Cable::new(Vec3::new(side * half_w, top_y, front_z), cables_cfg.thickness, cable_color);
                cable.span_to(base);
                decor.cables.push(cable);
            }
        }
        Ok(decor)
    }

    /// Bobs every drone and re-spans its cable.
    pub fn animate(&mut self, time: f32) {
        for (i, drone) in self.drones.iter_mut().enumerate() {
            let bob = (time * DRONE_BOB_SPEED + drone.phase).sin() * DRONE_BOB_AMPLITUDE;
            drone.position = drone.base + Vec3::Y * bob;
            if let Some(cable) = self.cables.get_mut(i) {
                cable.span_to(drone.position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(3)
    }

    #[test]
    fn test_drones_flank_top_corners() {
        let decor = Decor::build(&SignboardConfig::default(), &mut rng()).unwrap();
        assert_eq!(decor.drones.len(), 2);
        assert!((decor.drones[0].base - Vec3::new(-5.8, 3.3, 0.55)).length() < 1e-5);
        assert!((decor.drones[1].base - Vec3::new(5.8, 3.3, 0.55)).length() < 1e-5);
        assert_eq!(decor.cables[0].anchor, Vec3::new(-5.0, 2.5, 0.25));
        assert_eq!(decor.cables[1].anchor, Vec3::new(5.0, 2.5, 0.25));
    }

    #[test]
    fn test_cables_stay_attached_while_bobbing() {
        let mut decor = Decor::build(&SignboardConfig::default(), &mut rng()).unwrap();
        for step in 0..120 {
            decor.animate(step as f32 * 0.05);
            for (drone, cable) in decor.drones.iter().zip(&decor.cables) {
                assert!((cable.end() - drone.position).length() < 1e-4);
                assert!((drone.position.y - drone.base.y).abs() <= DRONE_BOB_AMPLITUDE + 1e-6);
            }
        }
    }

    #[test]
    fn test_phases_desynchronize_drones() {
        let decor = Decor::build(&SignboardConfig::default(), &mut rng()).unwrap();
        assert_ne!(decor.drones[0].phase, decor.drones[1].phase);
    }

    #[test]
    fn test_disabled_drones_and_cables() {
        let mut config = SignboardConfig::default();
        config.decor.cables.enabled = false;
        let decor = Decor::build(&config, &mut rng()).unwrap();
        assert_eq!(decor.drones.len(), 2);
        assert!(decor.cables.is_empty());

        config.decor.drones.enabled = false;
        assert_eq!(Decor::build(&config, &mut rng()).unwrap(), Decor::default());
    }
}
