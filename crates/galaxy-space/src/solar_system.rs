//! Sun plus planets on inclined circular orbits.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;

use crate::body::{BodyOptions, CelestialBody, create_planet, create_star};
use crate::palette::Palette;
use galaxy_math::Rgb;

/// World units per astronomical unit.
pub const AU_SCALE: f32 = 25.0;
/// World units per kilometre of planet radius.
pub const PLANET_SIZE_PER_KM: f32 = 0.00015;

/// Declarative description of one orbiting planet.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitSpec {
    pub name: String,
    /// Orbit radius in astronomical units.
    pub au: f32,
    pub diameter_km: f32,
    pub color: u32,
    /// Orbit angular speed in radians per second.
    pub speed: f32,
    pub inclination_deg: f32,
}

impl OrbitSpec {
    fn new(name: &str, au: f32, diameter_km: f32, color: u32, speed: f32, inclination_deg: f32) -> Self {
        Self {
            name: name.to_string(),
            au,
            diameter_km,
            color,
            speed,
            inclination_deg,
        }
    }
}

/// The eight planets with visually tuned speeds.
#[must_use]
pub fn default_orbits() -> Vec<OrbitSpec> {
    vec![
        OrbitSpec::new("Mercury", 0.39, 4_879.0, 0x9c8b7a, 0.48, 7.0),
        OrbitSpec::new("Venus", 0.72, 12_104.0, 0xe6c27a, 0.35, 3.4),
        OrbitSpec::new("Earth", 1.0, 12_742.0, 0x2e7dd7, 0.30, 0.0),
        OrbitSpec::new("Mars", 1.52, 6_779.0, 0xc1440e, 0.24, 1.85),
        OrbitSpec::new("Jupiter", 5.2, 139_820.0, 0xd8ca9d, 0.13, 1.3),
        OrbitSpec::new("Saturn", 9.58, 116_460.0, 0xe3d8a8, 0.097, 2.5),
        OrbitSpec::new("Uranus", 19.2, 50_724.0, 0x9fdbe6, 0.068, 0.8),
        OrbitSpec::new("Neptune", 30.05, 49_244.0, 0x3f54ba, 0.054, 1.8),
    ]
}

#[derive(Debug, Clone)]
pub struct OrbitingPlanet {
    pub name: String,
    pub distance: f32,
    pub speed: f32,
    pub inclination: f32,
    /// Current orbit angle in radians.
    pub angle: f32,
    pub body: CelestialBody,
}

impl OrbitingPlanet {
    /// World position for the current orbit angle.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        orbit_position(self.distance, self.angle, self.inclination)
    }
}

/// Position on a circle of radius `distance` in the XZ plane, rotated by
/// `angle` about Y and then tilted by `inclination` about X.
fn orbit_position(distance: f32, angle: f32, inclination: f32) -> Vec3 {
    Quat::from_rotation_x(inclination) * (Quat::from_rotation_y(angle) * Vec3::new(distance, 0.0, 0.0))
}

#[derive(Debug, Clone)]
pub struct SolarSystem {
    sun: CelestialBody,
    planets: Vec<OrbitingPlanet>,
}

impl SolarSystem {
    /// Builds the system; each planet starts at a random phase so they do not
    /// line up.
    pub fn new(orbits: &[OrbitSpec], rng: &mut impl Rng) -> Self {
        let sun = create_star(BodyOptions {
            radius: 6.0,
            color: Rgb::from_hex(Palette::SUN),
            rotation_speed: 0.0005,
            ..Default::default()
        });
        let planets = orbits
            .iter()
            .map(|spec| {
                let distance = spec.au * AU_SCALE;
                let inclination = spec.inclination_deg.to_radians();
                let angle = rng.random::<f32>() * TAU;
                let mut body = create_planet(BodyOptions {
                    radius: spec.diameter_km * 0.5 * PLANET_SIZE_PER_KM,
                    color: Rgb::from_hex(spec.color),
                    emissive_intensity: 0.2,
                    ..Default::default()
                });
                body.set_position(orbit_position(distance, angle, inclination));
                OrbitingPlanet {
                    name: spec.name.clone(),
                    distance,
                    speed: spec.speed,
                    inclination,
                    angle,
                    body,
                }
            })
            .collect::<Vec<_>>();
        tracing::info!("Solar system built with {} planets", planets.len());
        Self { sun, planets }
    }

    /// Advances every orbit and spin by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.sun.update(dt);
        for planet in &mut self.planets {
            planet.angle = (planet.angle + dt * planet.speed) % TAU;
            let position = planet.position();
            planet.body.set_position(position);
            planet.body.update(dt);
        }
    }

    #[must_use]
    pub fn planet_by_name(&self, name: &str) -> Option<&OrbitingPlanet> {
        self.planets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Planet closest to `point`, if any.
    #[must_use]
    pub fn nearest_planet(&self, point: Vec3) -> Option<&OrbitingPlanet> {
        self.planets.iter().min_by(|a, b| {
            a.position()
                .distance_squared(point)
                .total_cmp(&b.position().distance_squared(point))
        })
    }

    #[must_use]
    pub fn planets(&self) -> &[OrbitingPlanet] {
        &self.planets
    }

    #[must_use]
    pub fn sun(&self) -> &CelestialBody {
        &self.sun
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn system() -> SolarSystem {
        SolarSystem::new(&default_orbits(), &mut ChaCha8Rng::seed_from_u64(1))
    }

    #[test]
    fn test_planets_sit_on_their_orbit() {
        let s = system();
        assert_eq!(s.planets().len(), 8);
        for p in s.planets() {
            assert!((p.position().length() - p.distance).abs() < 1e-3);
            assert_eq!(p.body.position(), p.position());
        }
        let earth = s.planet_by_name("earth").unwrap();
        assert!((earth.distance - 25.0).abs() < 1e-5);
        assert!((earth.body.radius() - 0.955_65).abs() < 1e-3);
    }

    #[test]
    fn test_update_advances_angle() {
        let mut s = system();
        let before = s.planet_by_name("Mars").unwrap().angle;
        s.update(1.0);
        let after = s.planet_by_name("Mars").unwrap().angle;
        let moved = (after - before).rem_euclid(TAU);
        assert!((moved - 0.24).abs() < 1e-4);
    }

    #[test]
    fn test_zero_inclination_stays_in_plane() {
        let mut s = system();
        s.update(3.0);
        assert!(s.planet_by_name("Earth").unwrap().position().y.abs() < 1e-4);
    }

    #[test]
    fn test_nearest_planet() {
        let s = system();
        let neptune = s.planet_by_name("Neptune").unwrap().position();
        let nearest = s.nearest_planet(neptune * 1.01).unwrap();
        assert_eq!(nearest.name, "Neptune");
        assert!(s.planet_by_name("Pluto").is_none());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = system();
        let b = system();
        for (pa, pb) in a.planets().iter().zip(b.planets()) {
            assert_eq!(pa.angle, pb.angle);
        }
    }

    #[test]
    fn test_empty_system() {
        let s = SolarSystem::new(&[], &mut ChaCha8Rng::seed_from_u64(0));
        assert!(s.nearest_planet(Vec3::ZERO).is_none());
        assert_eq!(s.sun().radius(), 6.0);
    }
}
