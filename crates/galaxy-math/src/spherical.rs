//! Spherical coordinates and point sampling on spheres.
//!
//! Convention: `phi` is the polar angle measured from +Y, `theta` is the
//! azimuth around +Y measured from +X toward +Z.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

/// A point in spherical coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    /// Distance from the origin.
    pub radius: f32,
    /// Azimuth around +Y, from +X toward +Z.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
}

/// Converts spherical coordinates to a cartesian point.
#[must_use]
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Converts a cartesian point to spherical coordinates.
///
/// The origin maps to radius 0 with both angles 0.
#[must_use]
pub fn cartesian_to_spherical(p: Vec3) -> Spherical {
    let radius = p.length();
    if radius < f32::EPSILON {
        return Spherical::default();
    }
    Spherical {
        radius,
        theta: p.z.atan2(p.x),
        phi: (p.y / radius).clamp(-1.0, 1.0).acos(),
    }
}

/// Evenly distributes `samples` points over a sphere using the golden angle.
///
/// The first point is the north pole and the last the south pole. A single
/// sample yields just the north pole.
#[must_use]
pub fn fibonacci_sphere(samples: usize, radius: f32) -> Vec<Vec3> {
    if samples == 0 {
        return Vec::new();
    }
    if samples == 1 {
        return vec![Vec3::new(0.0, radius, 0.0)];
    }
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
    let last = (samples - 1) as f32;
    (0..samples)
        .map(|i| {
            let y = 1.0 - (i as f32 / last) * 2.0;
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f32;
            Vec3::new(theta.cos() * ring, y, theta.sin() * ring) * radius
        })
        .collect()
}

/// Uniformly distributed point on the surface of a sphere.
pub fn random_point_on_sphere(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let theta = rng.random::<f32>() * TAU;
    let phi = (2.0 * rng.random::<f32>() - 1.0).acos();
    spherical_to_cartesian(radius, theta, phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spherical_axes() {
        let north = spherical_to_cartesian(2.0, 0.0, 0.0);
        assert!((north - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        let east = spherical_to_cartesian(1.0, 0.0, PI / 2.0);
        assert!((east - Vec3::X).length() < 1e-5);
        let south_z = spherical_to_cartesian(1.0, PI / 2.0, PI / 2.0);
        assert!((south_z - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_cartesian_roundtrip_point() {
        let p = Vec3::new(3.0, -2.0, 5.0);
        let s = cartesian_to_spherical(p);
        let back = spherical_to_cartesian(s.radius, s.theta, s.phi);
        assert!((back - p).length() < 1e-4);
    }

    #[test]
    fn test_cartesian_origin_is_zero() {
        assert_eq!(cartesian_to_spherical(Vec3::ZERO), Spherical::default());
    }

    #[test]
    fn test_fibonacci_sphere_counts_and_radius() {
        assert!(fibonacci_sphere(0, 1.0).is_empty());
        assert_eq!(fibonacci_sphere(1, 4.0), vec![Vec3::new(0.0, 4.0, 0.0)]);
        let pts = fibonacci_sphere(64, 3.0);
        assert_eq!(pts.len(), 64);
        for p in &pts {
            assert!((p.length() - 3.0).abs() < 1e-3);
        }
        assert!((pts[0].y - 3.0).abs() < 1e-4);
        assert!((pts[63].y + 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_random_points_lie_on_surface() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let on = random_point_on_sphere(&mut rng, 5.0);
            assert!((on.length() - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_random_points_deterministic_for_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(
            random_point_on_sphere(&mut a, 1.0),
            random_point_on_sphere(&mut b, 1.0)
        );
    }
}
