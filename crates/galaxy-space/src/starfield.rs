//! Background starfield: a seeded shell of stars around the origin whose
//! size follows the frame rate.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use galaxy_math::{Rgb, random_point_on_sphere, random_range};

/// Inner and outer radius of the star shell.
pub const SHELL_RADII: (f32, f32) = (200.0, 1000.0);
/// Never thin the field below this many stars.
pub const MIN_STARS: usize = 1000;
/// Frame rate above which stars twinkle.
const TWINKLE_FPS: u32 = 45;
const CHECK_INTERVAL_MS: f64 = 2000.0;
const GROW_ABOVE_FPS: u32 = 60;
const SHRINK_BELOW_FPS: u32 = 30;
/// Count changes smaller than this are not worth a rebuild.
const MIN_COUNT_CHANGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: glam::Vec3,
    pub color: Rgb,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    seed: u64,
    max_stars: usize,
    stars: Vec<Star>,
    /// Accumulated XY parallax rotation in radians.
    rotation: glam::Vec2,
    twinkle: bool,
    last_check_ms: f64,
}

impl Starfield {
    /// Generates `count` stars. The same seed always gives the same sky, and
    /// a smaller count is a prefix of a larger one.
    #[must_use]
    pub fn new(seed: u64, count: usize) -> Self {
        let stars = generate(seed, count);
        info!(count = stars.len(), "Starfield created");
        Self {
            seed,
            max_stars: count,
            stars,
            rotation: glam::Vec2::ZERO,
            twinkle: true,
            last_check_ms: 0.0,
        }
    }

    /// Slow parallax drift. Twinkle runs only while the frame rate allows
    /// it and effects are not being reduced.
    pub fn update(&mut self, dt: f32, fps: u32, reduce_effects: bool) {
        self.twinkle = fps > TWINKLE_FPS && !reduce_effects;
        self.rotation += glam::Vec2::new(0.002, 0.005) * dt;
    }

    /// Re-evaluates the star count when the check interval has elapsed on
    /// the real clock. Returns whether the field was rebuilt.
    pub fn maybe_adjust(&mut self, now_ms: f64, fps: u32) -> bool {
        if now_ms - self.last_check_ms <= CHECK_INTERVAL_MS {
            return false;
        }
        self.last_check_ms = now_ms;

        let current = self.stars.len();
        let wanted = if fps < SHRINK_BELOW_FPS {
            MIN_STARS.max(current * 4 / 5)
        } else if fps > GROW_ABOVE_FPS {
            self.max_stars.min(current * 11 / 10)
        } else {
            current
        };
        if wanted.abs_diff(current) <= MIN_COUNT_CHANGE {
            return false;
        }
        self.stars = generate(self.seed, wanted);
        info!(count = wanted, fps, "Starfield resized");
        true
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    #[must_use]
    pub fn is_twinkling(&self) -> bool {
        self.twinkle
    }

    #[must_use]
    pub fn rotation(&self) -> glam::Vec2 {
        self.rotation
    }
}

fn generate(seed: u64, count: usize) -> Vec<Star> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let radius = random_range(&mut rng, SHELL_RADII.0, SHELL_RADII.1);
            let position = random_point_on_sphere(&mut rng, radius);
            // Mostly white, some blue-ish, some yellow-ish.
            let kind: f32 = rng.random();
            let color = if kind < 0.7 {
                Rgb::WHITE
            } else if kind < 0.85 {
                Rgb::new(0.8, 0.9, 1.0)
            } else {
                Rgb::new(1.0, 0.95, 0.8)
            };
            Star {
                position,
                color,
                size: random_range(&mut rng, 1.0, 3.5),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_sit_in_the_shell() {
        let field = Starfield::new(11, 2000);
        assert_eq!(field.len(), 2000);
        for star in field.stars() {
            let r = star.position.length();
            assert!(r >= SHELL_RADII.0 - 1e-2 && r <= SHELL_RADII.1 + 1e-2, "{r}");
            assert!((1.0..3.5).contains(&star.size));
        }
    }

    #[test]
    fn test_same_seed_same_sky() {
        let a = Starfield::new(5, 1500);
        let b = Starfield::new(5, 1500);
        assert_eq!(a.stars(), b.stars());
        let small = Starfield::new(5, 1200);
        assert_eq!(small.stars(), &a.stars()[..1200]);
    }

    #[test]
    fn test_low_fps_thins_the_field() {
        let mut field = Starfield::new(1, 15_000);
        assert!(!field.maybe_adjust(1000.0, 10), "too early");
        assert!(field.maybe_adjust(2500.0, 10));
        assert_eq!(field.len(), 12_000);
        assert!(!field.maybe_adjust(3000.0, 10), "interval not elapsed");
    }

    #[test]
    fn test_field_never_drops_below_minimum() {
        let mut field = Starfield::new(1, 1050);
        assert!(!field.maybe_adjust(2500.0, 5), "change below rebuild threshold");
        assert_eq!(field.len(), 1050);

        let mut field = Starfield::new(1, 2000);
        let mut now = 0.0;
        for _ in 0..10 {
            now += 2500.0;
            field.maybe_adjust(now, 5);
        }
        // 2000, 1600, 1280, 1024; the last step to 1000 is too small.
        assert_eq!(field.len(), 1024);
    }

    #[test]
    fn test_high_fps_regrows_up_to_max() {
        let mut field = Starfield::new(1, 5000);
        field.maybe_adjust(2500.0, 10);
        assert_eq!(field.len(), 4000);
        let mut now = 2500.0;
        for _ in 0..5 {
            now += 2500.0;
            field.maybe_adjust(now, 120);
        }
        assert_eq!(field.len(), 5000);
    }

    #[test]
    fn test_twinkle_follows_fps_and_effects() {
        let mut field = Starfield::new(1, 10);
        field.update(1.0, 60, false);
        assert!(field.is_twinkling());
        field.update(1.0, 40, false);
        assert!(!field.is_twinkling());
        field.update(1.0, 60, true);
        assert!(!field.is_twinkling());
        assert!((field.rotation().y - 0.015).abs() < 1e-6);
    }
}
