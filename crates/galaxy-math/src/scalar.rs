//! Scalar interpolation, angle wrapping, and frame-rate independent smoothing.

use std::f32::consts::{PI, TAU};

use rand::Rng;

/// Frame rate that per-frame smoothing constants are tuned against.
///
/// A factor such as "lerp 15% toward the goal each frame" means 15% per
/// 1/60 s; [`frame_factor`] rescales it for other step sizes.
pub const REFERENCE_FPS: f32 = 60.0;

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics when `min > max`; the upper bound
/// wins in that case, mirroring `max(min, min(max, value))`.
#[must_use]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(value))
}

/// Linear interpolation from `start` to `end` by `t` (unclamped).
#[must_use]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Inverse of [`lerp`]: where `value` sits between `start` and `end`.
///
/// Returns 0.0 for a degenerate range.
#[must_use]
pub fn inverse_lerp(start: f32, end: f32, value: f32) -> f32 {
    let span = end - start;
    if span.abs() < f32::EPSILON {
        return 0.0;
    }
    (value - start) / span
}

/// Hermite smoothstep between two edges.
#[must_use]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = clamp(inverse_lerp(edge0, edge1, x), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Uniform sample in `[min, max)`.
pub fn random_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Wraps an angle into `[-π, π]`.
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped < -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Signed difference `to - from` along the shorter arc, in `[-π, π]`.
#[must_use]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Converts a per-reference-frame lerp factor into the factor for a step of
/// `dt` seconds. `frame_factor(f, 1.0 / 60.0) == f`.
#[must_use]
pub fn frame_factor(per_frame: f32, dt: f32) -> f32 {
    let per_frame = clamp(per_frame, 0.0, 1.0);
    if dt <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - per_frame).powf(dt * REFERENCE_FPS)
}

/// Converts a per-reference-frame multiplicative decay into the decay for a
/// step of `dt` seconds. `frame_decay(d, 1.0 / 60.0) == d`.
#[must_use]
pub fn frame_decay(per_frame: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 1.0;
    }
    per_frame.max(0.0).powf(dt * REFERENCE_FPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_clamp_inside_and_outside() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_inverted_range_does_not_panic() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert!((lerp(2.0, 4.0, 0.5) - 3.0).abs() < EPS);
    }

    #[test]
    fn test_inverse_lerp_degenerate_range() {
        assert_eq!(inverse_lerp(3.0, 3.0, 7.0), 0.0);
        assert!((inverse_lerp(0.0, 10.0, 2.5) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_smoothstep_shape() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < EPS);
        assert!(smoothstep(0.0, 1.0, 0.25) < 0.25);
    }

    #[test]
    fn test_random_range_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let v = random_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
    }

    #[test]
    fn test_normalize_angle_wraps_into_range() {
        // 3π lands on the ±π seam; either sign is the same heading.
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-4);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-4);
        assert!((normalize_angle(0.5) - 0.5).abs() < EPS);
        for k in -5..=5 {
            let a = normalize_angle(1.0 + k as f32 * TAU);
            assert!((a - 1.0).abs() < 1e-4, "k={k} gave {a}");
        }
    }

    #[test]
    fn test_shortest_angle_delta_crosses_wraparound() {
        let d = shortest_angle_delta(3.0, -3.0);
        assert!((d - (TAU - 6.0)).abs() < 1e-4);
        assert!(d.abs() <= PI);
        let back = shortest_angle_delta(-3.0, 3.0);
        assert!((back + (TAU - 6.0)).abs() < 1e-4);
    }

    #[test]
    fn test_frame_factor_matches_reference_frame() {
        assert!((frame_factor(0.2, 1.0 / 60.0) - 0.2).abs() < 1e-5);
        // Two reference frames compound: 1 - 0.8^2.
        assert!((frame_factor(0.2, 2.0 / 60.0) - 0.36).abs() < 1e-5);
        assert_eq!(frame_factor(0.2, 0.0), 0.0);
        assert!((frame_factor(1.0, 0.001) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_frame_decay_matches_reference_frame() {
        assert!((frame_decay(0.95, 1.0 / 60.0) - 0.95).abs() < 1e-5);
        assert!((frame_decay(0.95, 2.0 / 60.0) - 0.9025).abs() < 1e-5);
        assert_eq!(frame_decay(0.95, 0.0), 1.0);
    }
}
