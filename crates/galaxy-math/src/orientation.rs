//! Yaw/pitch/roll angles and the shortest-path orientation resolver.
//!
//! Angles use the YXZ order: yaw about world Y, then pitch about the yawed
//! X axis, then roll about the resulting Z axis. With -Z forward, positive
//! yaw turns left and positive pitch lifts the nose.

use glam::{EulerRot, Quat};

use crate::scalar::{frame_factor, normalize_angle, shortest_angle_delta};

/// Orientation expressed as YXZ Euler angles in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerAngles {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl EulerAngles {
    /// Creates angles from components.
    #[must_use]
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Decomposes a quaternion in YXZ order.
    #[must_use]
    pub fn from_quat(q: Quat) -> Self {
        let (yaw, pitch, roll) = q.to_euler(EulerRot::YXZ);
        Self { yaw, pitch, roll }
    }

    /// Recomposes the quaternion.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }

    /// True when every angle is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite() && self.roll.is_finite()
    }
}

/// One interpolation step from `current` toward `target`.
///
/// Yaw travels along the shorter arc: the difference is wrapped into
/// `[-π, π]` before scaling, so a heading of 3.0 moving toward -3.0 turns
/// through π rather than back through zero. The returned yaw is wrapped into
/// `[-π, π]`; pitch and roll interpolate linearly.
#[must_use]
pub fn resolve_orientation(current: EulerAngles, target: EulerAngles, factor: f32) -> EulerAngles {
    let yaw = normalize_angle(current.yaw);
    let yaw_step = shortest_angle_delta(yaw, target.yaw) * factor;
    EulerAngles {
        yaw: normalize_angle(yaw + yaw_step),
        pitch: current.pitch + (target.pitch - current.pitch) * factor,
        roll: current.roll + (target.roll - current.roll) * factor,
    }
}

/// Frame-rate independent wrapper around [`resolve_orientation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationResolver {
    /// Fraction of the remaining difference closed per 1/60 s.
    pub per_frame_factor: f32,
}

impl Default for OrientationResolver {
    fn default() -> Self {
        Self {
            per_frame_factor: 0.2,
        }
    }
}

impl OrientationResolver {
    /// Creates a resolver with the given per-frame factor.
    #[must_use]
    pub fn new(per_frame_factor: f32) -> Self {
        Self { per_frame_factor }
    }

    /// Advances `current` toward `target` over `dt` seconds.
    #[must_use]
    pub fn resolve(&self, current: EulerAngles, target: EulerAngles, dt: f32) -> EulerAngles {
        resolve_orientation(current, target, frame_factor(self.per_frame_factor, dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_yaw_crosses_wraparound_on_short_arc() {
        let current = EulerAngles::new(3.0, 0.0, 0.0);
        let target = EulerAngles::new(-3.0, 0.0, 0.0);
        let next = resolve_orientation(current, target, 0.2);
        // Unwrapped heading moves from 3.0 toward 2π - 3.0 ≈ 3.283.
        let expected = 3.0 + 0.2 * (TAU - 6.0);
        assert!((next.yaw - expected).abs() < 1e-4, "got {}", next.yaw);
        assert!(next.yaw > 3.0, "must not turn back toward zero");
    }

    #[test]
    fn test_yaw_crosses_wraparound_in_reverse() {
        let current = EulerAngles::new(-3.0, 0.0, 0.0);
        let target = EulerAngles::new(3.0, 0.0, 0.0);
        let next = resolve_orientation(current, target, 0.2);
        let expected = -3.0 - 0.2 * (TAU - 6.0);
        assert!((next.yaw - expected).abs() < 1e-4);
    }

    #[test]
    fn test_step_never_exceeds_half_turn() {
        for i in 0..64 {
            let a = -PI + i as f32 * 0.1;
            for j in 0..64 {
                let b = -PI + j as f32 * 0.1;
                let next = resolve_orientation(
                    EulerAngles::new(a, 0.0, 0.0),
                    EulerAngles::new(b, 0.0, 0.0),
                    1.0,
                );
                let travelled = shortest_angle_delta(a, next.yaw).abs();
                assert!(travelled <= PI + 1e-4);
            }
        }
    }

    #[test]
    fn test_pitch_and_roll_lerp() {
        let next = resolve_orientation(
            EulerAngles::new(0.0, 0.0, 1.0),
            EulerAngles::new(0.0, 1.0, 0.0),
            0.25,
        );
        assert!((next.pitch - 0.25).abs() < 1e-6);
        assert!((next.roll - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_current_yaw_outside_range_is_wrapped_first() {
        let next = resolve_orientation(
            EulerAngles::new(TAU + 0.5, 0.0, 0.0),
            EulerAngles::new(0.5, 0.0, 0.0),
            0.5,
        );
        assert!((next.yaw - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_resolver_reference_frame_matches_factor() {
        let resolver = OrientationResolver::default();
        let next = resolver.resolve(
            EulerAngles::new(3.0, 0.0, 0.0),
            EulerAngles::new(-3.0, 0.0, 0.0),
            1.0 / 60.0,
        );
        let direct = resolve_orientation(
            EulerAngles::new(3.0, 0.0, 0.0),
            EulerAngles::new(-3.0, 0.0, 0.0),
            0.2,
        );
        assert!((next.yaw - direct.yaw).abs() < 1e-4);
    }

    #[test]
    fn test_quat_roundtrip_in_yxz_order() {
        let angles = EulerAngles::new(1.2, -0.4, 0.3);
        let back = EulerAngles::from_quat(angles.to_quat());
        assert!((back.yaw - angles.yaw).abs() < 1e-4);
        assert!((back.pitch - angles.pitch).abs() < 1e-4);
        assert!((back.roll - angles.roll).abs() < 1e-4);
    }

    #[test]
    fn test_positive_pitch_lifts_nose() {
        let q = EulerAngles::new(0.0, 0.3, 0.0).to_quat();
        assert!((q * glam::Vec3::NEG_Z).y > 0.0);
    }

    #[test]
    fn test_positive_yaw_turns_left() {
        let q = EulerAngles::new(0.3, 0.0, 0.0).to_quat();
        assert!((q * glam::Vec3::NEG_Z).x < 0.0);
    }
}
