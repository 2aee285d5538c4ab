//! Position/orientation/scale triple owned by each simulated entity.
//!
//! Local axes follow the usual right-handed convention: +X right, +Y up, and
//! -Z forward.

use glam::{Mat3, Quat, Vec3};

/// Placement of an entity in its parent space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Unit quaternion.
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Origin, no rotation, unit scale.
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity transform moved to `position`.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Transform with explicit position and rotation.
    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Local -Z in parent space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Local +X in parent space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local +Y in parent space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Maps a point from local space into parent space.
    #[must_use]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * local)
    }

    /// Rotates a local offset into parent space, ignoring scale.
    #[must_use]
    pub fn rotate_offset(&self, offset: Vec3) -> Vec3 {
        self.rotation * offset
    }

    /// Moves the transform by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Turns the transform so that [`forward`](Self::forward) points at
    /// `target`. Returns `false` and leaves the rotation unchanged when the
    /// target coincides with the position.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) -> bool {
        match looking_at(self.position, target, up) {
            Some(rotation) => {
                self.rotation = rotation;
                true
            }
            None => false,
        }
    }

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// Rotation whose -Z axis points from `eye` toward `target`.
///
/// Falls back to an alternative up axis when `up` is parallel to the view
/// direction. Returns `None` if `eye == target`.
#[must_use]
pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Option<Quat> {
    let forward = (target - eye).try_normalize()?;
    let right = forward
        .cross(up)
        .try_normalize()
        .or_else(|| forward.cross(Vec3::Z).try_normalize())
        .or_else(|| forward.cross(Vec3::X).try_normalize())?;
    let true_up = right.cross(forward);
    Some(Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward)).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_axes() {
        let t = Transform::default();
        assert_eq!(t.forward(), Vec3::NEG_Z);
        assert_eq!(t.right(), Vec3::X);
        assert_eq!(t.up(), Vec3::Y);
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let mut t = Transform::from_position(Vec3::new(0.0, 8.0, 300.0));
        assert!(t.look_at(Vec3::ZERO, Vec3::Y));
        let expected = (Vec3::ZERO - t.position).normalize();
        assert!((t.forward() - expected).length() < 1e-5);
        // Up stays on the world-up side.
        assert!(t.up().y > 0.0);
    }

    #[test]
    fn test_look_at_same_point_is_noop() {
        let mut t = Transform::from_position(Vec3::ONE);
        t.rotation = Quat::from_rotation_y(0.3);
        assert!(!t.look_at(Vec3::ONE, Vec3::Y));
        assert_eq!(t.rotation, Quat::from_rotation_y(0.3));
    }

    #[test]
    fn test_look_straight_up_uses_fallback_axis() {
        let q = looking_at(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), Vec3::Y).unwrap();
        assert!(((q * Vec3::NEG_Z) - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_transform_point_applies_scale_rotation_translation() {
        let t = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            scale: Vec3::splat(2.0),
        };
        // Local +X scaled to 2, rotated 90° about Y lands on -Z.
        let p = t.transform_point(Vec3::X);
        assert!((p - Vec3::new(1.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_is_finite_detects_nan() {
        let mut t = Transform::default();
        assert!(t.is_finite());
        t.position.x = f32::NAN;
        assert!(!t.is_finite());
    }
}
