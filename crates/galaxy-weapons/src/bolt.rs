//! A single laser beam or projectile in flight.

use glam::{Quat, Vec3};

use galaxy_events::WeaponKind;

use crate::pool::SlotId;

/// Spin rate of projectile spheres about their local Y axis, rad/s.
const PROJECTILE_SPIN_RATE: f32 = 5.0;
/// Trail opacity at the moment of firing.
const TRAIL_BASE_OPACITY: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct Bolt {
    pub kind: WeaponKind,
    pub position: Vec3,
    /// Position before the most recent advance; the hit test sweeps from
    /// here to `position`.
    pub previous_position: Vec3,
    pub velocity: Vec3,
    /// Lasers are oriented along their flight direction.
    pub rotation: Quat,
    /// Simulation time of firing, seconds.
    pub created_at: f32,
    pub lifetime: f32,
    /// `None` for a bolt allocated after its pool ran dry.
    pub slot: Option<SlotId>,
    /// Accumulated projectile spin, radians.
    pub spin: f32,
    pub trail_opacity: f32,
}

impl Bolt {
    #[must_use]
    pub fn new(
        kind: WeaponKind,
        position: Vec3,
        velocity: Vec3,
        created_at: f32,
        lifetime: f32,
        slot: Option<SlotId>,
    ) -> Self {
        let direction = velocity.normalize_or_zero();
        let rotation = if direction == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::NEG_Z, direction)
        };
        Self {
            kind,
            position,
            previous_position: position,
            velocity,
            rotation,
            created_at,
            lifetime,
            slot,
            spin: 0.0,
            trail_opacity: TRAIL_BASE_OPACITY,
        }
    }

    /// Moves by `velocity * dt` and updates the visual fade at simulation
    /// time `now`.
    pub fn advance(&mut self, dt: f32, now: f32) {
        self.previous_position = self.position;
        self.position += self.velocity * dt;
        if self.kind == WeaponKind::Projectile {
            self.spin += dt * PROJECTILE_SPIN_RATE;
            let life = if self.lifetime > 0.0 {
                (self.age(now) / self.lifetime).clamp(0.0, 1.0)
            } else {
                1.0
            };
            self.trail_opacity = TRAIL_BASE_OPACITY * (1.0 - life);
        }
    }

    #[must_use]
    pub fn age(&self, now: f32) -> f32 {
        now - self.created_at
    }

    #[must_use]
    pub fn is_expired(&self, now: f32) -> bool {
        self.age(now) >= self.lifetime
    }

    #[must_use]
    pub fn is_pooled(&self) -> bool {
        self.slot.is_some()
    }

    /// Whether the segment travelled during the last advance passes within
    /// `radius` of `point`.
    #[must_use]
    pub fn passes_within(&self, point: Vec3, radius: f32) -> bool {
        distance_to_segment(point, self.previous_position, self.position) < radius
    }
}

/// Distance from `point` to the segment `a..b`.
fn distance_to_segment(point: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
