use glam::Vec3;

/// Axis-aligned world limits plus a maximum radial distance from the origin.
///
/// Invariant: `min <= max` on every axis and `max_distance >= 0`. The
/// constructor enforces this by sorting components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub min: Vec3,
    pub max: Vec3,
    pub max_distance: f32,
}

impl WorldBounds {
    /// Create bounds from two corners and a radius limit.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3, max_distance: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            max_distance: max_distance.abs(),
        }
    }

    /// Symmetric bounds `[-half, half]` on each axis.
    #[must_use]
    pub fn symmetric(half: Vec3, max_distance: f32) -> Self {
        Self::new(-half.abs(), half.abs(), max_distance)
    }

    /// Returns true if the point satisfies both the box and the radius limit.
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all()
            && p.cmple(self.max).all()
            && p.length() <= self.max_distance * (1.0 + 1e-6)
    }

    /// Clamp each axis into the box, then pull the point back onto the
    /// radius limit if it still lies beyond it.
    ///
    /// Non-finite components collapse to the origin before clamping.
    #[must_use]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        let p = if p.is_finite() { p } else { Vec3::ZERO };
        let boxed = p.clamp(self.min, self.max);
        let distance = boxed.length();
        if distance > self.max_distance && distance > 0.0 {
            boxed * (self.max_distance / distance)
        } else {
            boxed
        }
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::symmetric(Vec3::new(1000.0, 600.0, 1000.0), 1200.0)
    }
}
