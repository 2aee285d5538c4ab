//! Easing curves for tweened camera moves and UI-style transitions.

/// Maps linear progress in `[0, 1]` onto a curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, slow end (quadratic).
    EaseOutQuad,
    /// Slow start and end (quadratic).
    EaseInOutQuad,
    /// Slow start and end (cubic).
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Applies the curve to `t`, clamping `t` into `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => ease_out_quad(t),
            Easing::EaseInOutQuad => ease_in_out_quad(t),
            Easing::EaseInOutCubic => ease_in_out_cubic(t),
        }
    }
}

/// Cubic ease-in-out.
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quadratic ease-out.
#[must_use]
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[must_use]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
