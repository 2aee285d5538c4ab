//! Scalar helpers, spherical sampling, easing curves, colors, bounds, and the
//! transform/orientation types shared by every simulation crate.

mod bounds;
mod color;
mod easing;
mod orientation;
mod scalar;
mod spherical;
mod transform;

pub use bounds::WorldBounds;
pub use color::{ColorParseError, Rgb};
pub use easing::{Easing, ease_in_out_cubic, ease_in_out_quad, ease_out_quad};
pub use orientation::{EulerAngles, OrientationResolver, resolve_orientation};
pub use scalar::{
    REFERENCE_FPS, clamp, frame_decay, frame_factor, inverse_lerp, lerp, normalize_angle,
    random_range, shortest_angle_delta, smoothstep,
};
pub use spherical::{
    Spherical, cartesian_to_spherical, fibonacci_sphere, random_point_on_sphere,
    spherical_to_cartesian,
};
pub use transform::{Transform, looking_at};
