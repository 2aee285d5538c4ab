//! Celestial bodies: the declarative body factory, the category palette, the
//! solar system the ship flies through and the starfield behind it.

pub mod body;
pub mod palette;
pub mod solar_system;
pub mod starfield;

pub use body::{
    BodyKind, BodyOptions, CelestialBody, Glow, SurfaceMaterial, create_asteroid, create_planet,
    create_star, create_station,
};
pub use palette::{Palette, category_color};
pub use solar_system::{OrbitSpec, OrbitingPlanet, SolarSystem, default_orbits};
pub use starfield::{MIN_STARS, SHELL_RADII, Star, Starfield};
