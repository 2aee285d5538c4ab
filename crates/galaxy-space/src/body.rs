//! Declarative construction of planets, asteroids, stations and stars.
//!
//! A body is immutable after construction apart from its continuous
//! self-rotation.

use glam::{EulerRot, Quat, Vec3};
use rustc_hash::FxHashMap;

use galaxy_math::{REFERENCE_FPS, Rgb, Transform};

use crate::palette::category_color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Planet,
    Asteroid,
    Station,
    Star,
}

/// Construction options. Unset fields take the documented defaults via
/// `..Default::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyOptions {
    pub radius: f32,
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub position: Vec3,
    /// Initial XYZ Euler rotation in radians.
    pub rotation: Vec3,
    /// Spin in radians per 1/60 s about Y; X spins at half this rate.
    pub rotation_speed: f32,
    pub category: Option<String>,
    /// Free-form metadata carried for tooltips and navigation.
    pub data: FxHashMap<String, String>,
}

impl Default for BodyOptions {
    fn default() -> Self {
        Self {
            radius: 10.0,
            color: Rgb::from_hex(0x4488ff),
            emissive: Rgb::BLACK,
            emissive_intensity: 0.3,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            rotation_speed: 0.001,
            category: None,
            data: FxHashMap::default(),
        }
    }
}

impl BodyOptions {
    /// Options colored after a content category.
    #[must_use]
    pub fn for_category(category: &str) -> Self {
        Self {
            color: category_color(category),
            category: Some(category.to_string()),
            ..Self::default()
        }
    }
}

/// Shading parameters derived from the body kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMaterial {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    /// `false` for self-lit bodies that ignore scene lighting.
    pub lit: bool,
}

/// Back-faced halo around planets and stations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub radius: f32,
    pub color: Rgb,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct CelestialBody {
    kind: BodyKind,
    options: BodyOptions,
    material: SurfaceMaterial,
    glow: Option<Glow>,
    transform: Transform,
    euler: Vec3,
}

impl CelestialBody {
    #[must_use]
    pub fn new(kind: BodyKind, options: BodyOptions) -> Self {
        let material = surface_for(kind, &options);
        let glow = matches!(kind, BodyKind::Planet | BodyKind::Station).then(|| Glow {
            radius: options.radius * 1.2,
            color: if options.emissive.is_black() {
                options.color
            } else {
                options.emissive
            },
            opacity: 0.2,
        });
        let euler = options.rotation;
        let transform = Transform::from_position_rotation(options.position, euler_quat(euler));
        Self {
            kind,
            options,
            material,
            glow,
            transform,
            euler,
        }
    }

    /// Advances self-rotation.
    pub fn update(&mut self, dt: f32) {
        let step = self.options.rotation_speed * dt * REFERENCE_FPS;
        self.euler.y += step;
        self.euler.x += step * 0.5;
        self.transform.rotation = euler_quat(self.euler);
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[must_use]
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.options.radius
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.options.category.as_deref()
    }

    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.options.data.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn material(&self) -> &SurfaceMaterial {
        &self.material
    }

    #[must_use]
    pub fn glow(&self) -> Option<&Glow> {
        self.glow.as_ref()
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Accumulated XYZ Euler rotation.
    #[must_use]
    pub fn euler(&self) -> Vec3 {
        self.euler
    }
}

fn euler_quat(e: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z)
}

fn surface_for(kind: BodyKind, o: &BodyOptions) -> SurfaceMaterial {
    let base = SurfaceMaterial {
        color: o.color,
        emissive: Rgb::BLACK,
        emissive_intensity: 0.0,
        roughness: 0.7,
        metalness: 0.3,
        opacity: 1.0,
        lit: true,
    };
    match kind {
        BodyKind::Planet => SurfaceMaterial {
            emissive: o.emissive,
            emissive_intensity: o.emissive_intensity,
            ..base
        },
        BodyKind::Asteroid => SurfaceMaterial {
            roughness: 0.9,
            metalness: 0.1,
            ..base
        },
        BodyKind::Station => SurfaceMaterial {
            emissive: o.emissive,
            emissive_intensity: o.emissive_intensity,
            roughness: 0.4,
            metalness: 0.8,
            ..base
        },
        BodyKind::Star => SurfaceMaterial {
            opacity: 0.8,
            lit: false,
            ..base
        },
    }
}

#[must_use]
pub fn create_planet(options: BodyOptions) -> CelestialBody {
    CelestialBody::new(BodyKind::Planet, options)
}

#[must_use]
pub fn create_asteroid(options: BodyOptions) -> CelestialBody {
    CelestialBody::new(BodyKind::Asteroid, options)
}

#[must_use]
pub fn create_station(options: BodyOptions) -> CelestialBody {
    CelestialBody::new(BodyKind::Station, options)
}

#[must_use]
pub fn create_star(options: BodyOptions) -> CelestialBody {
    CelestialBody::new(BodyKind::Star, options)
}
