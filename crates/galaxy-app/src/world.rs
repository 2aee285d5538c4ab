//! World assembly: the ship, the solar system, the signboard scene and the
//! content source, built once at startup from the config.

use std::path::Path;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use galaxy_config::Config;
use galaxy_content::{ContentProvider, StaticContentProvider};
use galaxy_perf::QualitySettings;
use galaxy_player::Spaceship;
use galaxy_signboards::SignboardSystem;
use galaxy_space::{SolarSystem, Starfield, default_orbits};

use crate::error::AppError;

/// Where the ship starts, looking back at the sun.
pub const SHIP_START: Vec3 = Vec3::new(0.0, 8.0, 300.0);

pub struct World {
    pub ship: Spaceship,
    pub solar: SolarSystem,
    /// Sized to the device's particle budget.
    pub starfield: Starfield,
    pub signboards: SignboardSystem,
    pub content: Box<dyn ContentProvider>,
    /// Seeded from `world.seed`; every random stream in the run draws from it.
    pub rng: ChaCha8Rng,
}

impl World {
    /// A world with no signboards, drawing content from `content`.
    #[must_use]
    pub fn new(config: &Config, content: Box<dyn ContentProvider>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);
        let mut ship = Spaceship::new(SHIP_START);
        ship.look_at(Vec3::ZERO);
        let solar = SolarSystem::new(&default_orbits(), &mut rng);
        let perf = &config.performance;
        let stars = QualitySettings::for_device(perf.is_mobile, perf.reduced_motion).max_particles;
        let starfield = Starfield::new(config.world.seed, stars as usize);
        Self {
            ship,
            solar,
            starfield,
            signboards: SignboardSystem::new(),
            content,
            rng,
        }
    }

    /// Builds the world the config describes.
    ///
    /// A content file that cannot be loaded is a startup error. A signboard
    /// scene that cannot be loaded only leaves the scene empty.
    pub fn build(config: &Config) -> Result<Self, AppError> {
        let content: Box<dyn ContentProvider> = match &config.world.content {
            Some(path) => Box::new(StaticContentProvider::load(path)?),
            None => {
                info!("No content file configured, panels stay empty");
                Box::new(StaticContentProvider::default())
            }
        };
        let mut world = Self::new(config, content);
        if let Some(path) = &config.world.signboards {
            world.load_signboards_file(path);
        }
        info!(
            planets = world.solar.planets().len(),
            signboards = world.signboards.len(),
            "World assembled"
        );
        Ok(world)
    }

    /// Adds the boards of a JSON scene. Returns how many were added; a
    /// malformed document adds none.
    pub fn load_signboards_str(&mut self, json: &str) -> usize {
        match self.signboards.load_scene_str(json, &mut self.rng) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "Signboard scene rejected, continuing without it");
                0
            }
        }
    }

    pub fn load_signboards_file(&mut self, path: &Path) -> usize {
        match self.signboards.load_scene_file(path, &mut self.rng) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Signboard scene unavailable, continuing without it");
                0
            }
        }
    }
}
