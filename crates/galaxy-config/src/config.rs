//! Configuration structs with documented defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";
const APP_NAME: &str = "galaxy";

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings.
    pub window: WindowConfig,
    /// Ship handling and autopilot tuning.
    pub flight: FlightConfig,
    /// Camera follow, shake and world bounds.
    pub camera: CameraConfig,
    /// Laser and projectile tuning.
    pub weapons: WeaponsConfig,
    /// Frame-rate thresholds for adaptive quality.
    pub performance: PerformanceConfig,
    /// Scene sources and the random seed.
    pub world: WorldConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Flight controller configuration.
///
/// Per-frame factors are expressed against a 60 Hz reference frame and
/// rescaled by the actual frame delta at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    /// Cruise speed in units per second.
    pub speed: f32,
    /// Speed multiplier while Shift is held.
    pub turbo_multiplier: f32,
    /// Keyboard yaw/roll rate in radians per second.
    pub rotation_speed: f32,
    /// Radians per pixel of pointer motion.
    pub mouse_sensitivity: f32,
    /// Radians per pixel of touch motion.
    pub touch_sensitivity: f32,
    /// Extra gain applied on top of `touch_sensitivity`.
    pub touch_gain: f32,
    /// Clamp for a single pointer delta in mouse-flight mode, in pixels.
    pub mouse_flight_max_delta: f32,
    /// Clamp for a single drag delta in normal mode, in pixels.
    pub drag_max_delta: f32,
    /// Multiplier on `mouse_sensitivity` while dragging in normal mode.
    pub drag_sensitivity_scale: f32,
    /// Fraction of the orientation error closed per reference frame.
    pub orientation_factor: f32,
    /// Roll multiplier per reference frame while no roll is commanded.
    pub roll_damping: f32,
    /// Autopilot step as a fraction of `speed` per reference frame.
    pub autopilot_speed: f32,
    /// Autopilot stops when closer than this to its target.
    pub autopilot_arrival_distance: f32,
    /// Autopilot slerp factor per reference frame.
    pub autopilot_turn_rate: f32,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Free-mode look target smoothing per reference frame.
    pub smoothness: f32,
    /// Third-person distance behind the ship.
    pub third_person_distance: f32,
    /// Third-person height above the ship.
    pub third_person_height: f32,
    /// Third-person follow factor per reference frame.
    pub follow_lerp: f32,
    /// Cockpit offset in ship space.
    pub first_person_offset: [f32; 3],
    /// Lower world corner.
    pub bounds_min: [f32; 3],
    /// Upper world corner.
    pub bounds_max: [f32; 3],
    /// Maximum distance from the origin.
    pub max_distance: f32,
    /// Shake multiplier per reference frame.
    pub shake_decay: f32,
    /// Upper limit for accumulated shake.
    pub max_shake: f32,
}

/// Weapon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeaponsConfig {
    /// Pre-allocated bolts per weapon kind.
    pub pool_size: usize,
    pub laser_speed: f32,
    pub laser_lifetime: f32,
    pub laser_cooldown: f32,
    /// Visual beam length; the bolt spawns half of it ahead of the nose.
    pub laser_length: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_cooldown: f32,
    /// A bolt closer than this to a target counts as a hit.
    pub hit_radius: f32,
    /// Seconds a struck target stays highlighted.
    pub hit_flash: f32,
}

/// Adaptive quality configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Use the reduced mobile quality profile.
    pub is_mobile: bool,
    /// Honour a reduced-motion preference.
    pub reduced_motion: bool,
    /// Enter low-power mode below this frame rate.
    pub low_fps: u32,
    /// Leave low-power mode above this frame rate.
    pub recover_fps: u32,
    /// Frame rate the frame skipper aims for.
    pub adaptive_target_fps: u32,
    /// Frame rate above which frame skipping is relaxed.
    pub adaptive_recover_fps: u32,
    /// Seconds between frame-skip adjustments.
    pub adaptive_check_interval: f32,
}

/// World assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for every random stream (shake, float phases, drone phases).
    pub seed: u64,
    /// JSON signboard scene. `None` builds an empty scene.
    pub signboards: Option<PathBuf>,
    /// RON content file. `None` uses empty content.
    pub content: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every event drained from the queue at debug level.
    pub log_events: bool,
}

// ── Defaults ──

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Galaxy".to_string(),
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            speed: 80.0,
            turbo_multiplier: 2.5,
            rotation_speed: 5.0,
            mouse_sensitivity: 0.002,
            touch_sensitivity: 0.0045,
            touch_gain: 1.4,
            mouse_flight_max_delta: 100.0,
            drag_max_delta: 50.0,
            drag_sensitivity_scale: 0.01,
            orientation_factor: 0.2,
            roll_damping: 0.92,
            autopilot_speed: 0.03,
            autopilot_arrival_distance: 40.0,
            autopilot_turn_rate: 0.05,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 10_000.0,
            smoothness: 0.08,
            third_person_distance: 20.0,
            third_person_height: 6.0,
            follow_lerp: 0.15,
            first_person_offset: [0.0, 1.0, -3.0],
            bounds_min: [-1000.0, -600.0, -1000.0],
            bounds_max: [1000.0, 600.0, 1000.0],
            max_distance: 1200.0,
            shake_decay: 0.95,
            max_shake: 10.0,
        }
    }
}

impl Default for WeaponsConfig {
    fn default() -> Self {
        Self {
            pool_size: 20,
            laser_speed: 200.0,
            laser_lifetime: 3.0,
            laser_cooldown: 0.15,
            laser_length: 20.0,
            projectile_speed: 200.0,
            projectile_lifetime: 3.0,
            projectile_cooldown: 0.3,
            hit_radius: 2.5,
            hit_flash: 0.12,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            is_mobile: false,
            reduced_motion: false,
            low_fps: 30,
            recover_fps: 55,
            adaptive_target_fps: 45,
            adaptive_recover_fps: 50,
            adaptive_check_interval: 5.0,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            signboards: None,
            content: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_events: false,
        }
    }
}

/// Platform config directory for the galaxy runner, e.g.
/// `~/.config/galaxy` on Linux. Falls back to `./galaxy` when the OS exposes
/// no config directory.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

// ── Load / Save / Reload ──

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("expected a positive number, got {value}"),
                })
            }
        }

        fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("expected a value in [0, 1], got {value}"),
                })
            }
        }

        positive("flight.speed", self.flight.speed)?;
        positive("flight.autopilot_arrival_distance", self.flight.autopilot_arrival_distance)?;
        unit("flight.orientation_factor", self.flight.orientation_factor)?;
        unit("flight.roll_damping", self.flight.roll_damping)?;
        unit("flight.autopilot_turn_rate", self.flight.autopilot_turn_rate)?;
        unit("camera.follow_lerp", self.camera.follow_lerp)?;
        unit("camera.shake_decay", self.camera.shake_decay)?;
        positive("camera.max_distance", self.camera.max_distance)?;
        positive("weapons.hit_radius", self.weapons.hit_radius)?;
        positive("weapons.laser_lifetime", self.weapons.laser_lifetime)?;
        positive("weapons.projectile_lifetime", self.weapons.projectile_lifetime)?;
        positive("weapons.laser_speed", self.weapons.laser_speed)?;
        positive("weapons.projectile_speed", self.weapons.projectile_speed)?;
        if self.weapons.laser_cooldown < 0.0 || self.weapons.projectile_cooldown < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "weapons",
                reason: "cooldowns must not be negative".to_string(),
            });
        }
        let (min, max) = (self.camera.bounds_min, self.camera.bounds_max);
        if min.iter().zip(max).any(|(lo, hi)| !(*lo < hi)) {
            return Err(ConfigError::InvalidValue {
                field: "camera.bounds",
                reason: format!("lower corner {min:?} must lie below upper corner {max:?}"),
            });
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window",
                reason: "viewport must be non-empty".to_string(),
            });
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("speed: 80.0"));
        assert!(ron_str.contains("pool_size: 20"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.world.signboards = Some(PathBuf::from("boards.json"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = ron::from_str("(flight: (speed: 120.0))").unwrap();
        assert_eq!(config.flight.speed, 120.0);
        assert_eq!(config.flight.turbo_multiplier, 2.5);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.weapons.pool_size = 8;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("galaxy");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.flight.speed = 95.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().flight.speed, 95.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_default_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.flight.orientation_factor = 1.5;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "flight.orientation_factor",
                ..
            }
        ));

        let mut config = Config::default();
        config.weapons.hit_radius = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.camera.bounds_min[1] = 700.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "camera.bounds",
                ..
            })
        ));
    }

    #[test]
    fn test_default_config_dir_ends_with_app_name() {
        assert!(default_config_dir().ends_with(APP_NAME));
    }
}
