use std::fmt;

use galaxy_config::ConfigError;
use galaxy_content::ContentError;
use galaxy_signboards::SignboardError;
use galaxy_weapons::PoolError;

/// One step of the engine tick, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Flight,
    Ship,
    Camera,
    Bodies,
    Weapons,
    Hits,
    Signboards,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Flight,
        Stage::Ship,
        Stage::Camera,
        Stage::Bodies,
        Stage::Weapons,
        Stage::Hits,
        Stage::Signboards,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Stage::Flight => "flight",
            Stage::Ship => "ship",
            Stage::Camera => "camera",
            Stage::Bodies => "bodies",
            Stage::Weapons => "weapons",
            Stage::Hits => "hits",
            Stage::Signboards => "signboards",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stage failure inside one tick. The engine logs it, restores the
/// subsystem and carries on with the next stage.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("{stage} stage produced a non-finite transform")]
    NonFinite { stage: Stage },

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Signboard(#[from] SignboardError),
}

/// Startup failures. These abort the run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Content(#[from] ContentError),
}
