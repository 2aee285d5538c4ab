use std::path::PathBuf;

use galaxy_events::TargetId;

/// Errors raised while loading or driving signboards.
#[derive(Debug, thiserror::Error)]
pub enum SignboardError {
    #[error("cannot read signboard scene {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed signboard scene: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("signboard scene must be a JSON array")]
    NotAnArray,

    #[error("invalid color for {field}: {value:?}")]
    InvalidColor { field: &'static str, value: String },

    #[error("invalid size for {field}: {value}")]
    InvalidSize { field: &'static str, value: f32 },

    #[error("no signboard owns {0}")]
    UnknownTarget(TargetId),
}
