//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while loading, saving, or checking `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config directory or file could not be written.
    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("malformed config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// The in-memory config could not be turned into RON.
    #[error("cannot serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A numeric setting is outside the range the simulation accepts.
    #[error("config value `{field}` is invalid: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
