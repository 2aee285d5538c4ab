use std::path::PathBuf;

/// Errors raised while loading a content file.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("cannot read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed content: {0}")]
    Parse(#[source] ron::error::SpannedError),
}
