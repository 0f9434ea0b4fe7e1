use std::io;
use std::path::PathBuf;

use hand_tracker::TrackerError;
use thiserror::Error;

/// Setup failures.  Nothing in the per-frame path returns one of these.
#[derive(Debug, Error)]
pub enum HandParticlesError {
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("cannot open video input {path}: {source}")]
    InputOpen {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("window: {0}")]
    Window(String),

    #[error("session worker: {0}")]
    Worker(String),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
