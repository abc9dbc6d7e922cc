use std::path::PathBuf;

use thiserror::Error;

/// Failures at the audio/file boundary. Controllers log these and carry on;
/// none of them is allowed to take the app down.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no audio output device: {0}")]
    Device(String),

    #[error("could not decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    #[error("playlist is empty")]
    EmptyPlaylist,

    #[error("no clip loaded")]
    NoClip,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
