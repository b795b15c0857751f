use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Asset manifest unavailable at {}: {reason}", path.display())]
    ManifestUnavailable { path: PathBuf, reason: String },

    #[error("{0} is only available on macOS")]
    UnsupportedPlatform(&'static str),

    #[error("Package cache clear failed: {0}")]
    CacheClear(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SweepError {
    pub fn manifest(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::ManifestUnavailable { path: path.into(), reason: reason.to_string() }
    }
}
