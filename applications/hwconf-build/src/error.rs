//! Build tool error types
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{} directory not found", .0.display())]
    HwconfDirMissing(PathBuf),

    #[error("No board named `{0}`")]
    UnknownBoard(String),

    #[error("Board name `{0}` cannot be used as a directory name")]
    UnsafeBoardName(String),

    #[error("{board}: unknown target `{target}`")]
    UnknownTarget { board: String, target: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for BuildError {
    fn from(err: config::ConfigError) -> Self {
        BuildError::Config(err.to_string())
    }
}
