//! Project loading error types

use std::path::PathBuf;
use thiserror::Error;

use crate::permutation::ConfigError;

/// Errors that can occur while loading projects into a session.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Directory has no kiln.toml
    #[error("Not a kiln project: kiln.toml not found in {0}")]
    NotProject(PathBuf),

    /// Projects include each other
    #[error("Include cycle: {0}")]
    IncludeCycle(String),

    /// Field declaration, pin or open rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization/deserialization error
    #[error("TOML parse error: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ProjectError {
    fn from(e: toml::de::Error) -> Self {
        ProjectError::Toml(e.to_string())
    }
}

impl From<toml::ser::Error> for ProjectError {
    fn from(e: toml::ser::Error) -> Self {
        ProjectError::Toml(e.to_string())
    }
}

/// Result type for project operations
pub type ProjectResult<T> = Result<T, ProjectError>;
