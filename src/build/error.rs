//! Build error types

use thiserror::Error;

use crate::optimizer::OptimizeError;
use crate::permutation::ConfigError;
use crate::project::ProjectError;

/// Errors raised while configuring or running a build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Build settings rejected by the field engine
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Projects could not be loaded
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Some units of an artifact failed
    #[error("Artifact {artifact}: {} unit(s) failed: {}", .units.len(), .units.join(", "))]
    UnitsFailed { artifact: String, units: Vec<String> },

    /// A prepare hook or the optimizer rejected a unit
    #[error("Unit {unit}: {source}")]
    Unit {
        unit: String,
        #[source]
        source: OptimizeError,
    },
}

/// Result type for build operations
pub type BuildResult<T> = Result<T, BuildError>;
