//! Error types for the gobn workspace

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for gobn operations
#[derive(Debug, Error)]
pub enum GobnError {
    /// Archive missing or extraction exited non-zero
    #[error("failed to unpack {package}: {output}")]
    Unpack { package: String, output: String },

    /// A native build step exited non-zero
    #[error("failed to build {package}: {output}")]
    Build { package: String, output: String },

    /// The solver was linked or built before the engine reached BUILT
    #[error("engine is not ready, cannot link or build the solver: {output}")]
    DependencyNotReady { output: String },

    /// A settings name with no occurrence in the settings document.
    ///
    /// Reported per key; `SettingsStore::apply` skips the key instead of
    /// aborting the batch.
    #[error("{name} is not a recognized setting")]
    UnknownSetting { name: String },

    /// A variable name collides with the directive grammar's reserved tokens
    #[error("invalid variable name {name:?}: contains a reserved token")]
    InvalidVariableName { name: String },

    /// The same directed edge was both required and forbidden
    #[error("edge {parent} -> {child} is both required and forbidden")]
    ConflictingConstraint { parent: String, child: String },

    /// The solver binary is missing or not executable
    #[error("cannot invoke solver binary at {}", .path.display())]
    Invocation { path: PathBuf },

    /// Underlying filesystem or process error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gobn operations
pub type Result<T> = std::result::Result<T, GobnError>;
