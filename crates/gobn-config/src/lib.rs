//! Configuration system for the gobn learner.
//!
//! Two layers live here. [`LearnerConfig`] is the wrapper's own
//! configuration - where the two source packages live, which versions to
//! expect, where the settings/constraint files are - loadable from TOML
//! or YAML. [`SettingsStore`] patches the solver's *own* settings
//! document, the `section/key = value` file passed to the binary with
//! `-g=<file>`.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use gobn_config::LearnerConfig;
//!
//! let config = LearnerConfig::from_toml_str(r#"
//!     solver_dir = "/opt/gobnilp"
//!     engine_dir = "/opt/scip"
//!     cplex = true
//! "#).unwrap();
//!
//! assert_eq!(config.solver_version, "1.6.1");
//! assert!(config.cplex);
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use gobn_config::LearnerConfig;
//!
//! let config = LearnerConfig::load("learner.toml").unwrap_or_default();
//! // Proceeds with defaults if the file doesn't exist
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod constraints;
pub mod settings;


pub use constraints::write_constraints;
pub use settings::{SettingsPatch, SettingsStore};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn default_solver_version() -> String {
    "1.6.1".to_string()
}

fn default_engine_version() -> String {
    "3.1.1".to_string()
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("mysettings.txt")
}

fn default_constraints_file() -> PathBuf {
    PathBuf::from("myconstraints.txt")
}

/// Main learner configuration.
///
/// `solver_dir` and `engine_dir` are the directories holding the two
/// source archives; the unpacked build trees land next to them. All
/// other paths the workspace touches are derived from these fields via
/// the accessor methods.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LearnerConfig {
    /// Directory containing the solver archive and its build tree.
    #[serde(default)]
    pub solver_dir: PathBuf,

    /// Directory containing the engine archive and its build tree.
    #[serde(default)]
    pub engine_dir: PathBuf,

    /// Solver source version, used to derive archive and directory names.
    #[serde(default = "default_solver_version")]
    pub solver_version: String,

    /// Engine source version.
    #[serde(default = "default_engine_version")]
    pub engine_version: String,

    /// The solver's settings document.
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,

    /// The constraint file referenced from the settings document.
    #[serde(default = "default_constraints_file")]
    pub constraints_file: PathBuf,

    /// Link the builds against CPLEX instead of the bundled LP solver.
    #[serde(default)]
    pub cplex: bool,

    /// Echo child-process output while builds and runs are in flight.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        LearnerConfig {
            solver_dir: PathBuf::new(),
            engine_dir: PathBuf::new(),
            solver_version: default_solver_version(),
            engine_version: default_engine_version(),
            settings_file: default_settings_file(),
            constraints_file: default_constraints_file(),
            cplex: false,
            verbose: false,
        }
    }
}

impl LearnerConfig {
    /// Creates a configuration rooted at the given solver and engine
    /// directories, with default versions and file names.
    pub fn new(solver_dir: impl Into<PathBuf>, engine_dir: impl Into<PathBuf>) -> Self {
        LearnerConfig {
            solver_dir: solver_dir.into(),
            engine_dir: engine_dir.into(),
            ..Default::default()
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the settings-file path.
    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = path.into();
        self
    }

    /// Sets the constraint-file path.
    pub fn with_constraints_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.constraints_file = path.into();
        self
    }

    /// Overrides the solver and engine versions.
    pub fn with_versions(
        mut self,
        solver_version: impl Into<String>,
        engine_version: impl Into<String>,
    ) -> Self {
        self.solver_version = solver_version.into();
        self.engine_version = engine_version.into();
        self
    }

    /// Enables CPLEX-linked builds.
    pub fn with_cplex(mut self, cplex: bool) -> Self {
        self.cplex = cplex;
        self
    }

    /// Enables child-process output echo.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The solver's unpacked build tree: `<solver_dir>/gobnilp<version>`.
    pub fn solver_build_dir(&self) -> PathBuf {
        self.solver_dir.join(format!("gobnilp{}", self.solver_version))
    }

    /// The solver source archive: `<solver_dir>/gobnilp<version>.tar.gz`.
    pub fn solver_archive(&self) -> PathBuf {
        self.solver_dir
            .join(format!("gobnilp{}.tar.gz", self.solver_version))
    }

    /// The engine's unpacked suite tree:
    /// `<engine_dir>/scipoptsuite-<version>`.
    pub fn engine_suite_dir(&self) -> PathBuf {
        self.engine_dir
            .join(format!("scipoptsuite-{}", self.engine_version))
    }

    /// The engine directory inside the suite, the one the solver links
    /// against: `<suite>/scip-<version>`.
    pub fn engine_src_dir(&self) -> PathBuf {
        self.engine_suite_dir()
            .join(format!("scip-{}", self.engine_version))
    }

    /// The engine source archive: `<engine_dir>/scipoptsuite-<version>.tgz`.
    pub fn engine_archive(&self) -> PathBuf {
        self.engine_dir
            .join(format!("scipoptsuite-{}.tgz", self.engine_version))
    }

    /// The solver binary produced by a successful build.
    pub fn solver_bin(&self) -> PathBuf {
        self.solver_build_dir().join("bin").join("gobnilp")
    }

    /// Where serialized datasets are written before a run.
    pub fn data_dir(&self) -> PathBuf {
        self.solver_dir.join("data")
    }
}
