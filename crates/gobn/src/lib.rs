//! gobn - install, configure, and drive the GOBNILP structure learner
//!
//! GOBNILP learns Bayesian-network structure from discrete data by
//! integer programming over the SCIP engine. This crate wraps the whole
//! lifecycle: unpacking and compiling the two source packages, patching
//! the solver's settings document, encoding structure constraints, and
//! invoking the resulting binary.
//!
//! # Example
//!
//! ```no_run
//! use gobn::{Gobn, LearnerConfig, SettingsPatch};
//!
//! let config = LearnerConfig::new("/opt/learn", "/opt/engine");
//! let mut session = Gobn::new(config);
//!
//! session.unpack()?;
//! session.make()?;
//! session.set_settings(&SettingsPatch::new().set("gobnilp/scoring/alpha", 10))?;
//! let result = session.learn("/opt/learn/data/asia_100.dat")?;
//! println!("{}", result.output);
//! # Ok::<(), gobn::GobnError>(())
//! ```

// Core types
pub use gobn_core::{
    CommandSpec, ConstraintSet, GobnError, Independence, Result, RunResult, RESERVED_TOKENS,
};

// Configuration and the settings document
pub use gobn_config::{
    write_constraints, ConfigError, LearnerConfig, SettingsPatch, SettingsStore,
};

// Build state machine
pub use gobn_build::{ArchiveLayout, LinkOutcome, PackageState, Toolchain};

// Dataset serialization and solver invocation
pub use gobn_runner::{DataSource, Dataset, Runner};

pub mod console;

mod session;
pub use session::Gobn;
