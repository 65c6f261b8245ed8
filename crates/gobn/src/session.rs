//! The high-level session over install, settings, constraints, and
//! learning.

use gobn_build::Toolchain;
use gobn_config::{write_constraints, LearnerConfig, SettingsPatch, SettingsStore};
use gobn_core::{ConstraintSet, Result, RunResult};
use gobn_runner::{DataSource, Runner};

use crate::console;

/// One learner installation and the operations against it.
///
/// Owns the build state machine, the settings store, and the runner,
/// all derived from a single [`LearnerConfig`]. The session does not
/// verify an existing installation: a solver binary left behind by an
/// earlier run is used as-is, and a missing one surfaces as an
/// invocation error at learn time.
pub struct Gobn {
    config: LearnerConfig,
    toolchain: Toolchain,
    settings: SettingsStore,
    runner: Runner,
}

impl Gobn {
    /// Creates a session from the given configuration.
    ///
    /// With `verbose` set, console output is initialized and child
    /// process output is echoed while builds and runs are in flight.
    pub fn new(config: LearnerConfig) -> Self {
        if config.verbose {
            console::init();
        }
        Gobn {
            toolchain: Toolchain::new(&config),
            settings: SettingsStore::new(&config.settings_file),
            runner: Runner::new(&config),
            config,
        }
    }

    /// The configuration this session was built from.
    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// The build state machine.
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Unpacks both source archives.
    pub fn unpack(&mut self) -> Result<()> {
        self.toolchain.unpack()
    }

    /// Builds the engine, links it, and builds the solver.
    pub fn make(&mut self) -> Result<()> {
        self.toolchain.make()
    }

    /// Deletes both build trees and resets the install state.
    pub fn clean(&mut self) -> Result<()> {
        self.toolchain.clean()
    }

    /// Applies a settings patch; returns the names that were skipped as
    /// unknown.
    pub fn set_settings(&self, patch: &SettingsPatch) -> Result<Vec<String>> {
        self.settings.apply(patch)
    }

    /// Writes constraint directives to the configured constraint file.
    pub fn set_constraints(&self, set: &ConstraintSet, append: bool) -> Result<()> {
        write_constraints(&self.config.constraints_file, set, append)
    }

    /// Runs the solver over `source` with the current settings.
    pub fn learn(&self, source: impl Into<DataSource>) -> Result<RunResult> {
        self.runner.learn(source, &SettingsPatch::new(), None)
    }

    /// Runs the solver with per-run setting overrides and constraints.
    pub fn learn_with(
        &self,
        source: impl Into<DataSource>,
        overrides: &SettingsPatch,
        constraints: Option<&ConstraintSet>,
    ) -> Result<RunResult> {
        self.runner.learn(source, overrides, constraints)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use gobn_core::Independence;

    use super::*;

    fn session_in(dir: &TempDir) -> Gobn {
        let config = LearnerConfig::new(dir.path().join("learn"), dir.path().join("engine"))
            .with_settings_file(dir.path().join("mysettings.txt"))
            .with_constraints_file(dir.path().join("myconstraints.txt"));
        fs::write(&config.settings_file, "gobnilp/scoring/alpha = 1\n").unwrap();
        Gobn::new(config)
    }

    #[test]
    fn settings_go_through_the_store() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);

        let unknown = session
            .set_settings(&SettingsPatch::new().set("alpha", 4).set("bogus", 1))
            .unwrap();

        assert_eq!(unknown, vec!["bogus".to_string()]);
        let text = fs::read_to_string(&session.config().settings_file).unwrap();
        assert_eq!(text, "gobnilp/scoring/alpha = 4\n");
    }

    #[test]
    fn constraints_land_in_the_configured_file() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);

        let mut set = ConstraintSet::new();
        set.require_edge("C", "A").unwrap();
        set.add_independence(Independence::new(["A"], ["B"]).unwrap());
        session.set_constraints(&set, false).unwrap();

        let text = fs::read_to_string(&session.config().constraints_file).unwrap();
        assert_eq!(text, "A<-C\nA_|_B\n");
    }

    #[test]
    fn a_fresh_session_starts_at_init() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);

        assert!(!session.toolchain().solver().unpacked());
        assert!(!session.toolchain().engine().unpacked());
    }
}
