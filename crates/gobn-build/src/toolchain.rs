//! The build state machine over the solver and engine packages.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use gobn_config::LearnerConfig;
use gobn_core::{CommandSpec, GobnError, Result, RunResult};

use crate::package::{ArchiveLayout, PackageState};

/// Marker the link script prints on a fresh link.
const LINK_OK_MARKER: &str = "SUCCEEDED";
/// Marker the link script prints when the link is already in place.
const LINK_EXISTS_MARKER: &str = "exists";

/// Outcome of the link step. Both variants allow the solver build to
/// proceed; a failed link surfaces as an error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The engine location was recorded in the solver's build tree.
    Linked,
    /// A previous run already recorded it.
    AlreadyLinked,
}

/// Sequences unpack, engine build, link, and solver build.
///
/// All mutating operations take `&mut self`, so two callers cannot drive
/// the same package concurrently. Failures leave completed state intact:
/// a package that reached UNPACKED stays unpacked when its build fails,
/// and the whole operation can simply be retried.
#[derive(Debug)]
pub struct Toolchain {
    engine: PackageState,
    solver: PackageState,
    cplex: bool,
    echo: bool,
}

impl Toolchain {
    /// Creates a toolchain over the packages described by `config`.
    pub fn new(config: &LearnerConfig) -> Self {
        let engine = PackageState::new(
            "scip",
            &config.engine_dir,
            config.engine_archive(),
            config.engine_suite_dir(),
            config.engine_src_dir(),
            ArchiveLayout::SelfContained,
        );
        let solver = PackageState::new(
            "gobnilp",
            &config.solver_dir,
            config.solver_archive(),
            config.solver_build_dir(),
            config.solver_build_dir(),
            ArchiveLayout::NeedsDir,
        );
        Toolchain {
            engine,
            solver,
            cplex: config.cplex,
            echo: config.verbose,
        }
    }

    /// The engine package.
    pub fn engine(&self) -> &PackageState {
        &self.engine
    }

    /// The solver package.
    pub fn solver(&self) -> &PackageState {
        &self.solver
    }

    /// Unpacks both archives.
    pub fn unpack(&mut self) -> Result<()> {
        self.unpack_solver()?;
        self.unpack_engine()
    }

    /// Extracts the solver archive into its build directory.
    ///
    /// The directory is created first (`create_dir_all`, so re-running
    /// against an existing directory is fine). On failure `unpacked`
    /// stays false and the call can be retried.
    pub fn unpack_solver(&mut self) -> Result<()> {
        Self::unpack_package(&mut self.solver, self.echo)
    }

    /// Extracts the engine archive; the suite directory comes out of the
    /// archive itself.
    pub fn unpack_engine(&mut self) -> Result<()> {
        Self::unpack_package(&mut self.engine, self.echo)
    }

    fn unpack_package(package: &mut PackageState, echo: bool) -> Result<()> {
        if !package.archive().exists() {
            return Err(GobnError::Unpack {
                package: package.name().to_string(),
                output: format!("archive {} not found", package.archive().display()),
            });
        }

        let dest = match package.layout() {
            ArchiveLayout::NeedsDir => {
                fs::create_dir_all(package.build_dir())?;
                package.build_dir()
            }
            ArchiveLayout::SelfContained => package.root(),
        };

        info!(package = package.name(), "unpacking");
        let result = CommandSpec::new("tar")
            .arg("-xzf")
            .arg(package.archive())
            .arg("-C")
            .arg(dest)
            .echo(echo)
            .run()?;
        if !result.success {
            return Err(GobnError::Unpack {
                package: package.name().to_string(),
                output: result.output,
            });
        }

        package.set_unpacked();
        Ok(())
    }

    /// Builds the engine.
    ///
    /// Auto-heals a missing unpack exactly once; if unpacking fails the
    /// error propagates and no make is attempted. The engine must reach
    /// BUILT before [`make_solver`](Self::make_solver) can link.
    pub fn make_engine(&mut self) -> Result<()> {
        if !self.engine.unpacked() {
            info!("engine needs to be unpacked, trying that now");
            self.unpack_engine()?;
        }

        info!("making engine, this may take a few minutes");
        let result = self.make_command(self.engine.build_dir())?;
        if !result.success {
            return Err(GobnError::Build {
                package: self.engine.name().to_string(),
                output: result.output,
            });
        }

        self.engine.set_built();
        info!("engine build complete");
        Ok(())
    }

    /// Runs the engine's own test target and returns the raw outcome.
    pub fn test_engine(&self) -> Result<RunResult> {
        CommandSpec::new("make")
            .arg("test")
            .arg("-C")
            .arg(self.engine.build_dir())
            .echo(self.echo)
            .run()
    }

    /// Links the engine into the solver's build tree, then builds the
    /// solver.
    ///
    /// If the engine is not built yet, exactly one
    /// [`make_engine`](Self::make_engine) attempt is made; if that fails
    /// the call aborts with `DependencyNotReady` and the solver build is
    /// not attempted. A failed link likewise aborts before the make.
    pub fn make_solver(&mut self) -> Result<()> {
        if !self.engine.built() {
            info!("engine must be made before the solver, building it now");
            if let Err(err) = self.make_engine() {
                return Err(GobnError::DependencyNotReady {
                    output: err.to_string(),
                });
            }
        }

        if !self.solver.unpacked() {
            info!("solver needs to be unpacked, trying that now");
            self.unpack_solver()?;
        }

        self.link_engine()?;

        info!("making solver");
        let result = self.make_command(self.solver.build_dir())?;
        if !result.success {
            return Err(GobnError::Build {
                package: self.solver.name().to_string(),
                output: result.output,
            });
        }

        self.solver.set_built();
        info!("solver build complete");
        Ok(())
    }

    /// Builds everything in dependency order: engine, then solver.
    /// Fail-fast: the first failing stage aborts the rest.
    pub fn make(&mut self) -> Result<()> {
        self.make_engine()?;
        self.make_solver()
    }

    /// Records the engine's location inside the solver's build tree.
    ///
    /// Normally run as part of [`make_solver`](Self::make_solver); call
    /// it directly to re-link after the engine tree has moved. This is
    /// the one step that must run with the working directory overridden:
    /// the solver's configure script resolves paths relative to its own
    /// tree.
    ///
    /// # Errors
    ///
    /// `GobnError::Build` with the captured output when the script
    /// reports neither a fresh nor an existing link.
    pub fn link_engine(&self) -> Result<LinkOutcome> {
        info!("linking engine into the solver build tree");
        let result = CommandSpec::new("./configure.sh")
            .arg(self.engine.export_dir())
            .current_dir(self.solver.build_dir())
            .echo(self.echo)
            .run()?;

        if result.output.contains(LINK_OK_MARKER) {
            info!("engine linked");
            Ok(LinkOutcome::Linked)
        } else if result.output.contains(LINK_EXISTS_MARKER) {
            info!("engine already linked, moving on");
            Ok(LinkOutcome::AlreadyLinked)
        } else {
            warn!("linking failed, not making the solver");
            Err(GobnError::Build {
                package: self.solver.name().to_string(),
                output: result.output,
            })
        }
    }

    fn make_command(&self, dir: &Path) -> Result<RunResult> {
        let mut command = CommandSpec::new("make");
        if self.cplex {
            command = command.arg("LPS=cpx");
        }
        command.arg("-C").arg(dir).echo(self.echo).run()
    }

    #[cfg(test)]
    pub(crate) fn force_engine_built(&mut self) {
        self.engine.set_unpacked();
        self.engine.set_built();
    }

    #[cfg(test)]
    pub(crate) fn force_solver_unpacked(&mut self) {
        self.solver.set_unpacked();
    }

    /// Deletes both build trees and resets both packages to INIT.
    ///
    /// A build tree that was never created is not an error, so `clean`
    /// can be called repeatedly.
    pub fn clean(&mut self) -> Result<()> {
        for package in [&mut self.solver, &mut self.engine] {
            match fs::remove_dir_all(package.build_dir()) {
                Ok(()) => info!(package = package.name(), "removed build tree"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
            package.reset();
        }
        Ok(())
    }
}
