//! Invoking the solver binary and classifying the outcome.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use gobn_config::{write_constraints, LearnerConfig, SettingsPatch, SettingsStore};
use gobn_core::{CommandSpec, ConstraintSet, GobnError, Result, RunResult};

/// Fixed name for serialized datasets inside the data directory.
pub const DATA_FILE_NAME: &str = "userdata.dat";

/// Input format flag passed to the solver. Data files are always
/// written in the native `.dat` layout, so the flag is fixed.
const DATA_FORMAT: &str = "dat";

/// Default cell delimiter for serialized datasets.
const DEFAULT_DELIMITER: &str = ",";

/// What to learn from: an existing data file, or an in-memory dataset
/// serialized just before the run.
#[derive(Debug, Clone)]
pub enum DataSource {
    Path(PathBuf),
    Inline(crate::Dataset),
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        DataSource::Path(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        DataSource::Path(path.to_path_buf())
    }
}

impl From<&str> for DataSource {
    fn from(path: &str) -> Self {
        DataSource::Path(PathBuf::from(path))
    }
}

impl From<crate::Dataset> for DataSource {
    fn from(data: crate::Dataset) -> Self {
        DataSource::Inline(data)
    }
}

/// Runs the solver binary over a settings file, a constraint file, and
/// a data file.
#[derive(Debug)]
pub struct Runner {
    solver_bin: PathBuf,
    settings: SettingsStore,
    constraints_file: PathBuf,
    data_dir: PathBuf,
    delimiter: String,
    echo: bool,
}

impl Runner {
    /// Creates a runner over the paths described by `config`.
    pub fn new(config: &LearnerConfig) -> Self {
        Runner {
            solver_bin: config.solver_bin(),
            settings: SettingsStore::new(&config.settings_file),
            constraints_file: config.constraints_file.clone(),
            data_dir: config.data_dir(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            echo: config.verbose,
        }
    }

    /// Overrides the dataset delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// The binary this runner will invoke.
    pub fn solver_bin(&self) -> &Path {
        &self.solver_bin
    }

    /// Learns a network structure from `source`.
    ///
    /// `overrides` are applied to the settings document first, with the
    /// store's best-effort semantics. When `constraints` is given, the
    /// constraint file is overwritten with its directives; the settings
    /// document is expected to reference that file via
    /// `gobnilp/dagconstraintsfile`. An inline dataset is serialized
    /// into the data directory and its `delimiter`/`names` settings are
    /// registered before the run.
    ///
    /// The returned [`RunResult`] carries the merged stdout/stderr text
    /// whether the run succeeded or not.
    ///
    /// # Errors
    ///
    /// `GobnError::Invocation` if the solver binary is missing or not
    /// executable; `GobnError::Io` for filesystem failures while staging
    /// inputs.
    pub fn learn(
        &self,
        source: impl Into<DataSource>,
        overrides: &SettingsPatch,
        constraints: Option<&ConstraintSet>,
    ) -> Result<RunResult> {
        if let Some(set) = constraints {
            write_constraints(&self.constraints_file, set, false)?;
        }
        if !overrides.is_empty() {
            self.settings.apply(overrides)?;
        }

        let data_path = match source.into() {
            DataSource::Path(path) => path,
            DataSource::Inline(data) => self.write_data(&data)?,
        };

        self.invoke(&data_path)
    }

    /// Serializes an inline dataset and registers its format settings.
    fn write_data(&self, data: &crate::Dataset) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(DATA_FILE_NAME);
        data.write_dat(&path, &self.delimiter)?;

        let mut patch = SettingsPatch::new().set("delimiter", &self.delimiter);
        if data.names().is_some() {
            patch = patch.set("names", "TRUE");
        }
        self.settings.apply(&patch)?;

        Ok(path)
    }

    fn invoke(&self, data_path: &Path) -> Result<RunResult> {
        if !self.solver_bin.is_file() {
            return Err(GobnError::Invocation {
                path: self.solver_bin.clone(),
            });
        }

        info!("running the solver, this may take a few minutes");
        let result = CommandSpec::new(&self.solver_bin)
            .arg(format!("-g={}", self.settings.path().display()))
            .arg(format!("-f={DATA_FORMAT}"))
            .arg(data_path)
            .echo(self.echo)
            .run()
            .map_err(|err| match err {
                GobnError::Io(io_err)
                    if matches!(
                        io_err.kind(),
                        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
                    ) =>
                {
                    GobnError::Invocation {
                        path: self.solver_bin.clone(),
                    }
                }
                other => other,
            })?;

        if result.success {
            info!("solver run succeeded");
        } else {
            warn!("solver run failed:\n{}", result.output);
        }
        Ok(result)
    }
}
