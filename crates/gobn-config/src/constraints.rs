//! Writing encoded constraint sets to the solver's constraint file.
//!
//! The constraint file is referenced from the settings document through
//! the `gobnilp/dagconstraintsfile` entry; the solver reads it at the
//! start of a run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use gobn_core::{ConstraintSet, Result};

/// Writes `set` to the constraint file at `path`.
///
/// With `append` false the file is truncated first; with `append` true
/// the directives are added after any existing content. The set is
/// encoded in full before the file is touched, so a failed encode never
/// leaves a partial constraint file behind.
///
/// # Errors
///
/// Returns `GobnError::Io` if the file cannot be opened or written.
pub fn write_constraints(path: impl AsRef<Path>, set: &ConstraintSet, append: bool) -> Result<()> {
    let text = set.encode();

    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    let mut file = options.open(path.as_ref())?;
    file.write_all(text.as_bytes())?;
    debug!(
        path = %path.as_ref().display(),
        append,
        "wrote constraint directives"
    );
    Ok(())
}
