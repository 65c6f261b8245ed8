//! In-place patching of the solver's settings document.
//!
//! The settings file is plain text, one `section/key = value` entry per
//! line; `#` comments and blank lines are permitted. Patching replaces
//! only the value portion of lines whose key already occurs in the
//! document - unknown keys are reported and skipped, never inserted, so
//! the solver is never handed an entry it does not recognize.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use gobn_core::{GobnError, Result};

/// An ordered batch of setting updates.
///
/// # Examples
///
/// ```
/// use gobn_config::SettingsPatch;
///
/// let patch = SettingsPatch::new()
///     .set("delimiter", "whitespace")
///     .set("gobnilp/scoring/alpha", 10);
/// assert_eq!(patch.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    entries: Vec<(String, String)>,
}

impl SettingsPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one update. Values are formatted with `ToString`, so
    /// numbers and booleans can be passed directly.
    pub fn set(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.entries.push((name.into(), value.to_string()));
        self
    }

    /// Number of updates in the patch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the patch contains no updates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates updates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// The solver's settings document on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store over the given settings file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SettingsStore { path: path.into() }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies a batch of updates to the document, best effort.
    ///
    /// Each name is matched against its *first textual occurrence* in the
    /// document; the remainder of that line after `=` is replaced with
    /// the new value, re-quoted if the existing value was quoted. Names
    /// with no occurrence (or whose line carries no `=`) are skipped and
    /// returned as diagnostics - a partial application is deliberate, not
    /// an error.
    ///
    /// Known limitation: a name that is a substring of a longer key
    /// occurring earlier in the document patches that earlier line. Keep
    /// names fully qualified (`gobnilp/scoring/alpha`) when the short
    /// form is ambiguous.
    ///
    /// The document is written back as a whole-file replace.
    ///
    /// # Errors
    ///
    /// Returns `GobnError::Io` if the file cannot be read or written.
    pub fn apply(&self, patch: &SettingsPatch) -> Result<Vec<String>> {
        let mut text = fs::read_to_string(&self.path)?;
        let mut unknown = Vec::new();

        for (name, value) in patch.iter() {
            if Self::patch_value(&mut text, name, value) {
                debug!(name, value, "patched setting");
            } else {
                let diagnostic = GobnError::UnknownSetting {
                    name: name.to_string(),
                };
                warn!("{diagnostic}, moving on");
                unknown.push(name.to_string());
            }
        }

        fs::write(&self.path, text)?;
        Ok(unknown)
    }

    /// Replaces the value on the line holding the first occurrence of
    /// `name`. Returns false if the name (or an `=` on its line) is
    /// absent.
    fn patch_value(text: &mut String, name: &str, value: &str) -> bool {
        let Some(start) = text.find(name) else {
            return false;
        };
        let line_end = text[start..]
            .find('\n')
            .map(|offset| start + offset)
            .unwrap_or(text.len());
        let Some(eq) = text[start..line_end].find('=') else {
            return false;
        };

        let value_start = start + eq + 1;
        let quoted = text[value_start..line_end].contains('"');
        let replacement = if quoted {
            format!(" \"{value}\"")
        } else {
            format!(" {value}")
        };
        text.replace_range(value_start..line_end, &replacement);
        true
    }
}
