//! Dataset serialization to the solver's delimited row format.

use std::fs;
use std::io;
use std::path::Path;

/// A discrete dataset: rows of string cells, optionally headed by
/// variable names.
///
/// Cells are already-formatted text; the caller renders numeric data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    names: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Creates a dataset without a header row.
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = String>,
    {
        Dataset {
            names: None,
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().collect())
                .collect(),
        }
    }

    /// Attaches variable names, written as a header row.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Variable names, if a header is present.
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Writes the dataset to `path`, one delimited row per record, the
    /// header line first when names are present.
    pub fn write_dat(&self, path: &Path, delimiter: &str) -> io::Result<()> {
        let mut out = String::new();
        if let Some(names) = &self.names {
            out.push_str(&names.join(delimiter));
            out.push('\n');
        }
        for row in &self.rows {
            out.push_str(&row.join(delimiter));
            out.push('\n');
        }
        fs::write(path, out)
    }
}
