//! Build state for one native source package.

use std::path::{Path, PathBuf};

/// How an archive behaves when extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveLayout {
    /// The archive expands into the extraction directory, so a dedicated
    /// build directory must be created for it first.
    NeedsDir,
    /// The archive creates its own top-level directory under the
    /// extraction root.
    SelfContained,
}

/// One native source package and its position in the build lifecycle.
///
/// Lifecycle: `INIT -> UNPACKED -> BUILT`, monotonic. Only the
/// [`Toolchain`](crate::Toolchain) transitions the flags; `clean` resets
/// a package to INIT. `built` implies `unpacked`.
#[derive(Debug, Clone)]
pub struct PackageState {
    name: String,
    root: PathBuf,
    archive: PathBuf,
    build_dir: PathBuf,
    export_dir: PathBuf,
    layout: ArchiveLayout,
    unpacked: bool,
    built: bool,
}

impl PackageState {
    /// Creates a package in the INIT state.
    ///
    /// `export_dir` is the directory dependents link against; for a
    /// package nobody links against, pass the build directory itself.
    pub fn new(
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        archive: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
        export_dir: impl Into<PathBuf>,
        layout: ArchiveLayout,
    ) -> Self {
        PackageState {
            name: name.into(),
            root: root.into(),
            archive: archive.into(),
            build_dir: build_dir.into(),
            export_dir: export_dir.into(),
            layout,
            unpacked: false,
            built: false,
        }
    }

    /// Short package name used in messages and logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the archive lives in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The source archive.
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// The unpacked source tree.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// The directory dependents link against.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// How the archive extracts.
    pub fn layout(&self) -> ArchiveLayout {
        self.layout
    }

    /// Whether the archive has been extracted.
    pub fn unpacked(&self) -> bool {
        self.unpacked
    }

    /// Whether the native build has completed.
    pub fn built(&self) -> bool {
        self.built
    }

    pub(crate) fn set_unpacked(&mut self) {
        self.unpacked = true;
    }

    pub(crate) fn set_built(&mut self) {
        self.built = true;
    }

    /// Back to INIT.
    pub(crate) fn reset(&mut self) {
        self.unpacked = false;
        self.built = false;
    }
}
