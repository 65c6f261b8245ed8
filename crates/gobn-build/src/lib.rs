//! Gobn Build - installing the solver toolchain from source
//!
//! Drives the two native source packages - the solver and its backing
//! LP/MIP engine - through `INIT -> UNPACKED -> BUILT`. The engine must
//! reach BUILT before the solver can be linked against it; every step is
//! retryable after a failure, and missing preconditions auto-heal at
//! most once.

pub mod package;
pub mod toolchain;


pub use package::{ArchiveLayout, PackageState};
pub use toolchain::{LinkOutcome, Toolchain};
