//! Gobn Runner - driving the solver binary
//!
//! Serializes datasets to the solver's delimited row format, assembles
//! the command-line invocation, and classifies the run outcome from the
//! exit status and captured output.

pub mod data;
pub mod runner;


pub use data::Dataset;
pub use runner::{DataSource, Runner, DATA_FILE_NAME};
