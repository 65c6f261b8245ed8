//! Gobn Core - Core types for driving the GOBNILP structure learner
//!
//! This crate provides the fundamental abstractions shared by the gobn
//! workspace:
//! - The error taxonomy for install, configuration, and solver runs
//! - Blocking child-process execution with captured output
//! - Constraint sets and the solver's line-based directive grammar

pub mod constraint;
pub mod error;
pub mod exec;

#[cfg(test)]
mod constraint_tests;

pub use constraint::{ConstraintSet, Independence, RESERVED_TOKENS};
pub use error::{GobnError, Result};
pub use exec::{CommandSpec, RunResult};
