//! Seed command handlers.
//!
//! This module contains the runner for the `seed` command and the summary
//! it prints.

pub mod report;
pub mod run;

pub use report::{all_succeeded, format_summary};
pub use run::run_seed;
