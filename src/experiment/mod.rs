//! Benchmark harness.
//!
//! Runs every `(size, repetition)` unit of an [`ExperimentConfig`] through
//! Generate → Formulate → Solve → Extract, strictly in sequence, and
//! returns one [`ResultRecord`] per unit in iteration order. Each unit is
//! solved exactly once under the configured time limit; timeouts and
//! engine failures are recorded, never retried.

mod config;
mod runner;
mod types;

pub use config::ExperimentConfig;
pub use runner::ExperimentRunner;
pub use types::{ExperimentUnit, ResultRecord};
