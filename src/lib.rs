//! Exact bin packing benchmark.
//!
//! Generates reproducible synthetic bin packing instances, formulates each
//! one as a 0/1 integer model, hands the model to a time-limited solver and
//! normalizes the verdict into a flat result record:
//!
//! - **instance**: seeded weight vectors, one per `(size, repetition)`.
//! - **packing**: assignment/usage formulation with symmetry breaking, and
//!   decoding of solver incumbents back into per-bin item lists.
//! - **cp**: solver-agnostic boolean model, the [`cp::CpSolver`] capability
//!   trait and a `good_lp`/`microlp` backed implementation.
//! - **metrics**: status decoding and the optimality gap convention.
//! - **experiment**: the sequential sizes × repetitions harness.
//! - **report**: CSV persistence and SVG summary plots.
//!
//! # Example
//!
//! ```
//! use u_binpack::cp::{CpSolver, SolverConfig, SolverStatus};
//! use u_binpack::instance::Instance;
//! use u_binpack::metrics::extract;
//! use u_binpack::packing::formulate;
//!
//! # #[cfg(feature = "microlp")]
//! # {
//! let instance = Instance::new("demo", vec![4, 4, 4, 4], 8);
//! let model = formulate(&instance);
//! let outcome = u_binpack::cp::MilpSolver.solve(model.model(), &SolverConfig::default());
//! let metrics = extract(&outcome);
//! assert_eq!(metrics.status, SolverStatus::Optimal);
//! assert_eq!(metrics.bins_used(), 2);
//! # }
//! ```

pub mod cp;
pub mod experiment;
pub mod instance;
pub mod metrics;
pub mod packing;
pub mod report;
