//! Constraint Programming (CP) modeling layer.
//!
//! Provides a domain-agnostic model for 0/1 optimization problems:
//! boolean variables, linear constraints with integer coefficients and a
//! linear objective.
//!
//! # Key Components
//!
//! - **Variables**: [`BoolVar`], addressed by dense [`VarId`] handles
//! - **Constraints**: [`Constraint`]: Linear, ExactlyOne
//! - **Model**: [`CpModel`]: container for variables, constraints, objective
//! - **Solver**: [`CpSolver`] trait: interface for solver implementations
//!
//! # Design
//!
//! This module defines the modeling layer only. It does NOT include a
//! search or propagation engine. The [`CpSolver`] trait allows plugging in
//! external engines (CP-SAT, HiGHS, CBC). [`MilpSolver`] adapts the
//! pure-Rust `microlp` engine through `good_lp` (feature `microlp`).
//!
//! # References
//!
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

#[cfg(feature = "microlp")]
mod milp;
mod model;
mod solver;
mod variables;

#[cfg(feature = "microlp")]
pub use milp::MilpSolver;
pub use model::{Comparison, Constraint, CpModel, Objective};
pub use solver::{CpSolver, SolveOutcome, SolverConfig, SolverStatus};
pub use variables::{BoolVar, VarId};
