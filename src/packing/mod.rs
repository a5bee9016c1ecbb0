//! Bin packing model formulation.
//!
//! Translates an [`Instance`](crate::instance::Instance) into a 0/1
//! [`CpModel`](crate::cp::CpModel):
//!
//! - `assign(i, j)`: item `i` goes into bin `j`
//! - `used(j)`: bin `j` is opened
//! - exact cover: every item in exactly one bin
//! - capacity linking: `sum_i w_i * assign(i, j) <= C * used(j)`
//! - symmetry breaking: `used(j) <= used(j - 1)`
//! - objective: minimize `sum_j used(j)`
//!
//! The candidate bin count defaults to the item count. It can be tightened
//! with a first-fit-decreasing upper bound, see [`BinLimit`].
//!
//! # References
//!
//! Martello & Toth (1990), "Knapsack Problems: Algorithms and Computer
//! Implementations", ch. 8

mod config;
mod model;
mod types;

pub use config::{first_fit_decreasing_bins, BinLimit, FormulationConfig};
pub use model::{formulate, formulate_with, BinPackingModel};
pub use types::Packing;
