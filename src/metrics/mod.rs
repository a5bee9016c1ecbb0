//! Normalizes raw solver verdicts into benchmark metrics.
//!
//! The optimality gap follows one fixed convention:
//!
//! ```text
//! gap = |objective - bound| / objective * 100   if status in {OPTIMAL, FEASIBLE} and objective > 0
//! gap = 0                                       otherwise
//! ```
//!
//! A proven optimum always reports a zero gap.

mod extract;

pub use extract::{extract, gap_percent, Metrics};
