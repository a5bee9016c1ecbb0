//! Metrics extraction.

use crate::cp::{SolveOutcome, SolverStatus};

/// Normalized view of one solve outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Decoded status.
    pub status: SolverStatus,
    /// Incumbent objective (0 without incumbent).
    pub objective: f64,
    /// Best proven bound reported by the engine.
    pub best_bound: f64,
    /// Relative gap in percent.
    pub gap_percent: f64,
    /// Engine wall time in seconds.
    pub time_seconds: f64,
}

impl Metrics {
    /// Objective rounded to a bin count. Negative or non-finite values
    /// count as zero.
    pub fn bins_used(&self) -> u64 {
        if self.objective.is_finite() && self.objective > 0.0 {
            self.objective.round() as u64
        } else {
            0
        }
    }
}

/// Gap in percent between `objective` and `best_bound` under `status`.
///
/// Zero unless the status carries an incumbent and the objective is
/// positive. `Optimal` is always zero.
pub fn gap_percent(status: SolverStatus, objective: f64, best_bound: f64) -> f64 {
    match status {
        SolverStatus::Optimal => 0.0,
        SolverStatus::Feasible if objective > 0.0 => {
            ((objective - best_bound) / objective).abs() * 100.0
        }
        _ => 0.0,
    }
}

/// Maps a raw outcome to [`Metrics`]. Never fails.
pub fn extract(outcome: &SolveOutcome) -> Metrics {
    let status = outcome.status();
    Metrics {
        status,
        objective: outcome.objective_value,
        best_bound: outcome.best_bound,
        gap_percent: gap_percent(status, outcome.objective_value, outcome.best_bound),
        time_seconds: outcome.wall_time_seconds,
    }
}
