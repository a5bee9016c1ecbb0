//! CP solver interface and outcome types.

use super::model::CpModel;
use std::fmt;

/// Status of the solver after execution.
///
/// A closed set. Engines report it as an integer code (see
/// [`SolverStatus::code`]); codes outside the set decode to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// No verdict, typically because the time limit expired first.
    Unknown,
}

impl SolverStatus {
    /// All statuses, in code order.
    pub const ALL: [SolverStatus; 5] = [
        SolverStatus::Unknown,
        SolverStatus::ModelInvalid,
        SolverStatus::Feasible,
        SolverStatus::Infeasible,
        SolverStatus::Optimal,
    ];

    /// Engine status code.
    pub fn code(self) -> i32 {
        match self {
            SolverStatus::Unknown => 0,
            SolverStatus::ModelInvalid => 1,
            SolverStatus::Feasible => 2,
            SolverStatus::Infeasible => 3,
            SolverStatus::Optimal => 4,
        }
    }

    /// Decodes an engine status code. Never fails.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => SolverStatus::ModelInvalid,
            2 => SolverStatus::Feasible,
            3 => SolverStatus::Infeasible,
            4 => SolverStatus::Optimal,
            _ => SolverStatus::Unknown,
        }
    }

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "OPTIMAL",
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::ModelInvalid => "MODEL_INVALID",
            SolverStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parses a canonical name; anything else is `Unknown`.
    pub fn parse(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == name.trim())
            .unwrap_or(SolverStatus::Unknown)
    }

    /// Whether the status carries an incumbent solution.
    pub fn has_solution(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw verdict of one solve call.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Engine status code, see [`SolverStatus::from_code`].
    pub status_code: i32,
    /// Objective of the incumbent (0 when there is none).
    pub objective_value: f64,
    /// Best proven bound on the objective.
    pub best_bound: f64,
    /// Wall-clock time as accounted by the engine, in seconds.
    pub wall_time_seconds: f64,
    /// Incumbent assignment indexed by variable id; empty without one.
    pub values: Vec<bool>,
}

impl SolveOutcome {
    /// Creates an outcome without incumbent.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status_code: status.code(),
            objective_value: 0.0,
            best_bound: 0.0,
            wall_time_seconds: 0.0,
            values: Vec::new(),
        }
    }

    /// Decoded status.
    pub fn status(&self) -> SolverStatus {
        SolverStatus::from_code(self.status_code)
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        self.status().has_solution()
    }

    /// Sets the wall time.
    pub fn with_wall_time(mut self, seconds: f64) -> Self {
        self.wall_time_seconds = seconds;
        self
    }
}

/// Solver configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Maximum wall-clock solve time in seconds.
    pub time_limit_seconds: f64,
    /// Number of parallel search workers. A hint; engines may ignore it.
    pub num_workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: 60.0,
            num_workers: 1,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit_seconds(mut self, seconds: f64) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    pub fn with_num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.time_limit_seconds.is_finite() || self.time_limit_seconds <= 0.0 {
            return Err(format!(
                "time_limit_seconds must be positive and finite, got {}",
                self.time_limit_seconds
            ));
        }
        if self.num_workers == 0 {
            return Err("num_workers must be at least 1".into());
        }
        Ok(())
    }
}

/// Trait for CP solver implementations.
///
/// Implementors wrap an exact engine. They receive the model together
/// with the time budget and worker hint, and must always return an
/// outcome: engine failures are reported through the status, never by
/// panicking.
pub trait CpSolver {
    /// Solves the model and returns the engine's verdict.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> SolveOutcome;
}

impl<S: CpSolver + ?Sized> CpSolver for &S {
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> SolveOutcome {
        (**self).solve(model, config)
    }
}
