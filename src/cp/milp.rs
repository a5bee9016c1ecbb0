//! MILP solver adapter backed by `good_lp` and the pure-Rust `microlp` engine.
//!
//! Every boolean variable becomes a binary column, every constraint a
//! linear row. The time limit is handed to `microlp`, which stops its
//! branch and bound on the calling thread once the budget is spent:
//!
//! - proof of optimality: `Optimal`, bound equal to the objective
//! - budget spent with an incumbent: `Feasible`, with the engine's best
//!   proven bound
//! - budget spent before any incumbent: `Unknown`
//!
//! `microlp` does not parallelize, so the worker-count hint is ignored.

use super::model::{Comparison, CpModel, Objective};
use super::solver::{CpSolver, SolveOutcome, SolverConfig, SolverStatus};
use super::variables::VarId;
use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolutionStatus, SolverModel, Variable, WithTimeLimit,
};
use std::time::Instant;

/// Budgets above this are clamped before they reach the engine's `Duration`.
const MAX_TIME_LIMIT_SECONDS: f64 = 365.0 * 24.0 * 3600.0;

/// What the engine left behind when it returned an incumbent.
struct Incumbent {
    values: Vec<bool>,
    proven: bool,
    best_bound: Option<f64>,
}

/// Exact 0/1 solver using `microlp` through `good_lp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilpSolver;

impl MilpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl CpSolver for MilpSolver {
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> SolveOutcome {
        if let Err(e) = config.validate() {
            log::warn!("invalid solver config: {e}");
            return SolveOutcome::empty(SolverStatus::ModelInvalid);
        }
        if let Err(e) = model.validate() {
            log::warn!("model '{}' rejected: {e}", model.name);
            return SolveOutcome::empty(SolverStatus::ModelInvalid);
        }
        if config.num_workers > 1 {
            log::debug!(
                "microlp is single-threaded, ignoring num_workers={}",
                config.num_workers
            );
        }

        if model.var_count() == 0 {
            // Nothing to decide: only constant rows remain.
            let status = if model.is_satisfied(&[]) {
                SolverStatus::Optimal
            } else {
                SolverStatus::Infeasible
            };
            return SolveOutcome::empty(status);
        }

        log::debug!(
            "solving '{}' with {} vars, {} constraints, limit {:.1}s",
            model.name,
            model.var_count(),
            model.constraint_count(),
            config.time_limit_seconds
        );

        let start = Instant::now();
        let verdict = run_engine(model, config.time_limit_seconds.min(MAX_TIME_LIMIT_SECONDS));
        let seconds = start.elapsed().as_secs_f64();

        match verdict {
            Ok(incumbent) => {
                let objective = model.objective_value(&incumbent.values) as f64;
                let (status, best_bound) = if incumbent.proven {
                    (SolverStatus::Optimal, objective)
                } else {
                    let bound = match incumbent.best_bound {
                        Some(bound) => integral_bound(model, bound),
                        None => {
                            log::warn!("no proven bound for '{}', using the incumbent", model.name);
                            objective
                        }
                    };
                    log::info!(
                        "time limit of {:.1}s reached on '{}': incumbent {objective}, bound {bound}",
                        config.time_limit_seconds,
                        model.name
                    );
                    (SolverStatus::Feasible, bound)
                };
                SolveOutcome {
                    status_code: status.code(),
                    objective_value: objective,
                    best_bound,
                    wall_time_seconds: seconds,
                    values: incumbent.values,
                }
            }
            Err(ResolutionError::Infeasible) => {
                SolveOutcome::empty(SolverStatus::Infeasible).with_wall_time(seconds)
            }
            Err(ResolutionError::Unbounded) => {
                log::warn!("model '{}' reported unbounded", model.name);
                SolveOutcome::empty(SolverStatus::Unknown).with_wall_time(seconds)
            }
            // the only static-message error microlp raises: budget spent, no incumbent
            Err(ResolutionError::Other(msg)) => {
                log::info!("no verdict on '{}' within {:.1}s: {msg}", model.name, config.time_limit_seconds);
                SolveOutcome::empty(SolverStatus::Unknown).with_wall_time(seconds)
            }
            Err(e) => {
                log::warn!("engine error on '{}': {e}", model.name);
                SolveOutcome::empty(SolverStatus::ModelInvalid).with_wall_time(seconds)
            }
        }
    }
}

/// Rounds an engine bound towards the objective. Integer coefficients on
/// 0/1 columns make every objective value integral.
fn integral_bound(model: &CpModel, bound: f64) -> f64 {
    const EPS: f64 = 1e-6;
    match model.objective {
        Some(Objective::Maximize { .. }) => (bound + EPS).floor(),
        _ => (bound - EPS).ceil(),
    }
}

fn linear_expr(columns: &[Variable], terms: &[(VarId, i64)]) -> Expression {
    terms
        .iter()
        .fold(Expression::from(0.0), |acc, &(v, coef)| {
            acc + (coef as f64) * columns[v.index()]
        })
}

/// Builds the `good_lp` problem and solves it within `time_limit_seconds`.
fn run_engine(model: &CpModel, time_limit_seconds: f64) -> Result<Incumbent, ResolutionError> {
    let mut vars = ProblemVariables::new();
    let columns: Vec<Variable> = model
        .bool_vars
        .iter()
        .map(|var| {
            let def = variable().binary().name(var.name.clone());
            let def = match var.fixed {
                Some(value) => {
                    let v = if value { 1.0 } else { 0.0 };
                    def.min(v).max(v)
                }
                None => def,
            };
            vars.add(def)
        })
        .collect();

    let unsolved = match &model.objective {
        Some(Objective::Minimize { terms }) => vars.minimise(linear_expr(&columns, terms)),
        Some(Objective::Maximize { terms }) => vars.maximise(linear_expr(&columns, terms)),
        None => vars.minimise(Expression::from(0.0)),
    };
    let mut problem = unsolved.using(microlp).with_time_limit(time_limit_seconds);

    for c in &model.constraints {
        let (terms, comparison, rhs) = c.to_linear();
        let lhs = linear_expr(&columns, &terms);
        let rhs = rhs as f64;
        problem = problem.with(match comparison {
            Comparison::LessEq => constraint!(lhs <= rhs),
            Comparison::Equal => constraint!(lhs == rhs),
            Comparison::GreaterEq => constraint!(lhs >= rhs),
        });
    }

    let solution = problem.solve()?;
    let proven = matches!(solution.status(), SolutionStatus::Optimal);
    let values = columns.iter().map(|&x| solution.value(x) > 0.5).collect();
    let best_bound = solution.into_inner().stats().best_bound;

    Ok(Incumbent {
        values,
        proven,
        best_bound,
    })
}
