//! CP model definition.

use super::variables::{BoolVar, VarId};

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `lhs <= rhs`
    LessEq,
    /// `lhs == rhs`
    Equal,
    /// `lhs >= rhs`
    GreaterEq,
}

impl Comparison {
    /// Evaluates `lhs <op> rhs`.
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::LessEq => lhs <= rhs,
            Comparison::Equal => lhs == rhs,
            Comparison::GreaterEq => lhs >= rhs,
        }
    }
}

/// A constraint in the CP model.
///
/// Only linear constraints over boolean variables with integer
/// coefficients are supported. Anything richer belongs to the engine.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Linear constraint: `sum(coef * var) <op> rhs`.
    Linear {
        /// (variable, coefficient) pairs.
        terms: Vec<(VarId, i64)>,
        /// Comparison operator.
        comparison: Comparison,
        /// Right-hand side constant.
        rhs: i64,
    },

    /// Exactly one of the variables is true.
    ///
    /// Equivalent to `sum(vars) == 1`; kept separate so engines with a
    /// native exactly-one can use it.
    ExactlyOne {
        /// Variables of the group.
        vars: Vec<VarId>,
    },
}

impl Constraint {
    /// Returns the constraint as linear terms, comparison and rhs.
    pub fn to_linear(&self) -> (Vec<(VarId, i64)>, Comparison, i64) {
        match self {
            Constraint::Linear {
                terms,
                comparison,
                rhs,
            } => (terms.clone(), *comparison, *rhs),
            Constraint::ExactlyOne { vars } => (
                vars.iter().map(|&v| (v, 1)).collect(),
                Comparison::Equal,
                1,
            ),
        }
    }

    /// Whether the constraint holds under a full assignment.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        match self {
            Constraint::Linear {
                terms,
                comparison,
                rhs,
            } => comparison.holds(linear_value(terms, values), *rhs),
            Constraint::ExactlyOne { vars } => {
                vars.iter().filter(|v| values[v.index()]).count() == 1
            }
        }
    }

    fn var_ids(&self) -> Box<dyn Iterator<Item = VarId> + '_> {
        match self {
            Constraint::Linear { terms, .. } => Box::new(terms.iter().map(|&(v, _)| v)),
            Constraint::ExactlyOne { vars } => Box::new(vars.iter().copied()),
        }
    }
}

/// Objective function for the CP model.
#[derive(Debug, Clone)]
pub enum Objective {
    /// Minimize a linear combination of boolean variables.
    Minimize {
        /// (variable, coefficient) pairs.
        terms: Vec<(VarId, i64)>,
    },

    /// Maximize a linear combination of boolean variables.
    Maximize {
        /// (variable, coefficient) pairs.
        terms: Vec<(VarId, i64)>,
    },
}

impl Objective {
    /// The (variable, coefficient) pairs of the objective.
    pub fn terms(&self) -> &[(VarId, i64)] {
        match self {
            Objective::Minimize { terms } | Objective::Maximize { terms } => terms,
        }
    }
}

fn linear_value(terms: &[(VarId, i64)], values: &[bool]) -> i64 {
    terms
        .iter()
        .filter(|(v, _)| values[v.index()])
        .map(|&(_, coef)| coef)
        .sum()
}

/// A constraint programming model over boolean variables.
///
/// Variables live in a dense arena and are referred to by [`VarId`].
///
/// # Examples
///
/// ```
/// use u_binpack::cp::{BoolVar, Comparison, CpModel, Objective};
///
/// let mut model = CpModel::new("example");
/// let a = model.add_bool_var(BoolVar::new("a"));
/// let b = model.add_bool_var(BoolVar::new("b"));
/// model.add_exactly_one(vec![a, b]);
/// model.add_linear(vec![(a, 3), (b, 5)], Comparison::LessEq, 4);
/// model.set_objective(Objective::Minimize { terms: vec![(b, 1)] });
/// assert!(model.validate().is_ok());
/// assert!(model.is_satisfied(&[true, false]));
/// ```
#[derive(Debug, Clone)]
pub struct CpModel {
    /// Model name.
    pub name: String,
    /// Boolean variables, indexed by [`VarId`].
    pub bool_vars: Vec<BoolVar>,
    /// Constraints.
    pub constraints: Vec<Constraint>,
    /// Objective function.
    pub objective: Option<Objective>,
}

impl CpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bool_vars: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Adds a boolean variable and returns its id.
    pub fn add_bool_var(&mut self, var: BoolVar) -> VarId {
        self.bool_vars.push(var);
        VarId(self.bool_vars.len() - 1)
    }

    /// Returns the variable behind `id`.
    pub fn bool_var(&self, id: VarId) -> Option<&BoolVar> {
        self.bool_vars.get(id.index())
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: add a linear constraint.
    pub fn add_linear(&mut self, terms: Vec<(VarId, i64)>, comparison: Comparison, rhs: i64) {
        self.constraints.push(Constraint::Linear {
            terms,
            comparison,
            rhs,
        });
    }

    /// Convenience: add an exactly-one constraint.
    pub fn add_exactly_one(&mut self, vars: Vec<VarId>) {
        self.constraints.push(Constraint::ExactlyOne { vars });
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every referenced variable exists and that no
    /// exactly-one group is empty.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.bool_vars.len();
        for (idx, constraint) in self.constraints.iter().enumerate() {
            if let Constraint::ExactlyOne { vars } = constraint {
                if vars.is_empty() {
                    return Err(format!("constraint {idx}: empty exactly-one group"));
                }
            }
            if let Some(v) = constraint.var_ids().find(|v| v.index() >= n) {
                return Err(format!("constraint {idx}: undefined variable {v}"));
            }
        }
        if let Some(objective) = &self.objective {
            if let Some((v, _)) = objective.terms().iter().find(|(v, _)| v.index() >= n) {
                return Err(format!("objective: undefined variable {v}"));
            }
        }
        Ok(())
    }

    /// Whether a full assignment satisfies every constraint and fixing.
    ///
    /// Returns `false` if `values` does not cover every variable.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        if values.len() != self.bool_vars.len() {
            return false;
        }
        let fixings_hold = self
            .bool_vars
            .iter()
            .zip(values)
            .all(|(var, &value)| var.fixed.is_none_or(|f| f == value));
        fixings_hold && self.constraints.iter().all(|c| c.is_satisfied(values))
    }

    /// Objective value of a full assignment (0 when no objective is set).
    pub fn objective_value(&self, values: &[bool]) -> i64 {
        self.objective
            .as_ref()
            .map_or(0, |o| linear_value(o.terms(), values))
    }

    /// Returns the number of boolean variables.
    pub fn var_count(&self) -> usize {
        self.bool_vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
