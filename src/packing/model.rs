//! 0/1 assignment model for one instance.

use super::config::FormulationConfig;
use super::types::Packing;
use crate::cp::{BoolVar, Comparison, CpModel, Objective, SolveOutcome, VarId};
use crate::instance::Instance;

/// The bin packing model of one instance.
///
/// Keeps the generic [`CpModel`] together with dense handles to the
/// `assign(i, j)` and `used(j)` variables, so incumbents can be mapped
/// back to bins without name lookups.
#[derive(Debug, Clone)]
pub struct BinPackingModel {
    model: CpModel,
    item_count: usize,
    bin_count: usize,
    /// Row-major `item_count x bin_count`.
    assign: Vec<VarId>,
    used: Vec<VarId>,
    weights: Vec<u64>,
    capacity: u64,
}

/// Builds the model of `instance` with the default configuration.
pub fn formulate(instance: &Instance) -> BinPackingModel {
    formulate_with(instance, &FormulationConfig::default())
}

/// Builds the model of `instance`.
///
/// Never fails. Items heavier than the capacity still yield a well-formed
/// model, which the engine will find infeasible.
pub fn formulate_with(instance: &Instance, config: &FormulationConfig) -> BinPackingModel {
    let n = instance.item_count();
    let m = config.bin_limit.bin_count(instance);
    let name = if instance.name.is_empty() {
        "bin_packing"
    } else {
        instance.name.as_str()
    };
    let mut model = CpModel::new(name);

    let mut assign = Vec::with_capacity(n * m);
    for i in 0..n {
        for j in 0..m {
            assign.push(model.add_bool_var(BoolVar::new(format!("assign_{i}_{j}"))));
        }
    }
    let used: Vec<VarId> = (0..m)
        .map(|j| model.add_bool_var(BoolVar::new(format!("used_{j}"))))
        .collect();

    // every item in exactly one bin
    for row in assign.chunks(m.max(1)) {
        model.add_exactly_one(row.to_vec());
    }

    // load(j) - C * used(j) <= 0
    let capacity = coefficient(instance.capacity);
    for (j, &used_j) in used.iter().enumerate() {
        let mut terms: Vec<(VarId, i64)> = instance
            .weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (assign[i * m + j], coefficient(w)))
            .collect();
        terms.push((used_j, -capacity));
        model.add_linear(terms, Comparison::LessEq, 0);
    }

    if config.symmetry_breaking {
        for pair in used.windows(2) {
            model.add_linear(vec![(pair[1], 1), (pair[0], -1)], Comparison::LessEq, 0);
        }
    }

    model.set_objective(Objective::Minimize {
        terms: used.iter().map(|&u| (u, 1)).collect(),
    });

    log::debug!(
        "formulated '{}': {n} items, {m} candidate bins, {} vars, {} constraints",
        model.name,
        model.var_count(),
        model.constraint_count()
    );

    BinPackingModel {
        model,
        item_count: n,
        bin_count: m,
        assign,
        used,
        weights: instance.weights.clone(),
        capacity: instance.capacity,
    }
}

fn coefficient(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl BinPackingModel {
    /// The generic model handed to a solver.
    pub fn model(&self) -> &CpModel {
        &self.model
    }

    /// Consumes the wrapper and returns the generic model.
    pub fn into_model(self) -> CpModel {
        self.model
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of candidate bins.
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Variable `assign(item, bin)`.
    ///
    /// # Panics
    ///
    /// Panics if `item` or `bin` is out of range.
    pub fn assign(&self, item: usize, bin: usize) -> VarId {
        assert!(bin < self.bin_count, "bin {bin} out of range");
        self.assign[item * self.bin_count + bin]
    }

    /// Variable `used(bin)`.
    ///
    /// # Panics
    ///
    /// Panics if `bin` is out of range.
    pub fn used(&self, bin: usize) -> VarId {
        self.used[bin]
    }

    /// Maps a solver incumbent back to bins.
    ///
    /// Returns `None` when the outcome has no incumbent or its assignment
    /// does not cover this model's variables.
    pub fn decode(&self, outcome: &SolveOutcome) -> Option<Packing> {
        if !outcome.is_solution_found() || outcome.values.len() != self.model.var_count() {
            return None;
        }
        let values = &outcome.values;
        let bins = (0..self.bin_count)
            .map(|j| {
                (0..self.item_count)
                    .filter(|&i| values[self.assign(i, j).index()])
                    .collect()
            })
            .collect();
        let used = self.used.iter().map(|u| values[u.index()]).collect();

        Some(Packing {
            bins,
            used,
            weights: self.weights.clone(),
            capacity: self.capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::SolverStatus;
    use crate::packing::BinLimit;

    /// Item `i` in bin `i`, every bin used.
    fn one_item_per_bin(bpm: &BinPackingModel) -> Vec<bool> {
        let mut values = vec![false; bpm.model().var_count()];
        for i in 0..bpm.item_count() {
            values[bpm.assign(i, i).index()] = true;
            values[bpm.used(i).index()] = true;
        }
        values
    }

    fn outcome_with(values: Vec<bool>, objective: f64) -> SolveOutcome {
        SolveOutcome {
            status_code: SolverStatus::Feasible.code(),
            objective_value: objective,
            best_bound: objective,
            wall_time_seconds: 0.0,
            values,
        }
    }

    #[test]
    fn test_model_dimensions() {
        let inst = Instance::new("dims", vec![3, 5, 2], 10);
        let bpm = formulate(&inst);
        let model = bpm.model();

        assert_eq!(bpm.item_count(), 3);
        assert_eq!(bpm.bin_count(), 3);
        assert_eq!(model.name, "dims");
        assert_eq!(model.var_count(), 3 * 3 + 3);
        // 3 cover rows, 3 capacity rows, 2 symmetry rows
        assert_eq!(model.constraint_count(), 8);
        assert!(model.validate().is_ok());
        assert_eq!(model.objective.as_ref().map(|o| o.terms().len()), Some(3));
    }

    #[test]
    fn test_without_symmetry_breaking() {
        let inst = Instance::new("dims", vec![3, 5, 2], 10);
        let config = FormulationConfig::default().with_symmetry_breaking(false);
        let bpm = formulate_with(&inst, &config);

        assert_eq!(bpm.model().constraint_count(), 6);
    }

    #[test]
    fn test_ffd_limit_shrinks_model() {
        let inst = Instance::new("small", vec![1, 2, 3, 4], 30);
        let config = FormulationConfig::default().with_bin_limit(BinLimit::FirstFitDecreasing);
        let bpm = formulate_with(&inst, &config);

        assert_eq!(bpm.bin_count(), 1);
        assert_eq!(bpm.model().var_count(), 4 + 1);
    }

    #[test]
    fn test_unnamed_instance_gets_default_name() {
        let inst = Instance::new("", vec![1], 10);
        assert_eq!(formulate(&inst).model().name, "bin_packing");
    }

    #[test]
    fn test_trivial_assignment_is_feasible() {
        let inst = Instance::new("trivial", vec![10, 1, 7, 10], 10);
        let bpm = formulate(&inst);
        let values = one_item_per_bin(&bpm);

        assert!(bpm.model().is_satisfied(&values));
        assert_eq!(bpm.model().objective_value(&values), 4);
    }

    #[test]
    fn test_capacity_linking() {
        let inst = Instance::new("link", vec![4, 4, 4, 4], 8);
        let bpm = formulate(&inst);

        // three items in bin 0 overflow it
        let mut values = vec![false; bpm.model().var_count()];
        for i in 0..3 {
            values[bpm.assign(i, 0).index()] = true;
        }
        values[bpm.assign(3, 1).index()] = true;
        values[bpm.used(0).index()] = true;
        values[bpm.used(1).index()] = true;
        assert!(!bpm.model().is_satisfied(&values));

        // loaded bin 1 without used(1)
        let mut values = vec![false; bpm.model().var_count()];
        values[bpm.assign(0, 0).index()] = true;
        values[bpm.assign(1, 0).index()] = true;
        values[bpm.assign(2, 1).index()] = true;
        values[bpm.assign(3, 1).index()] = true;
        values[bpm.used(0).index()] = true;
        assert!(!bpm.model().is_satisfied(&values));

        values[bpm.used(1).index()] = true;
        assert!(bpm.model().is_satisfied(&values));
        assert_eq!(bpm.model().objective_value(&values), 2);
    }

    #[test]
    fn test_symmetry_rows_reject_gaps() {
        let inst = Instance::new("sym", vec![4, 4, 4, 4], 8);
        let bpm = formulate(&inst);

        // bins 0 and 2 used, bin 1 skipped
        let mut values = vec![false; bpm.model().var_count()];
        values[bpm.assign(0, 0).index()] = true;
        values[bpm.assign(1, 0).index()] = true;
        values[bpm.assign(2, 2).index()] = true;
        values[bpm.assign(3, 2).index()] = true;
        values[bpm.used(0).index()] = true;
        values[bpm.used(2).index()] = true;
        assert!(!bpm.model().is_satisfied(&values));

        let config = FormulationConfig::default().with_symmetry_breaking(false);
        let relaxed = formulate_with(&inst, &config);
        assert!(relaxed.model().is_satisfied(&values));
    }

    #[test]
    fn test_duplicate_assignment_rejected() {
        let inst = Instance::new("dup", vec![1, 1], 10);
        let bpm = formulate(&inst);
        let mut values = one_item_per_bin(&bpm);
        values[bpm.assign(0, 1).index()] = true;

        assert!(!bpm.model().is_satisfied(&values));
    }

    #[test]
    fn test_oversize_item_still_formulates() {
        let inst = Instance::new("oversize", vec![12, 3], 10);
        let bpm = formulate(&inst);

        assert!(bpm.model().validate().is_ok());
        assert!(!bpm.model().is_satisfied(&one_item_per_bin(&bpm)));
    }

    #[test]
    fn test_empty_instance() {
        let inst = Instance::new("empty", vec![], 10);
        let bpm = formulate(&inst);

        assert_eq!(bpm.bin_count(), 0);
        assert_eq!(bpm.model().var_count(), 0);
        assert_eq!(bpm.model().constraint_count(), 0);
        assert!(bpm.model().is_satisfied(&[]));
    }

    #[test]
    fn test_decode() {
        let inst = Instance::new("decode", vec![3, 5, 2], 10);
        let bpm = formulate(&inst);
        let mut values = vec![false; bpm.model().var_count()];
        values[bpm.assign(0, 0).index()] = true;
        values[bpm.assign(1, 0).index()] = true;
        values[bpm.assign(2, 0).index()] = true;
        values[bpm.used(0).index()] = true;

        let packing = bpm.decode(&outcome_with(values, 1.0)).expect("incumbent");

        assert_eq!(packing.bins, vec![vec![0, 1, 2], vec![], vec![]]);
        assert_eq!(packing.used, vec![true, false, false]);
        assert_eq!(packing.bins_used(), 1);
        assert!(packing.is_valid());
    }

    #[test]
    fn test_decode_without_incumbent() {
        let inst = Instance::new("none", vec![3, 5], 10);
        let bpm = formulate(&inst);

        assert!(bpm.decode(&SolveOutcome::empty(SolverStatus::Unknown)).is_none());
        assert!(bpm.decode(&outcome_with(vec![true], 1.0)).is_none());
    }

    #[cfg(feature = "microlp")]
    mod solved {
        use super::*;
        use crate::cp::{CpSolver, MilpSolver, SolverConfig};

        fn solve(inst: &Instance) -> (BinPackingModel, SolveOutcome) {
            let bpm = formulate(inst);
            let config = SolverConfig::default().with_time_limit_seconds(60.0);
            let outcome = MilpSolver::new().solve(bpm.model(), &config);
            (bpm, outcome)
        }

        #[test]
        fn test_four_fours_fit_in_two_bins() {
            let (bpm, outcome) = solve(&Instance::new("s1", vec![4, 4, 4, 4], 8));

            assert_eq!(outcome.status(), SolverStatus::Optimal);
            assert!((outcome.objective_value - 2.0).abs() < 1e-9);

            let packing = bpm.decode(&outcome).expect("incumbent");
            assert_eq!(packing.bins_used(), 2);
            assert!(packing.is_valid());
            assert_eq!(packing.used[..2], [true, true]);
        }

        #[test]
        fn test_three_nines_need_three_bins() {
            let (bpm, outcome) = solve(&Instance::new("s2", vec![9, 9, 9], 10));

            assert_eq!(outcome.status(), SolverStatus::Optimal);
            assert!((outcome.objective_value - 3.0).abs() < 1e-9);
            assert!(bpm.decode(&outcome).expect("incumbent").is_valid());
        }

        #[test]
        fn test_mixed_weights() {
            // 6+4, 5+5, 10 -> 3 bins, lower bound 30/10 = 3
            let inst = Instance::new("mixed", vec![6, 5, 10, 4, 5], 10);
            let (bpm, outcome) = solve(&inst);

            assert_eq!(outcome.status(), SolverStatus::Optimal);
            assert!((outcome.objective_value - 3.0).abs() < 1e-9);
            let packing = bpm.decode(&outcome).expect("incumbent");
            assert!(packing.is_valid());
            assert_eq!(packing.bins_used() as u64, inst.lower_bound());
        }

        #[test]
        fn test_oversize_item_is_infeasible() {
            let (_, outcome) = solve(&Instance::new("oversize", vec![12], 10));

            assert_eq!(outcome.status(), SolverStatus::Infeasible);
        }
    }
}
