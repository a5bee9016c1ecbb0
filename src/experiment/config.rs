//! Experiment configuration.

use super::types::ExperimentUnit;
use crate::cp::SolverConfig;
use crate::instance::InstanceGenerator;
use crate::packing::FormulationConfig;

/// Configuration of one benchmark batch.
///
/// Built once before the run and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use u_binpack::experiment::ExperimentConfig;
///
/// let config = ExperimentConfig::default()
///     .with_sizes(vec![10, 20])
///     .with_repetitions(2)
///     .with_time_limit_seconds(5.0);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.total_units(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperimentConfig {
    /// Instance sizes (item counts), in run order.
    pub sizes: Vec<usize>,

    /// Bin capacity shared by every instance.
    pub capacity: u64,

    /// Repetitions per size. Repetition indices run from 1 to this value.
    pub repetitions: usize,

    /// Per-instance solver time limit in seconds.
    pub time_limit_seconds: f64,

    /// Worker hint passed to the solver.
    pub num_workers: usize,

    /// Smallest generated weight.
    pub min_weight: u64,

    /// Largest generated weight.
    pub max_weight: u64,

    /// Model formulation options.
    pub formulation: FormulationConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            sizes: vec![20, 50, 100],
            capacity: 30,
            repetitions: 3,
            time_limit_seconds: 30.0,
            num_workers: 8,
            min_weight: 1,
            max_weight: 10,
            formulation: FormulationConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_repetitions(mut self, n: usize) -> Self {
        self.repetitions = n;
        self
    }

    pub fn with_time_limit_seconds(mut self, seconds: f64) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    pub fn with_num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    pub fn with_weight_range(mut self, min: u64, max: u64) -> Self {
        self.min_weight = min;
        self.max_weight = max;
        self
    }

    pub fn with_formulation(mut self, formulation: FormulationConfig) -> Self {
        self.formulation = formulation;
        self
    }

    /// Units in run order: sizes in configured order, repetitions 1..=R
    /// within each size.
    pub fn units(&self) -> impl Iterator<Item = ExperimentUnit> + '_ {
        let repetitions = self.repetitions;
        self.sizes
            .iter()
            .flat_map(move |&size| (1..=repetitions).map(move |rep| ExperimentUnit::new(size, rep)))
    }

    /// Number of units in the batch.
    pub fn total_units(&self) -> usize {
        self.sizes.len() * self.repetitions
    }

    /// Solver parameters derived from this configuration.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::default()
            .with_time_limit_seconds(self.time_limit_seconds)
            .with_num_workers(self.num_workers)
    }

    /// Instance generator derived from this configuration.
    pub fn generator(&self) -> InstanceGenerator {
        InstanceGenerator::new(self.capacity).with_weight_range(self.min_weight, self.max_weight)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.sizes.is_empty() {
            return Err("sizes must not be empty".into());
        }
        if let Some(pos) = self.sizes.iter().position(|&s| s == 0) {
            return Err(format!("sizes[{pos}] must be positive"));
        }
        if self.capacity == 0 {
            return Err("capacity must be positive".into());
        }
        if self.repetitions == 0 {
            return Err("repetitions must be at least 1".into());
        }
        if self.repetitions >= 1000 {
            return Err(format!(
                "repetitions must be below 1000 to keep instance seeds distinct, got {}",
                self.repetitions
            ));
        }
        if self.min_weight == 0 {
            return Err("min_weight must be positive".into());
        }
        if self.min_weight > self.max_weight {
            return Err(format!(
                "min_weight ({}) must not exceed max_weight ({})",
                self.min_weight, self.max_weight
            ));
        }
        self.solver_config().validate()
    }
}
