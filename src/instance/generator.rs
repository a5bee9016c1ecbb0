//! Seeded instance generator.

use super::types::Instance;
use rand::Rng;
use u_numflow::random::create_rng;

/// Default inclusive weight range.
pub const DEFAULT_WEIGHT_RANGE: (u64, u64) = (1, 10);

/// Seed of the instance for `(size, repetition)`: `size * 1000 + repetition`.
///
/// Distinct for every pair as long as `repetition < 1000`.
pub fn instance_seed(size: usize, repetition: usize) -> u64 {
    (size as u64)
        .wrapping_mul(1000)
        .wrapping_add(repetition as u64)
}

/// Name of the instance for `(size, repetition)`, e.g. `inst_50_2`.
pub fn instance_name(size: usize, repetition: usize) -> String {
    format!("inst_{size}_{repetition}")
}

/// Generates instances with weights drawn uniformly from a closed range.
///
/// # Examples
///
/// ```
/// use u_binpack::instance::{instance_seed, InstanceGenerator};
///
/// let gen = InstanceGenerator::new(30);
/// let a = gen.generate(20, instance_seed(20, 1));
/// let b = gen.generate(20, instance_seed(20, 1));
/// assert_eq!(a.weights, b.weights);
/// assert!(a.weights.iter().all(|&w| (1..=10).contains(&w)));
/// ```
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    capacity: u64,
    min_weight: u64,
    max_weight: u64,
}

impl InstanceGenerator {
    /// Creates a generator for bins of the given capacity and the default
    /// weight range `[1, 10]`.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            min_weight: DEFAULT_WEIGHT_RANGE.0,
            max_weight: DEFAULT_WEIGHT_RANGE.1,
        }
    }

    /// Sets the inclusive weight range. Weights are at least 1 and the
    /// upper end is raised to the lower end if needed.
    pub fn with_weight_range(mut self, min: u64, max: u64) -> Self {
        self.min_weight = min.max(1);
        self.max_weight = max.max(self.min_weight);
        self
    }

    /// Bin capacity of generated instances.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Inclusive weight range.
    pub fn weight_range(&self) -> (u64, u64) {
        (self.min_weight, self.max_weight)
    }

    /// Generates `size` weights from `seed`. Unnamed.
    pub fn generate(&self, size: usize, seed: u64) -> Instance {
        let mut rng = create_rng(seed);
        let weights = (0..size)
            .map(|_| rng.random_range(self.min_weight..=self.max_weight))
            .collect();
        Instance::new(String::new(), weights, self.capacity)
    }

    /// Generates the named instance of one experiment unit.
    pub fn generate_unit(&self, size: usize, repetition: usize) -> Instance {
        let mut instance = self.generate(size, instance_seed(size, repetition));
        instance.name = instance_name(size, repetition);
        instance
    }
}
