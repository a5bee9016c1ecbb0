//! Formulation options.

use crate::instance::Instance;

/// How many candidate bins the model offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinLimit {
    /// One candidate bin per item. Always enough.
    #[default]
    ItemCount,

    /// As many bins as a first-fit-decreasing packing uses, never more
    /// than the item count. Shrinks the model without changing its optimum.
    FirstFitDecreasing,
}

impl BinLimit {
    /// Candidate bin count for `instance`.
    pub fn bin_count(self, instance: &Instance) -> usize {
        let n = instance.item_count();
        match self {
            BinLimit::ItemCount => n,
            BinLimit::FirstFitDecreasing => {
                first_fit_decreasing_bins(&instance.weights, instance.capacity).min(n)
            }
        }
    }
}

/// Number of bins a first-fit-decreasing packing opens.
///
/// Items heavier than the capacity get a bin of their own.
pub fn first_fit_decreasing_bins(weights: &[u64], capacity: u64) -> usize {
    let mut sorted = weights.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut loads: Vec<u64> = Vec::new();
    for w in sorted {
        match loads.iter_mut().find(|load| load.saturating_add(w) <= capacity) {
            Some(load) => *load += w,
            None => loads.push(w),
        }
    }
    loads.len()
}

/// Configuration for [`formulate_with`](super::formulate_with).
///
/// # Examples
///
/// ```
/// use u_binpack::packing::{BinLimit, FormulationConfig};
///
/// let config = FormulationConfig::default().with_bin_limit(BinLimit::FirstFitDecreasing);
/// assert!(config.symmetry_breaking);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormulationConfig {
    /// Candidate bin count policy.
    pub bin_limit: BinLimit,

    /// Whether to add the `used(j) <= used(j - 1)` ordering rows.
    pub symmetry_breaking: bool,
}

impl Default for FormulationConfig {
    fn default() -> Self {
        Self {
            bin_limit: BinLimit::ItemCount,
            symmetry_breaking: true,
        }
    }
}

impl FormulationConfig {
    pub fn with_bin_limit(mut self, bin_limit: BinLimit) -> Self {
        self.bin_limit = bin_limit;
        self
    }

    pub fn with_symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }
}
