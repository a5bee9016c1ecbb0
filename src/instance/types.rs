//! Bin packing instance.

/// One bin packing instance: item weights and a common bin capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    /// Instance name, e.g. `inst_20_1`.
    pub name: String,
    /// Item weights, in item order.
    pub weights: Vec<u64>,
    /// Capacity shared by every bin.
    pub capacity: u64,
}

impl Instance {
    /// Creates an instance.
    ///
    /// Weights above the capacity are accepted; such an instance has no
    /// feasible packing and the engine is expected to say so.
    pub fn new(name: impl Into<String>, weights: Vec<u64>, capacity: u64) -> Self {
        Self {
            name: name.into(),
            weights,
            capacity,
        }
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.weights.len()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.weights.iter().sum()
    }

    /// Heaviest item, 0 for an empty instance.
    pub fn max_weight(&self) -> u64 {
        self.weights.iter().copied().max().unwrap_or(0)
    }

    /// Whether every item fits in an empty bin on its own.
    pub fn is_packable(&self) -> bool {
        self.weights.iter().all(|&w| w <= self.capacity)
    }

    /// Continuous lower bound `ceil(total_weight / capacity)`.
    ///
    /// Returns 0 for a zero capacity.
    pub fn lower_bound(&self) -> u64 {
        if self.capacity == 0 {
            return 0;
        }
        self.total_weight().div_ceil(self.capacity)
    }
}
