//! Experiment units and result records.

use crate::cp::SolverStatus;
use crate::instance::{instance_name, Instance};
use crate::metrics::Metrics;

/// One `(size, repetition)` pair of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExperimentUnit {
    /// Item count.
    pub size: usize,
    /// Repetition index, starting at 1.
    pub repetition: usize,
}

impl ExperimentUnit {
    pub fn new(size: usize, repetition: usize) -> Self {
        Self { size, repetition }
    }

    /// Instance name of this unit, e.g. `inst_20_1`.
    pub fn instance_name(&self) -> String {
        instance_name(self.size, self.repetition)
    }
}

/// Normalized result of one experiment unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultRecord {
    /// Instance name.
    pub instance_name: String,
    /// Number of items.
    pub item_count: usize,
    /// Bin capacity.
    pub capacity: u64,
    /// Engine wall time in seconds.
    pub time_seconds: f64,
    /// Bins used by the incumbent (0 without one).
    pub bins_used: u64,
    /// Best proven bound.
    pub best_bound: f64,
    /// Optimality gap in percent.
    pub gap_percent: f64,
    /// Solver status.
    pub status: SolverStatus,
}

impl ResultRecord {
    /// Builds the record of `instance` from its extracted metrics.
    pub fn from_metrics(instance: &Instance, metrics: &Metrics) -> Self {
        Self {
            instance_name: instance.name.clone(),
            item_count: instance.item_count(),
            capacity: instance.capacity,
            time_seconds: metrics.time_seconds,
            bins_used: metrics.bins_used(),
            best_bound: metrics.best_bound,
            gap_percent: metrics.gap_percent,
            status: metrics.status,
        }
    }

    /// Whether the record holds a proven optimum.
    pub fn is_optimal(&self) -> bool {
        self.status == SolverStatus::Optimal
    }
}
