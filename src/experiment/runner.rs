//! Experiment execution loop.

use super::config::ExperimentConfig;
use super::types::{ExperimentUnit, ResultRecord};
use crate::cp::CpSolver;
use crate::instance::InstanceGenerator;
use crate::metrics::extract;
use crate::packing::formulate_with;
use std::convert::Infallible;
use std::io;

/// Executes a benchmark batch.
#[derive(Debug, Clone)]
pub struct ExperimentRunner {
    config: ExperimentConfig,
    generator: InstanceGenerator,
}

impl ExperimentRunner {
    /// Creates a runner for a validated configuration.
    pub fn new(config: ExperimentConfig) -> Result<Self, String> {
        config.validate()?;
        if config.max_weight > config.capacity {
            log::warn!(
                "max_weight {} exceeds capacity {}: some instances will be infeasible",
                config.max_weight,
                config.capacity
            );
        }
        let generator = config.generator();
        Ok(Self { config, generator })
    }

    /// The batch configuration.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Runs every unit and returns the records in iteration order.
    pub fn run<S: CpSolver + ?Sized>(&self, solver: &S) -> Vec<ResultRecord> {
        match self.drive(solver, |_| Ok::<(), Infallible>(())) {
            Ok(records) => records,
            Err(never) => match never {},
        }
    }

    /// Like [`run`](Self::run), handing each record to `sink` as soon as
    /// its unit completes. A sink error aborts the batch.
    pub fn run_with_sink<S, F>(&self, solver: &S, sink: F) -> io::Result<Vec<ResultRecord>>
    where
        S: CpSolver + ?Sized,
        F: FnMut(&ResultRecord) -> io::Result<()>,
    {
        self.drive(solver, sink)
    }

    /// Runs a single unit: Generate → Formulate → Solve → Extract.
    pub fn run_unit<S: CpSolver + ?Sized>(&self, solver: &S, unit: ExperimentUnit) -> ResultRecord {
        let instance = self.generator.generate_unit(unit.size, unit.repetition);
        let model = formulate_with(&instance, &self.config.formulation);
        let outcome = solver.solve(model.model(), &self.config.solver_config());
        let metrics = extract(&outcome);
        ResultRecord::from_metrics(&instance, &metrics)
    }

    fn drive<S, F, E>(&self, solver: &S, mut sink: F) -> Result<Vec<ResultRecord>, E>
    where
        S: CpSolver + ?Sized,
        F: FnMut(&ResultRecord) -> Result<(), E>,
    {
        let total = self.config.total_units();
        log::info!(
            "starting batch: sizes {:?}, {} repetitions, capacity {}, limit {:.1}s",
            self.config.sizes,
            self.config.repetitions,
            self.config.capacity,
            self.config.time_limit_seconds
        );

        let mut records = Vec::with_capacity(total);
        for (k, unit) in self.config.units().enumerate() {
            log::info!(
                "[{}/{}] running {} (n={})",
                k + 1,
                total,
                unit.instance_name(),
                unit.size
            );
            let record = self.run_unit(solver, unit);
            log::info!(
                "[{}/{}] {}: {} bins={} bound={:.2} gap={:.2}% time={:.2}s",
                k + 1,
                total,
                record.instance_name,
                record.status,
                record.bins_used,
                record.best_bound,
                record.gap_percent,
                record.time_seconds
            );
            sink(&record)?;
            records.push(record);
        }

        let unproven = records.iter().filter(|r| !r.is_optimal()).count();
        if unproven > 0 {
            log::info!("{unproven} of {total} units finished without a proven optimum");
        }
        Ok(records)
    }
}
