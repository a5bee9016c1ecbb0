//! End-to-end runs of the benchmark pipeline with the bundled MILP engine.

#![cfg(feature = "microlp")]

use u_binpack::cp::{CpSolver, MilpSolver, SolverConfig, SolverStatus};
use u_binpack::experiment::{ExperimentConfig, ExperimentRunner};
use u_binpack::instance::{Instance, InstanceGenerator};
use u_binpack::metrics::extract;
use u_binpack::packing::{formulate, formulate_with, BinLimit, FormulationConfig};
use u_binpack::report::{read_csv, render_plots, CsvReport, PlotConfig, PlotOutcome};

fn small_config() -> ExperimentConfig {
    ExperimentConfig::default()
        .with_sizes(vec![3, 4])
        .with_repetitions(2)
        .with_time_limit_seconds(20.0)
}

#[test]
fn batch_records_match_iteration_order_and_are_optimal() {
    let runner = ExperimentRunner::new(small_config()).unwrap();

    let records = runner.run(&MilpSolver);

    let names: Vec<_> = records.iter().map(|r| r.instance_name.as_str()).collect();
    assert_eq!(names, vec!["inst_3_1", "inst_3_2", "inst_4_1", "inst_4_2"]);

    let gen = InstanceGenerator::new(30);
    for r in &records {
        assert_eq!(r.status, SolverStatus::Optimal, "{}", r.instance_name);
        assert_eq!(r.gap_percent, 0.0);
        assert_eq!(r.capacity, 30);
        assert!(r.bins_used as f64 >= r.best_bound.ceil() - 1e-9);

        let rep = if r.instance_name.ends_with("_1") { 1 } else { 2 };
        let instance = gen.generate_unit(r.item_count, rep);
        assert_eq!(instance.name, r.instance_name);
        assert_eq!(r.bins_used, instance.lower_bound());
    }
}

#[test]
fn batch_streams_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("results.csv");
    let svg = dir.path().join("analysis.svg");
    let runner = ExperimentRunner::new(small_config()).unwrap();

    let mut report = CsvReport::create(&csv).unwrap();
    let records = runner
        .run_with_sink(&MilpSolver, |r| report.append(r))
        .unwrap();
    assert_eq!(report.rows(), records.len());

    let back = read_csv(&csv).unwrap();
    assert_eq!(back.len(), records.len());
    for (a, b) in records.iter().zip(&back) {
        assert_eq!(a.instance_name, b.instance_name);
        assert_eq!(a.bins_used, b.bins_used);
        assert_eq!(a.status, b.status);
    }

    let outcome = render_plots(&csv, &svg, &PlotConfig::default()).unwrap();
    assert_eq!(outcome, PlotOutcome::Written { sizes: 2 });
    assert!(svg.exists());
}

#[test]
fn solved_packing_is_a_valid_assignment() {
    let instance = Instance::new("mixed", vec![7, 3, 5, 5, 2, 8, 6, 4], 10);
    let model = formulate_with(
        &instance,
        &FormulationConfig::default().with_bin_limit(BinLimit::FirstFitDecreasing),
    );
    assert_eq!(model.bin_count(), 4);

    let outcome = MilpSolver.solve(model.model(), &SolverConfig::default());
    let packing = model.decode(&outcome).expect("incumbent");

    assert_eq!(outcome.status(), SolverStatus::Optimal);
    assert!(packing.is_valid());
    assert_eq!(packing.bins_used(), 4);
    assert!(model.model().is_satisfied(&outcome.values));
}

#[test]
fn ffd_limit_keeps_the_optimum() {
    let instance = InstanceGenerator::new(30).generate_unit(6, 1);
    let solver_config = SolverConfig::default().with_time_limit_seconds(20.0);

    let full = formulate(&instance);
    let tight = formulate_with(
        &instance,
        &FormulationConfig::default().with_bin_limit(BinLimit::FirstFitDecreasing),
    );
    assert!(tight.bin_count() <= full.bin_count());

    let a = extract(&MilpSolver.solve(full.model(), &solver_config));
    let b = extract(&MilpSolver.solve(tight.model(), &solver_config));
    assert_eq!(a.status, SolverStatus::Optimal);
    assert_eq!(b.status, SolverStatus::Optimal);
    assert_eq!(a.bins_used(), b.bins_used());
}

#[test]
fn oversize_item_is_infeasible_not_an_error() {
    let config = small_config()
        .with_sizes(vec![2])
        .with_repetitions(1)
        .with_capacity(5)
        .with_weight_range(6, 8);
    let runner = ExperimentRunner::new(config).unwrap();

    let records = runner.run(&MilpSolver);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, SolverStatus::Infeasible);
    assert_eq!(records[0].bins_used, 0);
    assert_eq!(records[0].gap_percent, 0.0);
}
