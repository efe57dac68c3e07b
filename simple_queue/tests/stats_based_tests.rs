// Stats-based testing: summary statistics computed over real simulation output

use approx::assert_relative_eq;
use simple_queue::experiment::run_experiment;
use simple_queue::{Calculator, SimulationConfig, Simulator, StatsError, Summary};

#[test]
fn given_chocolate_factory_when_run_then_consumer_falls_behind() {
    // GIVEN: 1 chocolate every 5 s on average, eaten at 1 every 6 s
    let config = SimulationConfig::chocolate_factory();
    let mut sim = Simulator::seeded(
        config.duration,
        config.arrival_chance,
        config.service_rate,
        config.seed,
    )
    .unwrap();

    // WHEN
    let waits = sim.run().unwrap();
    let calc = Calculator::new(&waits);

    // THEN: the consumer cannot finish more than 1800 / 6 items
    assert!(waits.len() <= 300);
    assert!(sim.backlog() > 0);

    // THEN: statistics are well defined and consistent
    let max = calc.max().unwrap();
    let min = calc.min_nonzero().unwrap();
    let avg = calc.average().unwrap();
    assert!(min >= 1);
    assert!(min <= max);
    assert!(avg <= max as f64);
    assert_eq!(waits[0], 0, "first arrival finds an idle consumer");
}

#[test]
fn given_no_queueing_when_stats_computed_then_min_nonzero_is_degenerate() {
    // GIVEN: every item serviced the tick it arrives
    let mut sim = Simulator::seeded(30, 1, 60.0, 5).unwrap();
    let waits = sim.run().unwrap();

    // WHEN
    let calc = Calculator::new(&waits);

    // THEN
    assert_eq!(calc.max(), Ok(0));
    assert_relative_eq!(calc.average().unwrap(), 0.0);
    assert_eq!(calc.min_nonzero(), Err(StatsError::NoNonZeroWait));
}

#[test]
fn given_empty_run_when_stats_computed_then_all_degenerate() {
    let mut sim = Simulator::seeded(0, 2, 10.0, 5).unwrap();
    let waits = sim.run().unwrap();
    let calc = Calculator::new(&waits);

    assert_eq!(calc.max(), Err(StatsError::Empty));
    assert_eq!(calc.average(), Err(StatsError::Empty));
    assert_eq!(calc.min_nonzero(), Err(StatsError::Empty));

    let summary = Summary::from_wait_times(&waits);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.average, None);
}

#[test]
fn given_two_tick_service_trace_when_stats_computed_then_known_values() {
    let mut sim = Simulator::seeded(5, 1, 30.0, 0).unwrap();
    let waits = sim.run().unwrap();
    let summary = Summary::from_wait_times(&waits);

    assert_eq!(summary.count, 3);
    assert_eq!(summary.max, Some(2));
    assert_eq!(summary.min_nonzero, Some(1));
    assert_relative_eq!(summary.average.unwrap(), 1.0);
}

#[test]
fn given_many_runs_when_experiment_executed_then_pooled_summary_covers_all() {
    let config = SimulationConfig {
        duration: 900,
        arrival_chance: 6,
        service_rate: 12.0,
        seed: 7,
        runs: 12,
    };

    let output = run_experiment(&config, Some(3)).unwrap();

    assert_eq!(output.runs.len(), 12);
    let total_serviced: usize = output.runs.iter().map(|r| r.summary.count).sum();
    assert_eq!(output.pooled_summary().count, total_serviced);
    for run in &output.runs {
        assert_eq!(run.arrivals, run.wait_times.len() + run.backlog);
    }
}
