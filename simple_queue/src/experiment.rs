//! Runs a configuration once or many times over independent seeds.

use std::error::Error;

use des::parallel::{ParallelRunner, simple_progress_reporter};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SimulationConfig;
use crate::output::{RunOutput, SimulationOutput};
use crate::simulator::Simulator;

/// Run every scenario of `config` and collect the results in run order.
///
/// Each run gets its own queue, consumer and `StdRng` seeded with
/// `config.seed_for_run(run)`, so results do not depend on `num_threads`.
/// Any failed run fails the whole experiment.
pub fn run_experiment(
    config: &SimulationConfig,
    num_threads: Option<usize>,
) -> Result<SimulationOutput, Box<dyn Error>> {
    config.validate()?;
    let prototype = Simulator::seeded(
        config.duration,
        config.arrival_chance,
        config.service_rate,
        config.seed,
    )?;

    log::info!(
        "running {} scenario(s): duration={} arrival_chance=1/{} service_rate={}/min",
        config.runs,
        config.duration,
        config.arrival_chance,
        config.service_rate
    );

    let mut runner = ParallelRunner::new(config.runs, |run| {
        prototype.replicate(StdRng::seed_from_u64(config.seed_for_run(run)))
    });
    if config.runs > 1 {
        runner = runner.progress(simple_progress_reporter((config.runs / 10).max(1)));
    }
    if let Some(n) = num_threads {
        runner = runner.num_threads(n);
    }

    let mut runs = Vec::with_capacity(config.runs);
    for (run, result) in runner.run(config.duration).into_iter().enumerate() {
        let stats = result.map_err(|e| format!("run {} failed: {}", run, e))?;
        runs.push(RunOutput::new(run, config.seed_for_run(run), stats));
    }

    Ok(SimulationOutput {
        config: config.clone(),
        runs,
    })
}
