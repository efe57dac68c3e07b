//! Service rate sweep over many seeded runs
//!
//! Arrivals come with a 1-in-5 chance per second (12 per minute on average).
//! For each service rate the same 200 seeds are replayed in parallel, 50 at a
//! time, and the
//! mean wait and mean backlog are reported, showing how queueing blows up as
//! the service rate approaches the arrival rate.
//!
//! Run with:
//!   cargo run --example parallel_demo -p simple_queue

use des::parallel::run_batched;
use rand::SeedableRng;
use rand::rngs::StdRng;
use simple_queue::{Consumer, Simulator, Summary};

const DURATION: usize = 3600;
const ARRIVAL_CHANCE: usize = 5;
const SCENARIOS: usize = 200;
const BATCH_SIZE: usize = 50;

fn main() {
    env_logger::init();

    println!("=== Service rate sweep ===");
    println!(
        "{} scenarios x {} s, arrival chance 1/{}\n",
        SCENARIOS, DURATION, ARRIVAL_CHANCE
    );
    println!("{:>8} {:>12} {:>12} {:>10}", "rate/min", "mean wait", "max wait", "backlog");

    for service_rate in [6.0, 10.0, 12.0, 15.0, 20.0, 30.0] {
        let consumer = match Consumer::new(service_rate) {
            Ok(consumer) => consumer,
            Err(e) => {
                eprintln!("skipping rate {}: {}", service_rate, e);
                continue;
            }
        };

        let start = std::time::Instant::now();
        let results = run_batched(
            SCENARIOS,
            BATCH_SIZE,
            |scenario_id| {
                let source = StdRng::seed_from_u64(scenario_id as u64);
                Simulator::new(DURATION, ARRIVAL_CHANCE, consumer.fresh(), source)
                    .expect("arrival chance is non-zero")
            },
            DURATION,
        );

        let runs: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        let pooled: Vec<usize> = runs.iter().flat_map(|r| r.wait_times.iter().copied()).collect();
        let summary = Summary::from_wait_times(&pooled);
        let backlog = runs.iter().map(|r| r.backlog).sum::<usize>() as f64 / runs.len().max(1) as f64;

        println!(
            "{:>8.1} {:>11.1}s {:>11}s {:>10.1}   ({:.2}s)",
            service_rate,
            summary.average.unwrap_or(0.0),
            summary.max.unwrap_or(0),
            backlog,
            start.elapsed().as_secs_f64()
        );
    }

    println!("\nThe same seeds are replayed for every rate, so rows differ only by service rate.");
}
