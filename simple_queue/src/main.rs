use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use simple_queue::SimulationConfig;
use simple_queue::experiment::run_experiment;

/// Simulate a single producer feeding a rate-limited consumer through a FIFO
/// queue. Defaults to the chocolate factory: 30 minutes, a 1-in-5 chance of a
/// new chocolate every second, eaten at 10 per minute.
#[derive(Parser, Debug)]
#[command(name = "simple_queue", version)]
struct Args {
    /// TOML file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds
    #[arg(long)]
    duration: Option<usize>,

    /// N for a 1-in-N chance of an arrival each second
    #[arg(long)]
    arrival_chance: Option<usize>,

    /// Items the consumer finishes per minute
    #[arg(long)]
    service_rate: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Independent runs, seeded seed, seed + 1, ...
    #[arg(long)]
    runs: Option<usize>,

    /// Worker threads for multiple runs
    #[arg(long)]
    threads: Option<usize>,

    /// Directory for wait_times.csv, runs.csv and summary.json
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<SimulationConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::chocolate_factory(),
        };
        if let Some(duration) = self.duration {
            config.duration = duration;
        }
        if let Some(arrival_chance) = self.arrival_chance {
            config.arrival_chance = arrival_chance;
        }
        if let Some(service_rate) = self.service_rate {
            config.service_rate = service_rate;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logger(verbose: bool) {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    if verbose {
        builder.filter_module("simple_queue", LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = args.resolve_config()?;
    let output = run_experiment(&config, args.threads)?;

    if let [run] = output.runs.as_slice() {
        println!("{}", run.report());
    } else {
        let pooled = output.pooled_summary();
        println!("Runs: {}", output.runs.len());
        match pooled.average {
            Some(avg) => println!("Average wait time (pooled): {:.1}s", avg),
            None => println!("Average wait time (pooled): n/a"),
        }
        match pooled.max {
            Some(max) => println!("Max wait time (pooled): {}s", max),
            None => println!("Max wait time (pooled): n/a"),
        }
        match pooled.min_nonzero {
            Some(min) => println!("Min wait time (pooled): {}s", min),
            None => println!("Min wait time (pooled): n/a"),
        }
        if let Some(backlog) = output.mean_backlog() {
            println!("Unfinished tasks (mean per run): {:.1}", backlog);
        }
    }

    if let Some(dir) = &args.output {
        output.write_all(dir)?;
    }

    Ok(())
}
