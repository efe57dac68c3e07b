//! Run results and their export to CSV and JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::simulator::RunStats;
use crate::stats::Summary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub config: SimulationConfig,
    pub runs: Vec<RunOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    pub run: usize,
    pub seed: u64,
    pub wait_times: Vec<usize>,
    pub backlog: usize,
    pub arrivals: usize,
    pub summary: Summary,
}

impl RunOutput {
    pub fn new(run: usize, seed: u64, stats: RunStats) -> RunOutput {
        let summary = Summary::from_wait_times(&stats.wait_times);
        RunOutput {
            run,
            seed,
            wait_times: stats.wait_times,
            backlog: stats.backlog,
            arrivals: stats.arrivals,
            summary,
        }
    }

    /// Human-readable summary; statistics that cannot be computed show as `n/a`.
    pub fn report(&self) -> String {
        let average = match self.summary.average {
            Some(avg) => format!("{:.1}s", avg),
            None => "n/a".to_string(),
        };
        format!(
            "Average wait time: {}\nMax wait time: {}\nMin wait time: {}\nUnfinished tasks: {}",
            average,
            seconds_or_na(self.summary.max),
            seconds_or_na(self.summary.min_nonzero),
            self.backlog
        )
    }
}

fn seconds_or_na(value: Option<usize>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{}s", v))
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl SimulationOutput {
    /// Statistics over the wait times of every run pooled together.
    pub fn pooled_summary(&self) -> Summary {
        let pooled: Vec<usize> = self
            .runs
            .iter()
            .flat_map(|r| r.wait_times.iter().copied())
            .collect();
        Summary::from_wait_times(&pooled)
    }

    pub fn mean_backlog(&self) -> Option<f64> {
        if self.runs.is_empty() {
            return None;
        }
        let total: usize = self.runs.iter().map(|r| r.backlog).sum();
        Some(total as f64 / self.runs.len() as f64)
    }

    /// One row per serviced item: `run,index,wait_time`
    pub fn write_wait_times_csv<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record(["run", "index", "wait_time"])?;

        for run in &self.runs {
            for (index, wait_time) in run.wait_times.iter().enumerate() {
                wtr.write_record(&[
                    run.run.to_string(),
                    index.to_string(),
                    wait_time.to_string(),
                ])?;
            }
        }

        wtr.flush()?;
        Ok(())
    }

    /// One row per run with its summary statistics
    pub fn write_runs_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record([
            "run",
            "seed",
            "arrivals",
            "serviced",
            "backlog",
            "average_wait",
            "max_wait",
            "min_nonzero_wait",
        ])?;

        for run in &self.runs {
            wtr.write_record(&[
                run.run.to_string(),
                run.seed.to_string(),
                run.arrivals.to_string(),
                run.summary.count.to_string(),
                run.backlog.to_string(),
                opt_to_string(run.summary.average),
                opt_to_string(run.summary.max),
                opt_to_string(run.summary.min_nonzero),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn write_summary_json<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write all outputs to a directory
    ///
    /// Creates:
    /// - wait_times.csv
    /// - runs.csv
    /// - summary.json
    pub fn write_all<P: AsRef<Path>>(&self, dir: P) -> Result<(), Box<dyn std::error::Error>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        self.write_wait_times_csv(dir.join("wait_times.csv"))?;
        self.write_runs_csv(dir.join("runs.csv"))?;
        self.write_summary_json(dir.join("summary.json"))?;

        log::info!("wrote results to {}", dir.display());
        Ok(())
    }
}
