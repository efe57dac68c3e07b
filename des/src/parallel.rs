//! Parallel execution of independent tick-stepped scenarios
//!
//! Used for statistical sampling: the same model is run many times, each
//! scenario with its own seed and its own agent state.
//!
//! # Example: Running 100 seeded scenarios
//!
//! ```rust
//! use des::parallel::{ParallelRunner, simple_progress_reporter};
//! # use des::Agent;
//! # struct Counter { seed: u64, ticks: usize }
//! # impl Agent for Counter {
//! #     type Stats = (u64, usize);
//! #     type Error = String;
//! #     fn act(&mut self, _t: usize) -> Result<(), String> { self.ticks += 1; Ok(()) }
//! #     fn stats(&self) -> (u64, usize) { (self.seed, self.ticks) }
//! # }
//!
//! let results = ParallelRunner::new(100, |scenario_id| {
//!     let seed = 42 + scenario_id as u64;
//!     Counter { seed, ticks: 0 }
//! })
//! .progress(simple_progress_reporter(10))
//! .num_threads(4)
//! .run(1000);
//!
//! for (id, result) in results.iter().enumerate() {
//!     match result {
//!         Ok((seed, ticks)) => assert_eq!((*seed, *ticks), (42 + id as u64, 1000)),
//!         Err(e) => eprintln!("Scenario {} failed: {}", id, e),
//!     }
//! }
//! ```
//!
//! # Determinism
//!
//! Results are deterministic when:
//! 1. The builder uses `scenario_id` to derive unique seeds
//! 2. Agents own seeded RNGs (e.g. `StdRng::seed_from_u64(seed)`)
//! 3. No mutable state is shared across scenarios
//!
//! Results come back in scenario_id order regardless of thread count.
//!
//! # Error Handling
//!
//! An agent error or a panic inside one scenario is returned as
//! `Err(String)` for that scenario only. Other scenarios keep running.

use crate::{Agent, run_ticks};
use rayon::prelude::*;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Executes many independent scenarios on a rayon pool
///
/// Generic over:
/// - `A`: Agent type built fresh for every scenario
/// - `F`: Builder function type, `Fn(scenario_id) -> A`
pub struct ParallelRunner<A, F>
where
    F: Fn(usize) -> A + Send + Sync,
    A: Agent,
{
    num_scenarios: usize,
    builder: F,
    num_threads: Option<usize>,
    progress_callback: Option<Arc<dyn Fn(usize, usize) + Send + Sync>>,
    _marker: PhantomData<fn() -> A>,
}

impl<A, F> ParallelRunner<A, F>
where
    F: Fn(usize) -> A + Send + Sync,
    A: Agent,
    A::Stats: Send,
    A::Error: Display,
{
    pub fn new(num_scenarios: usize, builder: F) -> Self {
        ParallelRunner {
            num_scenarios,
            builder,
            num_threads: None,
            progress_callback: None,
            _marker: PhantomData,
        }
    }

    /// Set number of threads (defaults to rayon's global pool)
    pub fn num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    /// Set progress callback, called with `(completed, total)` after each scenario
    pub fn progress<P>(mut self, callback: P) -> Self
    where
        P: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Execute all scenarios for `run_until` ticks and return results in order
    ///
    /// - `Ok(stats)` holds the agent's stats after a complete run
    /// - `Err(String)` holds the agent error or panic message
    pub fn run(self, run_until: usize) -> Vec<Result<A::Stats, String>> {
        let progress_counter = AtomicUsize::new(0);

        let pool = match self.num_threads {
            Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => Some(pool),
                Err(e) => {
                    log::warn!("could not build a {}-thread pool, using global pool: {}", n, e);
                    None
                }
            },
            None => None,
        };

        let execute = || {
            (0..self.num_scenarios)
                .into_par_iter()
                .map(|scenario_id| {
                    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        let mut agent = (self.builder)(scenario_id);
                        run_ticks(&mut agent, run_until)
                            .map(|_| agent.stats())
                            .map_err(|e| e.to_string())
                    }));

                    let completed = progress_counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(ref callback) = self.progress_callback {
                        callback(completed, self.num_scenarios);
                    }

                    match result {
                        Ok(outcome) => outcome,
                        Err(panic) => Err(panic_message(panic)),
                    }
                })
                .collect()
        };

        if let Some(pool) = pool {
            pool.install(execute)
        } else {
            execute()
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Run scenarios in parallel with default settings
///
/// For thread count or progress reporting, use `ParallelRunner`.
pub fn run_parallel<A, F>(
    num_scenarios: usize,
    builder: F,
    run_until: usize,
) -> Vec<Result<A::Stats, String>>
where
    F: Fn(usize) -> A + Send + Sync,
    A: Agent,
    A::Stats: Send,
    A::Error: Display,
{
    ParallelRunner::new(num_scenarios, builder).run(run_until)
}

/// Run scenarios in batches of at most `batch_size` to bound peak memory
pub fn run_batched<A, F>(
    num_scenarios: usize,
    batch_size: usize,
    builder: F,
    run_until: usize,
) -> Vec<Result<A::Stats, String>>
where
    F: Fn(usize) -> A + Send + Sync,
    A: Agent,
    A::Stats: Send,
    A::Error: Display,
{
    let mut all_results = Vec::with_capacity(num_scenarios);

    for batch_start in (0..num_scenarios).step_by(batch_size.max(1)) {
        let batch_end = (batch_start + batch_size.max(1)).min(num_scenarios);
        let batch_results = run_parallel(
            batch_end - batch_start,
            |local_id| builder(batch_start + local_id),
            run_until,
        );
        all_results.extend(batch_results);
    }

    all_results
}

/// Progress callback that logs every `interval` completed scenarios
pub fn simple_progress_reporter(interval: usize) -> impl Fn(usize, usize) + Send + Sync {
    let interval = interval.max(1);
    move |completed, total| {
        if completed % interval == 0 || completed == total {
            log::info!("Completed {}/{} scenarios", completed, total);
        }
    }
}
