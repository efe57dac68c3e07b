//! Single-producer/single-consumer queue simulation in logical time.
//!
//! Work items arrive with a fixed 1-in-N chance per tick, wait in a FIFO
//! queue, and are serviced one at a time by a consumer working at a fixed
//! rate (items per minute, one tick being one second). A run yields the wait
//! time of every item that started service and leaves the unserviced
//! remainder in the queue as backlog.

pub mod config;
pub mod consumer;
pub mod error;
pub mod experiment;
pub mod output;
pub mod queue;
pub mod simulator;
pub mod source;
pub mod stats;

pub use config::SimulationConfig;
pub use consumer::Consumer;
pub use error::{ConfigError, SimError, StatsError};
pub use queue::WorkQueue;
pub use simulator::{RunStats, Simulator};
pub use source::ArrivalSource;
pub use stats::{Calculator, Summary};

pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// An arrival, stamped with the tick it was created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    created_at: usize,
}

impl WorkItem {
    pub fn new(created_at: usize) -> WorkItem {
        WorkItem { created_at }
    }

    pub fn created_at(&self) -> usize {
        self.created_at
    }

    /// Ticks spent queued when dequeued at `current_t`.
    ///
    /// Panics if `current_t` precedes the item's creation.
    pub fn wait_time(&self, current_t: usize) -> usize {
        current_t - self.created_at
    }
}
