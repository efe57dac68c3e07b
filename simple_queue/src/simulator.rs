use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::consumer::Consumer;
use crate::error::SimError;
use crate::queue::WorkQueue;
use crate::source::ArrivalSource;
use crate::WorkItem;

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub wait_times: Vec<usize>, // in dequeue order
    pub backlog: usize,         // items never serviced
    pub arrivals: usize,
}

/// Tick-driven producer/consumer orchestrator.
///
/// Every tick, in this order:
/// 1. with probability `1 / arrival_chance` a new item stamped with the
///    current tick joins the queue
/// 2. an idle consumer takes the head of the queue, and the item's wait time
///    is recorded
/// 3. the consumer advances by one tick
pub struct Simulator<R = StdRng> {
    duration: usize,
    arrival_chance: usize,
    queue: WorkQueue<WorkItem>,
    consumer: Consumer,
    source: R,
    current_tick: usize,
    next_tick: usize,
    finished: bool,
    arrivals: usize,
    wait_times: Vec<usize>,
}

impl Simulator<StdRng> {
    /// Simulator drawing arrivals from `StdRng::seed_from_u64(seed)`.
    pub fn seeded(
        duration: usize,
        arrival_chance: usize,
        service_rate: f64,
        seed: u64,
    ) -> Result<Simulator<StdRng>, SimError> {
        let consumer = Consumer::new(service_rate)?;
        Simulator::new(duration, arrival_chance, consumer, StdRng::seed_from_u64(seed))
    }
}

impl<R: ArrivalSource> Simulator<R> {
    pub fn new(
        duration: usize,
        arrival_chance: usize,
        consumer: Consumer,
        source: R,
    ) -> Result<Simulator<R>, SimError> {
        if arrival_chance == 0 {
            return Err(SimError::InvalidArrivalChance(arrival_chance));
        }
        Ok(Simulator {
            duration,
            arrival_chance,
            queue: WorkQueue::new(),
            consumer,
            source,
            current_tick: 0,
            next_tick: 0,
            finished: false,
            arrivals: 0,
            wait_times: Vec::new(),
        })
    }

    /// Fresh simulator with the same parameters and an idle consumer,
    /// drawing from a different source.
    pub fn replicate<S: ArrivalSource>(&self, source: S) -> Simulator<S> {
        Simulator {
            duration: self.duration,
            arrival_chance: self.arrival_chance,
            queue: WorkQueue::new(),
            consumer: self.consumer.fresh(),
            source,
            current_tick: 0,
            next_tick: 0,
            finished: false,
            arrivals: 0,
            wait_times: Vec::new(),
        }
    }

    pub fn should_generate_arrival(&mut self) -> bool {
        self.source.draw(1, self.arrival_chance) == self.arrival_chance
    }

    /// Drive all `duration` ticks and return the recorded wait times.
    ///
    /// A simulator runs once; a second call fails with
    /// [`SimError::AlreadyRun`]. Items still queued afterwards are reported
    /// by [`Simulator::backlog`].
    pub fn run(&mut self) -> Result<Vec<usize>, SimError> {
        if self.finished {
            return Err(SimError::AlreadyRun);
        }
        self.finished = true;
        let duration = self.duration;
        des::run_ticks(self, duration)?;
        log::info!(
            "simulated {} ticks: {} arrivals, {} serviced, {} left in queue",
            duration,
            self.arrivals,
            self.wait_times.len(),
            self.queue.size()
        );
        Ok(self.wait_times.clone())
    }

    pub fn duration(&self) -> usize {
        self.duration
    }

    pub fn arrival_chance(&self) -> usize {
        self.arrival_chance
    }

    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    pub fn backlog(&self) -> usize {
        self.queue.size()
    }

    pub fn arrivals(&self) -> usize {
        self.arrivals
    }

    pub fn wait_times(&self) -> &[usize] {
        &self.wait_times
    }

    pub fn queue(&self) -> &WorkQueue<WorkItem> {
        &self.queue
    }

    pub fn consumer(&self) -> &Consumer {
        &self.consumer
    }
}

impl<R: ArrivalSource> des::Agent for Simulator<R> {
    type Stats = RunStats;
    type Error = SimError;

    fn act(&mut self, current_t: usize) -> Result<(), SimError> {
        if current_t != self.next_tick {
            return Err(SimError::TickOutOfOrder {
                expected: self.next_tick,
                got: current_t,
            });
        }
        self.current_tick = current_t;
        self.next_tick = current_t + 1;

        if self.should_generate_arrival() {
            self.queue.enqueue(WorkItem::new(current_t));
            self.arrivals += 1;
            log::debug!("[{}] arrival, queue size {}", current_t, self.queue.size());
        }

        if !self.consumer.is_busy() && !self.queue.is_empty() {
            let item = self.queue.dequeue()?;
            let wait_time = item.wait_time(current_t);
            self.consumer.add_task(item)?;
            self.wait_times.push(wait_time);
            log::debug!(
                "[{}] dispatched item created at {} after waiting {}",
                current_t,
                item.created_at(),
                wait_time
            );
        }

        self.consumer.tick();
        log::trace!(
            "[{}] busy={} remaining={:.3} queued={}",
            current_t,
            self.consumer.is_busy(),
            self.consumer.remaining_ticks(),
            self.queue.size()
        );
        Ok(())
    }

    fn stats(&self) -> RunStats {
        RunStats {
            wait_times: self.wait_times.clone(),
            backlog: self.queue.size(),
            arrivals: self.arrivals,
        }
    }
}
