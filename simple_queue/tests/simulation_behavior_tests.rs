// Given-When-Then tests for the tick-by-tick orchestration
// Queue, consumer and simulator are driven through their public interface only

use std::collections::VecDeque;

use simple_queue::{ArrivalSource, Consumer, SimError, Simulator, WorkItem, WorkQueue};

/// Replays scripted draws; once exhausted every draw returns the low bound.
struct ScriptedSource {
    draws: VecDeque<usize>,
}

impl ScriptedSource {
    fn new(draws: &[usize]) -> ScriptedSource {
        ScriptedSource {
            draws: draws.iter().copied().collect(),
        }
    }
}

impl ArrivalSource for ScriptedSource {
    fn draw(&mut self, low: usize, _high: usize) -> usize {
        self.draws.pop_front().unwrap_or(low)
    }
}

#[test]
fn given_items_a_b_c_enqueued_when_dequeued_then_fifo_order() {
    // GIVEN: three items enqueued in order
    let mut queue = WorkQueue::new();
    let (a, b, c) = (WorkItem::new(0), WorkItem::new(1), WorkItem::new(2));
    queue.enqueue(a);
    queue.enqueue(b);
    queue.enqueue(c);

    // WHEN/THEN: they come out in the same order
    assert_eq!(queue.dequeue(), Ok(a));
    assert_eq!(queue.dequeue(), Ok(b));
    assert_eq!(queue.size(), 1);
    assert_eq!(queue.dequeue(), Ok(c));

    // THEN: dequeuing past empty fails
    assert_eq!(queue.dequeue(), Err(SimError::EmptyQueue));
}

#[test]
fn given_busy_consumer_when_task_added_then_consumer_busy_error() {
    // GIVEN: a consumer working on an item
    let mut consumer = Consumer::new(30.0).unwrap();
    assert!(!consumer.is_busy());
    consumer.add_task(WorkItem::new(0)).unwrap();
    assert!(consumer.is_busy());

    // WHEN: another item is handed over
    let result = consumer.add_task(WorkItem::new(1));

    // THEN: rejected, first item still in service
    assert_eq!(result, Err(SimError::ConsumerBusy));
    assert_eq!(consumer.current_item(), Some(&WorkItem::new(0)));

    // THEN: idle after ceil(60 / 30) = 2 ticks
    consumer.tick();
    assert!(consumer.is_busy());
    consumer.tick();
    assert!(!consumer.is_busy());
}

#[test]
fn given_arrival_every_tick_and_one_tick_service_when_run_then_no_waiting() {
    // GIVEN: 10 seconds, guaranteed arrival every second, 60 items/min
    let mut sim = Simulator::seeded(10, 1, 60.0, 0).unwrap();

    // WHEN
    let waits = sim.run().unwrap();

    // THEN: every item is picked up the tick it lands
    assert_eq!(waits, vec![0; 10]);
    assert_eq!(sim.backlog(), 0);
    assert_eq!(sim.arrivals(), 10);
}

#[test]
fn given_arrival_every_tick_and_two_tick_service_when_run_then_backlog_builds() {
    // GIVEN: 5 seconds, guaranteed arrival every second, 30 items/min
    let mut sim = Simulator::seeded(5, 1, 30.0, 0).unwrap();

    // WHEN
    let waits = sim.run().unwrap();

    // THEN: items from ticks 0, 1, 2 start service at ticks 0, 2, 4
    assert_eq!(waits, vec![0, 1, 2]);

    // THEN: items from ticks 3 and 4 are left over
    assert_eq!(sim.backlog(), 2);
    let leftover: Vec<usize> = sim.queue().iter().map(|item| item.created_at()).collect();
    assert_eq!(leftover, vec![3, 4]);
    assert!(sim.consumer().is_busy());
}

#[test]
fn given_finished_run_when_run_again_then_already_run_and_results_kept() {
    // GIVEN: a completed run that left items from ticks 3 and 4 queued
    let mut sim = Simulator::seeded(5, 1, 30.0, 0).unwrap();
    let waits = sim.run().unwrap();

    // WHEN: the same simulator is run again
    let second = sim.run();

    // THEN: refused, and nothing recorded by the first run changes
    assert_eq!(second, Err(SimError::AlreadyRun));
    assert_eq!(sim.wait_times(), waits.as_slice());
    assert_eq!(sim.backlog(), 2);
    assert_eq!(sim.current_tick(), 4);
}

#[test]
fn given_consumer_faster_than_a_tick_when_run_then_every_wait_is_zero() {
    // GIVEN: half a tick per item
    let mut sim = Simulator::seeded(50, 1, 120.0, 9).unwrap();

    // WHEN
    let waits = sim.run().unwrap();

    // THEN
    assert_eq!(waits.len(), 50);
    assert!(waits.iter().all(|&w| w == 0));
}

#[test]
fn given_zero_duration_when_run_then_nothing_happens() {
    let mut sim = Simulator::seeded(0, 1, 10.0, 3).unwrap();

    assert!(sim.run().unwrap().is_empty());
    assert_eq!(sim.backlog(), 0);
    assert_eq!(sim.arrivals(), 0);
}

#[test]
fn given_scripted_arrivals_when_run_then_waits_follow_trace() {
    // GIVEN: 1-in-3 chance; arrivals land where the draw is 3 (ticks 0, 1, 2, 6)
    // service takes 60 / 25 = 2.4 ticks, so 3 ticks of occupancy
    let source = ScriptedSource::new(&[3, 3, 3, 1, 2, 1, 3, 1, 1, 1]);
    let consumer = Consumer::new(25.0).unwrap();
    let mut sim = Simulator::new(10, 3, consumer, source).unwrap();

    // WHEN
    let waits = sim.run().unwrap();

    // THEN: dispatched at ticks 0, 3, 6, 9
    assert_eq!(waits, vec![0, 2, 4, 3]);
    assert_eq!(sim.backlog(), 0);
    assert_eq!(sim.current_tick(), 9);
}

#[test]
fn given_same_seed_when_run_twice_then_identical_results() {
    let mut first = Simulator::seeded(1800, 5, 10.0, 42).unwrap();
    let mut second = Simulator::seeded(1800, 5, 10.0, 42).unwrap();

    assert_eq!(first.run().unwrap(), second.run().unwrap());
    assert_eq!(first.backlog(), second.backlog());
}

#[test]
fn given_different_seeds_when_run_then_results_differ() {
    let mut first = Simulator::seeded(1800, 5, 10.0, 1).unwrap();
    let mut second = Simulator::seeded(1800, 5, 10.0, 2).unwrap();

    assert_ne!(first.run().unwrap(), second.run().unwrap());
}

#[test]
fn given_any_run_then_every_arrival_is_serviced_or_backlogged() {
    for seed in 0..20 {
        let mut sim = Simulator::seeded(500, 3, 15.0, seed).unwrap();
        let waits = sim.run().unwrap();
        assert_eq!(sim.arrivals(), waits.len() + sim.backlog(), "seed {}", seed);
    }
}

#[test]
fn given_long_run_then_arrival_rate_matches_one_in_n() {
    let mut sim = Simulator::seeded(100_000, 4, 60.0, 2024).unwrap();
    sim.run().unwrap();

    let expected = 25_000.0;
    let observed = sim.arrivals() as f64;
    assert!(
        (observed - expected).abs() < 750.0,
        "expected about {} arrivals, saw {}",
        expected,
        observed
    );
}
