//! Logical-time kernel for tick-stepped simulations.
//!
//! An [`Agent`] owns all of its model state and is advanced one tick at a
//! time by [`run_ticks`]. Ticks are processed strictly in order, starting at
//! zero, and the first error returned by an agent halts the run.

pub mod parallel;

pub trait Agent {
    type Stats;
    type Error;

    /// Process a single tick of logical time.
    fn act(&mut self, current_t: usize) -> Result<(), Self::Error>;

    fn stats(&self) -> Self::Stats;
}

/// Drive `agent` through ticks `0..run_until`.
///
/// Returns the number of ticks processed.
pub fn run_ticks<A>(agent: &mut A, run_until: usize) -> Result<usize, A::Error>
where
    A: Agent + ?Sized,
{
    for current_t in 0..run_until {
        log::trace!("tick {}", current_t);
        agent.act(current_t)?;
    }
    Ok(run_until)
}
