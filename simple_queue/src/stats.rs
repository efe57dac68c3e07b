//! Summary statistics over recorded wait times.

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

pub struct Calculator<'a> {
    wait_times: &'a [usize],
}

impl<'a> Calculator<'a> {
    pub fn new(wait_times: &'a [usize]) -> Calculator<'a> {
        Calculator { wait_times }
    }

    pub fn max(&self) -> Result<usize, StatsError> {
        self.wait_times.iter().copied().max().ok_or(StatsError::Empty)
    }

    /// Smallest wait strictly above zero.
    ///
    /// Items picked up on the tick they arrive wait zero ticks, which says
    /// nothing about queueing, so those are skipped.
    pub fn min_nonzero(&self) -> Result<usize, StatsError> {
        if self.wait_times.is_empty() {
            return Err(StatsError::Empty);
        }
        self.wait_times
            .iter()
            .copied()
            .filter(|&w| w > 0)
            .min()
            .ok_or(StatsError::NoNonZeroWait)
    }

    pub fn average(&self) -> Result<f64, StatsError> {
        if self.wait_times.is_empty() {
            return Err(StatsError::Empty);
        }
        let sum: usize = self.wait_times.iter().sum();
        Ok(sum as f64 / self.wait_times.len() as f64)
    }
}

/// All statistics at once, with degenerate values left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub average: Option<f64>,
    pub max: Option<usize>,
    pub min_nonzero: Option<usize>,
}

impl Summary {
    pub fn from_wait_times(wait_times: &[usize]) -> Summary {
        let calc = Calculator::new(wait_times);
        Summary {
            count: wait_times.len(),
            average: calc.average().ok(),
            max: calc.max().ok(),
            min_nonzero: calc.min_nonzero().ok(),
        }
    }
}
