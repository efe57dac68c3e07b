use crate::error::SimError;
use crate::{SECONDS_PER_MINUTE, WorkItem};

/// Single-slot processor that finishes one item every `60 / service_rate` ticks.
///
/// Remaining service time is fractional and is decremented by exactly one
/// tick at a time; the slot frees up on the first tick that takes it to zero
/// or below, so an item occupies the consumer for `ceil(60 / service_rate)`
/// ticks.
#[derive(Debug, Clone)]
pub struct Consumer {
    service_rate: f64, // items per minute
    current_item: Option<WorkItem>,
    remaining_ticks: f64,
}

impl Consumer {
    pub fn new(service_rate: f64) -> Result<Consumer, SimError> {
        if !service_rate.is_finite() || service_rate <= 0.0 {
            return Err(SimError::InvalidServiceRate(service_rate));
        }
        Ok(Consumer {
            service_rate,
            current_item: None,
            remaining_ticks: 0.0,
        })
    }

    /// Idle consumer with the same service rate.
    pub fn fresh(&self) -> Consumer {
        Consumer {
            service_rate: self.service_rate,
            current_item: None,
            remaining_ticks: 0.0,
        }
    }

    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    /// Ticks needed to service one item, before any rounding.
    pub fn service_duration(&self) -> f64 {
        SECONDS_PER_MINUTE / self.service_rate
    }

    pub fn is_busy(&self) -> bool {
        self.current_item.is_some()
    }

    pub fn current_item(&self) -> Option<&WorkItem> {
        self.current_item.as_ref()
    }

    pub fn remaining_ticks(&self) -> f64 {
        self.remaining_ticks
    }

    pub fn add_task(&mut self, item: WorkItem) -> Result<(), SimError> {
        if self.is_busy() {
            return Err(SimError::ConsumerBusy);
        }
        self.current_item = Some(item);
        self.remaining_ticks = self.service_duration();
        Ok(())
    }

    pub fn tick(&mut self) {
        if self.current_item.is_none() {
            return;
        }
        self.remaining_ticks -= 1.0;
        if self.remaining_ticks <= 0.0 {
            self.current_item = None;
        }
    }
}
