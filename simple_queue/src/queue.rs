use std::collections::VecDeque;

use crate::error::SimError;

/// Strict FIFO holding area: items leave in the order they arrived.
#[derive(Debug, Clone)]
pub struct WorkQueue<T> {
    items: VecDeque<T>,
}

impl<T> WorkQueue<T> {
    pub fn new() -> WorkQueue<T> {
        WorkQueue {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn dequeue(&mut self) -> Result<T, SimError> {
        self.items.pop_front().ok_or(SimError::EmptyQueue)
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Next item to be dequeued, if any.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Iterate in service order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        WorkQueue::new()
    }
}
