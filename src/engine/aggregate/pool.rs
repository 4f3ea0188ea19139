use tracing::debug;

use crate::engine::aggregate::ops::AggregatorImpl;
use crate::engine::aggregate::plan::AggregateOpSpec;
use crate::engine::errors::AggregateError;
use crate::shared::config::CONFIG;

/// Free list of per-group state vectors built for one list of aggregate ops.
///
/// Released vectors are reset before they are kept, so anything handed out by
/// `acquire` is observably equal to a freshly built one.
#[derive(Debug)]
pub struct StatePool {
    specs: Vec<AggregateOpSpec>,
    free: Vec<Vec<AggregatorImpl>>,
    capacity: usize,
}

impl StatePool {
    /// Pool sized from `aggregate.state_pool_capacity`.
    pub fn new(specs: Vec<AggregateOpSpec>) -> Self {
        Self::with_capacity(specs, CONFIG.aggregate.state_pool_capacity)
    }

    pub fn with_capacity(specs: Vec<AggregateOpSpec>, capacity: usize) -> Self {
        Self {
            specs,
            free: Vec::new(),
            capacity,
        }
    }

    pub fn specs(&self) -> &[AggregateOpSpec] {
        &self.specs
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of vectors waiting to be reused.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn acquire(&mut self) -> Result<Vec<AggregatorImpl>, AggregateError> {
        if let Some(states) = self.free.pop() {
            return Ok(states);
        }
        self.specs.iter().map(AggregatorImpl::from_spec).collect()
    }

    /// Resets and keeps `states` if there is room, otherwise drops them.
    pub fn release(&mut self, mut states: Vec<AggregatorImpl>) {
        if self.free.len() >= self.capacity || states.len() != self.specs.len() {
            return;
        }
        for state in states.iter_mut() {
            state.reset();
        }
        self.free.push(states);
        if self.free.len() == self.capacity {
            debug!(target: "decimal_agg::pool", capacity = self.capacity, "State pool full");
        }
    }
}
