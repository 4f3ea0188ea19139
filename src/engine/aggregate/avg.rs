use crate::engine::aggregate::state::{Advance, AggregateState};
use crate::engine::errors::AggregateError;
use crate::engine::types::{DecimalVal, Integer, Real};

/// AVG accumulates in `f64` whatever the input type, decimals included.
#[derive(Debug, Default)]
pub struct AvgAggregate {
    sum: f64,
    count: u64,
}

impl AvgAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn add(&mut self, term: f64) {
        self.sum += term;
        self.count += 1;
    }

    /// Sum and count without finalizing, for shipping a partial.
    pub fn sum_count(&self) -> (f64, u64) {
        (self.sum, self.count)
    }
}

impl AggregateState for AvgAggregate {
    type Output = Real;

    #[inline]
    fn merge(&mut self, other: &Self) -> Result<(), AggregateError> {
        self.sum += other.sum;
        self.count += other.count;
        Ok(())
    }

    fn reset(&mut self) {
        self.sum = 0.0;
        self.count = 0;
    }

    fn result(&self) -> Real {
        if self.count == 0 {
            return Real::null();
        }
        Real::new(self.sum / self.count as f64)
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Advance<Integer> for AvgAggregate {
    fn advance(&mut self, value: &Integer) -> Result<(), AggregateError> {
        if let Some(v) = value.payload() {
            self.add(*v as f64);
        }
        Ok(())
    }
}

impl Advance<Real> for AvgAggregate {
    fn advance(&mut self, value: &Real) -> Result<(), AggregateError> {
        if let Some(v) = value.payload() {
            self.add(*v);
        }
        Ok(())
    }
}

impl Advance<DecimalVal> for AvgAggregate {
    fn advance(&mut self, value: &DecimalVal) -> Result<(), AggregateError> {
        if let Some(v) = value.payload() {
            self.add(v.to_f64(value.precision() as u32));
        }
        Ok(())
    }
}
