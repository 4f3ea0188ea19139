use crate::engine::aggregate::state::{Advance, AggregateState};
use crate::engine::errors::AggregateError;
use crate::engine::types::{NullableValue, Summable};

/// SUM over any summable payload. NULL inputs are skipped, not treated as zero.
#[derive(Debug)]
pub struct SumAggregate<T: Summable> {
    sum: T,
    has_value: bool,
}

impl<T: Summable> SumAggregate<T> {
    pub fn new() -> Self {
        Self {
            sum: T::zero(),
            has_value: false,
        }
    }

    /// Adds a non-null payload. On overflow the state is left as it was.
    #[inline]
    pub(crate) fn add_value(&mut self, value: &T) -> Result<(), AggregateError> {
        self.sum = self.sum.checked_sum(value)?;
        self.has_value = true;
        Ok(())
    }

    /// Whether `add_value(value)` would succeed.
    #[inline]
    pub(crate) fn check_add(&self, value: &T) -> Result<(), AggregateError> {
        self.sum.checked_sum(value)?;
        Ok(())
    }

    pub(crate) fn sum(&self) -> Option<&T> {
        self.has_value.then_some(&self.sum)
    }
}

impl<T: Summable> Default for SumAggregate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Summable> AggregateState for SumAggregate<T> {
    type Output = NullableValue<T>;

    fn merge(&mut self, other: &Self) -> Result<(), AggregateError> {
        match other.sum() {
            Some(partial) => self.add_value(partial),
            None => Ok(()),
        }
    }

    fn check_merge(&self, other: &Self) -> Result<(), AggregateError> {
        match other.sum() {
            Some(partial) => self.check_add(partial),
            None => Ok(()),
        }
    }

    fn reset(&mut self) {
        self.sum = T::zero();
        self.has_value = false;
    }

    fn result(&self) -> NullableValue<T> {
        self.sum().cloned().into()
    }

    fn is_empty(&self) -> bool {
        !self.has_value
    }
}

impl<T: Summable> Advance<NullableValue<T>> for SumAggregate<T> {
    fn advance(&mut self, value: &NullableValue<T>) -> Result<(), AggregateError> {
        match value.payload() {
            Some(v) => self.add_value(v),
            None => Ok(()),
        }
    }

    fn check_advance(&self, value: &NullableValue<T>) -> Result<(), AggregateError> {
        match value.payload() {
            Some(v) => self.check_add(v),
            None => Ok(()),
        }
    }
}
