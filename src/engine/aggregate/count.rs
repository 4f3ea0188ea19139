use crate::engine::aggregate::state::{Advance, AggregateState};
use crate::engine::errors::{AggregateError, ArithmeticError};
use crate::engine::types::{Integer, Nullable};

/// Counts are reported as `Integer`, so they stop at `i64::MAX` with an error.
#[inline]
fn checked_count(count: i64, by: i64) -> Result<i64, AggregateError> {
    count
        .checked_add(by)
        .ok_or(AggregateError::Arithmetic(ArithmeticError::IntegerOverflow { op: "count" }))
}

/// COUNT(expr): counts non-null inputs.
#[derive(Debug, Default)]
pub struct CountAggregate {
    count: i64,
}

impl CountAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

impl AggregateState for CountAggregate {
    type Output = Integer;

    #[inline]
    fn merge(&mut self, other: &Self) -> Result<(), AggregateError> {
        self.count = checked_count(self.count, other.count)?;
        Ok(())
    }

    fn check_merge(&self, other: &Self) -> Result<(), AggregateError> {
        checked_count(self.count, other.count).map(drop)
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn result(&self) -> Integer {
        Integer::new(self.count)
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl<V: Nullable + ?Sized> Advance<V> for CountAggregate {
    #[inline]
    fn advance(&mut self, value: &V) -> Result<(), AggregateError> {
        if !value.is_null() {
            self.count = checked_count(self.count, 1)?;
        }
        Ok(())
    }

    fn check_advance(&self, value: &V) -> Result<(), AggregateError> {
        if value.is_null() {
            return Ok(());
        }
        checked_count(self.count, 1).map(drop)
    }
}

/// COUNT(*): counts rows regardless of their values.
#[derive(Debug, Default)]
pub struct CountStarAggregate {
    count: i64,
}

impl CountStarAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    /// Counts `rows` rows at once.
    pub fn advance_rows(&mut self, rows: u64) -> Result<(), AggregateError> {
        let rows = i64::try_from(rows)
            .map_err(|_| AggregateError::Arithmetic(ArithmeticError::IntegerOverflow { op: "count" }))?;
        self.count = checked_count(self.count, rows)?;
        Ok(())
    }
}

impl AggregateState for CountStarAggregate {
    type Output = Integer;

    #[inline]
    fn merge(&mut self, other: &Self) -> Result<(), AggregateError> {
        self.count = checked_count(self.count, other.count)?;
        Ok(())
    }

    fn check_merge(&self, other: &Self) -> Result<(), AggregateError> {
        checked_count(self.count, other.count).map(drop)
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn result(&self) -> Integer {
        Integer::new(self.count)
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl<V: ?Sized> Advance<V> for CountStarAggregate {
    #[inline]
    fn advance(&mut self, _value: &V) -> Result<(), AggregateError> {
        self.count = checked_count(self.count, 1)?;
        Ok(())
    }

    fn check_advance(&self, _value: &V) -> Result<(), AggregateError> {
        checked_count(self.count, 1).map(drop)
    }
}
