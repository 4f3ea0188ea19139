//! Decimal SUM/MIN/MAX: the generic states over `Decimal128` plus the scale the
//! accumulated value is expressed at.
//!
//! The scale is adopted from the first non-null input. After that every
//! non-null input or partial must come at the same scale; a different one is a
//! caller bug and is reported as `ScaleMismatch`, never rescaled.

use crate::engine::aggregate::extremum::{ExtremumAggregate, ExtremumSide, MaxSide, MinSide};
use crate::engine::aggregate::state::{Advance, AggregateState};
use crate::engine::aggregate::sum::SumAggregate;
use crate::engine::decimal::Decimal128;
use crate::engine::errors::AggregateError;
use crate::engine::types::DecimalVal;

#[inline]
fn check_scale(has_value: bool, held: u8, incoming: u8) -> Result<(), AggregateError> {
    if has_value && held != incoming {
        return Err(AggregateError::ScaleMismatch {
            expected: held,
            found: incoming,
        });
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct DecimalSumAggregate {
    inner: SumAggregate<Decimal128>,
    precision: u8,
}

impl DecimalSumAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl AggregateState for DecimalSumAggregate {
    type Output = DecimalVal;

    fn merge(&mut self, other: &Self) -> Result<(), AggregateError> {
        if other.inner.is_empty() {
            return Ok(());
        }
        check_scale(!self.inner.is_empty(), self.precision, other.precision)?;
        self.inner.merge(&other.inner)?;
        self.precision = other.precision;
        Ok(())
    }

    fn check_merge(&self, other: &Self) -> Result<(), AggregateError> {
        if other.inner.is_empty() {
            return Ok(());
        }
        check_scale(!self.inner.is_empty(), self.precision, other.precision)?;
        self.inner.check_merge(&other.inner)
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.precision = 0;
    }

    fn result(&self) -> DecimalVal {
        match self.inner.sum() {
            Some(sum) => DecimalVal::new(*sum, self.precision),
            None => DecimalVal::null(self.precision),
        }
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Advance<DecimalVal> for DecimalSumAggregate {
    fn advance(&mut self, value: &DecimalVal) -> Result<(), AggregateError> {
        let Some(v) = value.payload() else {
            return Ok(());
        };
        check_scale(!self.inner.is_empty(), self.precision, value.precision())?;
        self.inner.add_value(v)?;
        self.precision = value.precision();
        Ok(())
    }

    fn check_advance(&self, value: &DecimalVal) -> Result<(), AggregateError> {
        let Some(v) = value.payload() else {
            return Ok(());
        };
        check_scale(!self.inner.is_empty(), self.precision, value.precision())?;
        self.inner.check_add(v)
    }
}

/// Decimal MIN or MAX. Seeds are `DECIMAL128_MAX_RAW` for MIN and
/// `DECIMAL128_MIN_RAW` for MAX.
#[derive(Debug)]
pub struct DecimalExtremumAggregate<S: ExtremumSide> {
    inner: ExtremumAggregate<Decimal128, S>,
    precision: u8,
}

pub type DecimalMinAggregate = DecimalExtremumAggregate<MinSide>;
pub type DecimalMaxAggregate = DecimalExtremumAggregate<MaxSide>;

impl<S: ExtremumSide> DecimalExtremumAggregate<S> {
    pub fn new() -> Self {
        Self {
            inner: ExtremumAggregate::new(),
            precision: 0,
        }
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl<S: ExtremumSide> Default for DecimalExtremumAggregate<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ExtremumSide> AggregateState for DecimalExtremumAggregate<S> {
    type Output = DecimalVal;

    fn merge(&mut self, other: &Self) -> Result<(), AggregateError> {
        if other.inner.is_empty() {
            return Ok(());
        }
        check_scale(!self.inner.is_empty(), self.precision, other.precision)?;
        self.inner.merge(&other.inner)?;
        self.precision = other.precision;
        Ok(())
    }

    fn check_merge(&self, other: &Self) -> Result<(), AggregateError> {
        if other.inner.is_empty() {
            return Ok(());
        }
        check_scale(!self.inner.is_empty(), self.precision, other.precision)
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.precision = 0;
    }

    fn result(&self) -> DecimalVal {
        match self.inner.extremum() {
            Some(v) => DecimalVal::new(*v, self.precision),
            None => DecimalVal::null(self.precision),
        }
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<S: ExtremumSide> Advance<DecimalVal> for DecimalExtremumAggregate<S> {
    fn advance(&mut self, value: &DecimalVal) -> Result<(), AggregateError> {
        let Some(v) = value.payload() else {
            return Ok(());
        };
        check_scale(!self.inner.is_empty(), self.precision, value.precision())?;
        self.inner.offer(v);
        self.precision = value.precision();
        Ok(())
    }

    fn check_advance(&self, value: &DecimalVal) -> Result<(), AggregateError> {
        match value.payload() {
            Some(_) => check_scale(!self.inner.is_empty(), self.precision, value.precision()),
            None => Ok(()),
        }
    }
}
