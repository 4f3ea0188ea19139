use chrono::{NaiveDate, NaiveDateTime};

use crate::engine::aggregate::avg::AvgAggregate;
use crate::engine::aggregate::count::{CountAggregate, CountStarAggregate};
use crate::engine::aggregate::decimal::{DecimalExtremumAggregate, DecimalSumAggregate};
use crate::engine::aggregate::extremum::{ExtremumAggregate, ExtremumSide, MaxSide, MinSide};
use crate::engine::aggregate::plan::{AggregateFunction, AggregateOpSpec};
use crate::engine::aggregate::state::{Advance, AggregateState};
use crate::engine::aggregate::sum::SumAggregate;
use crate::engine::errors::AggregateError;
use crate::engine::types::{
    DecimalVal, Integer, LogicalType, NullableValue, Real, ScalarKind, ScalarValue,
};

#[inline]
fn advance_scalar<T, A>(state: &mut A, value: &ScalarValue) -> Result<(), AggregateError>
where
    T: ScalarKind,
    A: Advance<NullableValue<T>>,
{
    state.advance(&NullableValue::<T>::from_scalar(value)?)
}

#[inline]
fn check_scalar<T, A>(state: &A, value: &ScalarValue) -> Result<(), AggregateError>
where
    T: ScalarKind,
    A: Advance<NullableValue<T>>,
{
    state.check_advance(&NullableValue::<T>::from_scalar(value)?)
}

#[inline]
fn advance_decimal<A>(state: &mut A, value: &ScalarValue) -> Result<(), AggregateError>
where
    A: Advance<DecimalVal>,
{
    state.advance(&DecimalVal::from_scalar(value)?)
}

#[inline]
fn check_decimal<A>(state: &A, value: &ScalarValue) -> Result<(), AggregateError>
where
    A: Advance<DecimalVal>,
{
    state.check_advance(&DecimalVal::from_scalar(value)?)
}

/// SUM state per numeric input type
#[derive(Debug)]
pub enum SumImpl {
    Integer(SumAggregate<i64>),
    Real(SumAggregate<f64>),
    Decimal(DecimalSumAggregate),
}

impl SumImpl {
    fn new(input: LogicalType) -> Option<Self> {
        match input {
            LogicalType::Integer => Some(Self::Integer(SumAggregate::new())),
            LogicalType::Real => Some(Self::Real(SumAggregate::new())),
            LogicalType::Decimal => Some(Self::Decimal(DecimalSumAggregate::new())),
            _ => None,
        }
    }

    fn update(&mut self, value: &ScalarValue) -> Result<(), AggregateError> {
        match self {
            SumImpl::Integer(a) => advance_scalar::<i64, _>(a, value),
            SumImpl::Real(a) => advance_scalar::<f64, _>(a, value),
            SumImpl::Decimal(a) => advance_decimal(a, value),
        }
    }

    fn check_update(&self, value: &ScalarValue) -> Result<(), AggregateError> {
        match self {
            SumImpl::Integer(a) => check_scalar::<i64, _>(a, value),
            SumImpl::Real(a) => check_scalar::<f64, _>(a, value),
            SumImpl::Decimal(a) => check_decimal(a, value),
        }
    }

    /// `None` when the variants differ.
    fn merge(&mut self, other: &SumImpl) -> Option<Result<(), AggregateError>> {
        match (self, other) {
            (SumImpl::Integer(a), SumImpl::Integer(b)) => Some(a.merge(b)),
            (SumImpl::Real(a), SumImpl::Real(b)) => Some(a.merge(b)),
            (SumImpl::Decimal(a), SumImpl::Decimal(b)) => Some(a.merge(b)),
            _ => None,
        }
    }

    fn check_merge(&self, other: &SumImpl) -> Option<Result<(), AggregateError>> {
        match (self, other) {
            (SumImpl::Integer(a), SumImpl::Integer(b)) => Some(a.check_merge(b)),
            (SumImpl::Real(a), SumImpl::Real(b)) => Some(a.check_merge(b)),
            (SumImpl::Decimal(a), SumImpl::Decimal(b)) => Some(a.check_merge(b)),
            _ => None,
        }
    }

    fn reset(&mut self) {
        match self {
            SumImpl::Integer(a) => a.reset(),
            SumImpl::Real(a) => a.reset(),
            SumImpl::Decimal(a) => a.reset(),
        }
    }

    fn finalize(&self) -> ScalarValue {
        match self {
            SumImpl::Integer(a) => a.result().into_scalar(),
            SumImpl::Real(a) => a.result().into_scalar(),
            SumImpl::Decimal(a) => a.result().into_scalar(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            SumImpl::Integer(a) => a.is_empty(),
            SumImpl::Real(a) => a.is_empty(),
            SumImpl::Decimal(a) => a.is_empty(),
        }
    }

    fn input_type(&self) -> LogicalType {
        match self {
            SumImpl::Integer(_) => LogicalType::Integer,
            SumImpl::Real(_) => LogicalType::Real,
            SumImpl::Decimal(_) => LogicalType::Decimal,
        }
    }
}

/// MIN or MAX state per ordered input type
#[derive(Debug)]
pub enum ExtremumImpl<S: ExtremumSide> {
    Integer(ExtremumAggregate<i64, S>),
    Real(ExtremumAggregate<f64, S>),
    Decimal(DecimalExtremumAggregate<S>),
    Utf8(ExtremumAggregate<String, S>),
    Date(ExtremumAggregate<NaiveDate, S>),
    Timestamp(ExtremumAggregate<NaiveDateTime, S>),
}

impl<S: ExtremumSide> ExtremumImpl<S> {
    fn new(input: LogicalType) -> Option<Self> {
        match input {
            LogicalType::Integer => Some(Self::Integer(ExtremumAggregate::new())),
            LogicalType::Real => Some(Self::Real(ExtremumAggregate::new())),
            LogicalType::Decimal => Some(Self::Decimal(DecimalExtremumAggregate::new())),
            LogicalType::String => Some(Self::Utf8(ExtremumAggregate::new())),
            LogicalType::Date => Some(Self::Date(ExtremumAggregate::new())),
            LogicalType::Timestamp => Some(Self::Timestamp(ExtremumAggregate::new())),
            LogicalType::Null => None,
        }
    }

    fn update(&mut self, value: &ScalarValue) -> Result<(), AggregateError> {
        match self {
            ExtremumImpl::Integer(a) => advance_scalar::<i64, _>(a, value),
            ExtremumImpl::Real(a) => advance_scalar::<f64, _>(a, value),
            ExtremumImpl::Decimal(a) => advance_decimal(a, value),
            ExtremumImpl::Utf8(a) => advance_scalar::<String, _>(a, value),
            ExtremumImpl::Date(a) => advance_scalar::<NaiveDate, _>(a, value),
            ExtremumImpl::Timestamp(a) => advance_scalar::<NaiveDateTime, _>(a, value),
        }
    }

    fn check_update(&self, value: &ScalarValue) -> Result<(), AggregateError> {
        match self {
            ExtremumImpl::Integer(a) => check_scalar::<i64, _>(a, value),
            ExtremumImpl::Real(a) => check_scalar::<f64, _>(a, value),
            ExtremumImpl::Decimal(a) => check_decimal(a, value),
            ExtremumImpl::Utf8(a) => check_scalar::<String, _>(a, value),
            ExtremumImpl::Date(a) => check_scalar::<NaiveDate, _>(a, value),
            ExtremumImpl::Timestamp(a) => check_scalar::<NaiveDateTime, _>(a, value),
        }
    }

    fn merge(&mut self, other: &ExtremumImpl<S>) -> Option<Result<(), AggregateError>> {
        match (self, other) {
            (ExtremumImpl::Integer(a), ExtremumImpl::Integer(b)) => Some(a.merge(b)),
            (ExtremumImpl::Real(a), ExtremumImpl::Real(b)) => Some(a.merge(b)),
            (ExtremumImpl::Decimal(a), ExtremumImpl::Decimal(b)) => Some(a.merge(b)),
            (ExtremumImpl::Utf8(a), ExtremumImpl::Utf8(b)) => Some(a.merge(b)),
            (ExtremumImpl::Date(a), ExtremumImpl::Date(b)) => Some(a.merge(b)),
            (ExtremumImpl::Timestamp(a), ExtremumImpl::Timestamp(b)) => Some(a.merge(b)),
            _ => None,
        }
    }

    fn check_merge(&self, other: &ExtremumImpl<S>) -> Option<Result<(), AggregateError>> {
        match (self, other) {
            (ExtremumImpl::Decimal(a), ExtremumImpl::Decimal(b)) => Some(a.check_merge(b)),
            (a, b) if a.input_type() == b.input_type() => Some(Ok(())),
            _ => None,
        }
    }

    fn reset(&mut self) {
        match self {
            ExtremumImpl::Integer(a) => a.reset(),
            ExtremumImpl::Real(a) => a.reset(),
            ExtremumImpl::Decimal(a) => a.reset(),
            ExtremumImpl::Utf8(a) => a.reset(),
            ExtremumImpl::Date(a) => a.reset(),
            ExtremumImpl::Timestamp(a) => a.reset(),
        }
    }

    fn finalize(&self) -> ScalarValue {
        match self {
            ExtremumImpl::Integer(a) => a.result().into_scalar(),
            ExtremumImpl::Real(a) => a.result().into_scalar(),
            ExtremumImpl::Decimal(a) => a.result().into_scalar(),
            ExtremumImpl::Utf8(a) => a.result().into_scalar(),
            ExtremumImpl::Date(a) => a.result().into_scalar(),
            ExtremumImpl::Timestamp(a) => a.result().into_scalar(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            ExtremumImpl::Integer(a) => a.is_empty(),
            ExtremumImpl::Real(a) => a.is_empty(),
            ExtremumImpl::Decimal(a) => a.is_empty(),
            ExtremumImpl::Utf8(a) => a.is_empty(),
            ExtremumImpl::Date(a) => a.is_empty(),
            ExtremumImpl::Timestamp(a) => a.is_empty(),
        }
    }

    fn input_type(&self) -> LogicalType {
        match self {
            ExtremumImpl::Integer(_) => LogicalType::Integer,
            ExtremumImpl::Real(_) => LogicalType::Real,
            ExtremumImpl::Decimal(_) => LogicalType::Decimal,
            ExtremumImpl::Utf8(_) => LogicalType::String,
            ExtremumImpl::Date(_) => LogicalType::Date,
            ExtremumImpl::Timestamp(_) => LogicalType::Timestamp,
        }
    }

    fn kind_name(&self) -> String {
        format!("{}({})", S::NAME, self.input_type())
    }
}

/// Aggregator enum with one typed state per (function, input type) pair.
///
/// This is the form the grouping operator stores per group: it accepts
/// dynamically typed `ScalarValue`s and checks them against the input type the
/// aggregator was built for.
#[derive(Debug)]
pub enum AggregatorImpl {
    Count(CountAggregate),
    CountStar(CountStarAggregate),
    Sum(SumImpl),
    Min(ExtremumImpl<MinSide>),
    Max(ExtremumImpl<MaxSide>),
    Avg {
        state: AvgAggregate,
        input: LogicalType,
    },
}

impl AggregatorImpl {
    pub fn from_spec(spec: &AggregateOpSpec) -> Result<Self, AggregateError> {
        spec.validate()?;
        let unsupported = || AggregateError::Unsupported {
            function: spec.function,
            input: spec.input_type,
        };
        let agg = match spec.function {
            AggregateFunction::Count => Self::Count(CountAggregate::new()),
            AggregateFunction::CountStar => Self::CountStar(CountStarAggregate::new()),
            AggregateFunction::Sum => {
                Self::Sum(SumImpl::new(spec.input_type).ok_or_else(unsupported)?)
            }
            AggregateFunction::Min => {
                Self::Min(ExtremumImpl::new(spec.input_type).ok_or_else(unsupported)?)
            }
            AggregateFunction::Max => {
                Self::Max(ExtremumImpl::new(spec.input_type).ok_or_else(unsupported)?)
            }
            AggregateFunction::Avg => match spec.input_type {
                LogicalType::Integer | LogicalType::Real | LogicalType::Decimal => Self::Avg {
                    state: AvgAggregate::new(),
                    input: spec.input_type,
                },
                _ => return Err(unsupported()),
            },
        };
        Ok(agg)
    }

    /// Advance with one input value. COUNT(*) ignores the value entirely.
    pub fn update(&mut self, value: &ScalarValue) -> Result<(), AggregateError> {
        match self {
            AggregatorImpl::Count(a) => a.advance(value),
            AggregatorImpl::CountStar(a) => a.advance(value),
            AggregatorImpl::Sum(a) => a.update(value),
            AggregatorImpl::Min(a) => a.update(value),
            AggregatorImpl::Max(a) => a.update(value),
            AggregatorImpl::Avg { state, input } => match input {
                LogicalType::Integer => state.advance(&Integer::from_scalar(value)?),
                LogicalType::Real => state.advance(&Real::from_scalar(value)?),
                LogicalType::Decimal => state.advance(&DecimalVal::from_scalar(value)?),
                other => Err(AggregateError::Unsupported {
                    function: AggregateFunction::Avg,
                    input: *other,
                }),
            },
        }
    }

    /// Fails exactly when `update(value)` would, leaving the state untouched.
    pub fn check_update(&self, value: &ScalarValue) -> Result<(), AggregateError> {
        match self {
            AggregatorImpl::Count(a) => a.check_advance(value),
            AggregatorImpl::CountStar(a) => a.check_advance(value),
            AggregatorImpl::Sum(a) => a.check_update(value),
            AggregatorImpl::Min(a) => a.check_update(value),
            AggregatorImpl::Max(a) => a.check_update(value),
            AggregatorImpl::Avg { state, input } => match input {
                LogicalType::Integer => state.check_advance(&Integer::from_scalar(value)?),
                LogicalType::Real => state.check_advance(&Real::from_scalar(value)?),
                LogicalType::Decimal => state.check_advance(&DecimalVal::from_scalar(value)?),
                other => Err(AggregateError::Unsupported {
                    function: AggregateFunction::Avg,
                    input: *other,
                }),
            },
        }
    }

    fn kind_mismatch(&self, other: &AggregatorImpl) -> AggregateError {
        AggregateError::KindMismatch {
            left: other.kind_name(),
            right: self.kind_name(),
        }
    }

    /// Merge another aggregator of the same variant and input type
    pub fn merge(&mut self, other: &AggregatorImpl) -> Result<(), AggregateError> {
        let mismatch = self.kind_mismatch(other);
        let merged = match (&mut *self, other) {
            (AggregatorImpl::Count(a), AggregatorImpl::Count(b)) => Some(a.merge(b)),
            (AggregatorImpl::CountStar(a), AggregatorImpl::CountStar(b)) => Some(a.merge(b)),
            (AggregatorImpl::Sum(a), AggregatorImpl::Sum(b)) => a.merge(b),
            (AggregatorImpl::Min(a), AggregatorImpl::Min(b)) => a.merge(b),
            (AggregatorImpl::Max(a), AggregatorImpl::Max(b)) => a.merge(b),
            (
                AggregatorImpl::Avg { state: a, input: ia },
                AggregatorImpl::Avg { state: b, input: ib },
            ) if *ia == *ib => Some(a.merge(b)),
            _ => None,
        };
        merged.unwrap_or(Err(mismatch))
    }

    /// Fails exactly when `merge(other)` would, leaving the state untouched.
    pub fn check_merge(&self, other: &AggregatorImpl) -> Result<(), AggregateError> {
        let checked = match (self, other) {
            (AggregatorImpl::Count(a), AggregatorImpl::Count(b)) => Some(a.check_merge(b)),
            (AggregatorImpl::CountStar(a), AggregatorImpl::CountStar(b)) => {
                Some(a.check_merge(b))
            }
            (AggregatorImpl::Sum(a), AggregatorImpl::Sum(b)) => a.check_merge(b),
            (AggregatorImpl::Min(a), AggregatorImpl::Min(b)) => a.check_merge(b),
            (AggregatorImpl::Max(a), AggregatorImpl::Max(b)) => a.check_merge(b),
            (
                AggregatorImpl::Avg { state: a, input: ia },
                AggregatorImpl::Avg { state: b, input: ib },
            ) if ia == ib => Some(a.check_merge(b)),
            _ => None,
        };
        checked.unwrap_or_else(|| Err(self.kind_mismatch(other)))
    }

    pub fn reset(&mut self) {
        match self {
            AggregatorImpl::Count(a) => a.reset(),
            AggregatorImpl::CountStar(a) => a.reset(),
            AggregatorImpl::Sum(a) => a.reset(),
            AggregatorImpl::Min(a) => a.reset(),
            AggregatorImpl::Max(a) => a.reset(),
            AggregatorImpl::Avg { state, .. } => state.reset(),
        }
    }

    pub fn finalize(&self) -> ScalarValue {
        match self {
            AggregatorImpl::Count(a) => a.result().into_scalar(),
            AggregatorImpl::CountStar(a) => a.result().into_scalar(),
            AggregatorImpl::Sum(a) => a.finalize(),
            AggregatorImpl::Min(a) => a.finalize(),
            AggregatorImpl::Max(a) => a.finalize(),
            AggregatorImpl::Avg { state, .. } => state.result().into_scalar(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AggregatorImpl::Count(a) => a.is_empty(),
            AggregatorImpl::CountStar(a) => a.is_empty(),
            AggregatorImpl::Sum(a) => a.is_empty(),
            AggregatorImpl::Min(a) => a.is_empty(),
            AggregatorImpl::Max(a) => a.is_empty(),
            AggregatorImpl::Avg { state, .. } => state.is_empty(),
        }
    }

    /// Function and input type, e.g. `SUM(Decimal)`; used in merge errors.
    pub fn kind_name(&self) -> String {
        match self {
            AggregatorImpl::Count(_) => AggregateFunction::Count.to_string(),
            AggregatorImpl::CountStar(_) => AggregateFunction::CountStar.to_string(),
            AggregatorImpl::Sum(a) => format!("{}({})", AggregateFunction::Sum, a.input_type()),
            AggregatorImpl::Min(a) => a.kind_name(),
            AggregatorImpl::Max(a) => a.kind_name(),
            AggregatorImpl::Avg { input, .. } => format!("{}({})", AggregateFunction::Avg, input),
        }
    }
}
